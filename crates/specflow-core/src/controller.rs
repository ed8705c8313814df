use crate::config::{StatusPolicy, TransitionPolicy};
use crate::error::{Result, SpecflowError};
use crate::spec::{derived_status, Specification};
use crate::store::SpecStore;
use crate::task::{self, Task};
use crate::types::Status;

/// Applies task status transitions to the active specification.
pub struct TaskController<'a> {
    store: &'a mut SpecStore,
}

impl<'a> TaskController<'a> {
    pub fn new(store: &'a mut SpecStore) -> Self {
        Self { store }
    }

    /// Move one task of the active specification to `target`.
    ///
    /// Requesting the status a task already has is a no-op. Under the strict
    /// policy any other target must be the immediate successor of the
    /// current status. On success the stored member and the active pointer
    /// both refer to the returned value; on failure nothing changes.
    pub fn advance_task(&mut self, task_id: u32, target: Status) -> Result<Specification> {
        let active = self
            .store
            .active()
            .ok_or(SpecflowError::NoActiveSpecification)?;
        let current = task::find(&active.tasks, task_id)?;

        if current.status == target {
            return Ok(active.clone());
        }
        if self.store.config().transitions == TransitionPolicy::Strict {
            current.can_advance_to(target)?;
        }

        let from = current.status;
        let tasks: Vec<Task> = active
            .tasks
            .iter()
            .map(|t| {
                if t.id == task_id {
                    t.with_status(target)
                } else {
                    t.clone()
                }
            })
            .collect();
        let status = match self.store.config().status_policy {
            StatusPolicy::Derived => derived_status(&tasks),
            StatusPolicy::Fixed => active.status,
        };
        let updated = active.with_tasks(tasks, status);

        tracing::debug!(
            spec = %updated.id,
            task = task_id,
            %from,
            to = %target,
            "advanced task"
        );
        self.store.replace(updated.clone())?;
        Ok(updated)
    }

    pub fn start_task(&mut self, task_id: u32) -> Result<Specification> {
        self.advance_task(task_id, Status::InProgress)
    }

    pub fn complete_task(&mut self, task_id: u32) -> Result<Specification> {
        self.advance_task(task_id, Status::Completed)
    }

    /// First unfinished task of the active specification.
    pub fn next_task(&self) -> Result<Option<Task>> {
        let active = self
            .store
            .active()
            .ok_or(SpecflowError::NoActiveSpecification)?;
        Ok(task::next_task(&active.tasks).cloned())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn store_with(config: Config) -> SpecStore {
        let mut store = SpecStore::new(config);
        store.create_from_prompt("Build login page").unwrap();
        store
    }

    #[test]
    fn login_page_walkthrough() {
        let mut store = SpecStore::default();
        let spec = store.create_from_prompt("Build login page").unwrap();
        assert_eq!(spec.title, "Build login page");
        assert_eq!(spec.status, Status::InProgress);
        assert_eq!(
            spec.tasks[0],
            Task::new(
                1,
                "Set up project structure",
                "Initialize repository and configure build tools"
            )
        );

        let spec = TaskController::new(&mut store)
            .advance_task(1, Status::InProgress)
            .unwrap();
        assert_eq!(spec.tasks[0].status, Status::InProgress);
        assert_eq!(spec.tasks[1].status, Status::Pending);

        let spec = TaskController::new(&mut store)
            .advance_task(1, Status::Completed)
            .unwrap();
        assert_eq!(spec.tasks[0].status, Status::Completed);
        assert_eq!(store.active(), Some(&spec));
    }

    #[test]
    fn advance_changes_exactly_one_task() {
        let mut store = store_with(Config::default());
        let before = store.active().unwrap().clone();

        let after = TaskController::new(&mut store).start_task(3).unwrap();

        assert_eq!(after.id, before.id);
        assert_eq!(after.title, before.title);
        assert_eq!(after.requirements, before.requirements);
        assert_eq!(after.design, before.design);
        assert_eq!(after.created_at, before.created_at);
        for (old, new) in before.tasks.iter().zip(&after.tasks) {
            if old.id == 3 {
                assert_eq!(new, &old.with_status(Status::InProgress));
            } else {
                assert_eq!(new, old);
            }
        }
    }

    #[test]
    fn complete_changes_exactly_one_task() {
        let mut store = store_with(Config::default());
        TaskController::new(&mut store).start_task(3).unwrap();
        let before = store.active().unwrap().clone();

        let after = TaskController::new(&mut store).complete_task(3).unwrap();

        assert_eq!(after.id, before.id);
        assert_eq!(after.title, before.title);
        assert_eq!(after.requirements, before.requirements);
        assert_eq!(after.design, before.design);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.tasks.len(), before.tasks.len());
        for (old, new) in before.tasks.iter().zip(&after.tasks) {
            if old.id == 3 {
                assert_eq!(old.status, Status::InProgress);
                assert_eq!(new, &old.with_status(Status::Completed));
            } else {
                assert_eq!(new, old);
            }
        }
    }

    #[test]
    fn stored_member_matches_active() {
        let mut store = SpecStore::default();
        let first = store.create_from_prompt("first").unwrap();
        store.create_from_prompt("second").unwrap();
        store.select(first.id).unwrap();

        let updated = TaskController::new(&mut store).start_task(1).unwrap();
        assert_eq!(store.get(first.id), Some(&updated));
        assert_eq!(store.active(), Some(&updated));
        assert_eq!(store.specs()[1].tasks[0].status, Status::Pending);
    }

    #[test]
    fn unknown_task_leaves_state_unchanged() {
        let mut store = store_with(Config::default());
        let before = store.snapshot();

        let err = TaskController::new(&mut store)
            .advance_task(42, Status::InProgress)
            .unwrap_err();
        assert!(matches!(err, SpecflowError::TaskNotFound(42)));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn no_active_specification() {
        let mut store = SpecStore::default();
        let err = TaskController::new(&mut store)
            .advance_task(1, Status::InProgress)
            .unwrap_err();
        assert!(matches!(err, SpecflowError::NoActiveSpecification));

        store.create_from_prompt("one").unwrap();
        store.deselect();
        let err = TaskController::new(&mut store).complete_task(1).unwrap_err();
        assert!(matches!(err, SpecflowError::NoActiveSpecification));
    }

    #[test]
    fn same_status_is_a_noop() {
        let mut store = store_with(Config::default());
        let before = store.snapshot();
        let spec = TaskController::new(&mut store)
            .advance_task(2, Status::Pending)
            .unwrap();
        assert_eq!(spec.tasks[1].status, Status::Pending);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn strict_policy_rejects_skips_and_reversals() {
        let mut store = store_with(Config::default());
        let before = store.snapshot();

        let mut ctl = TaskController::new(&mut store);
        let err = ctl.complete_task(1).unwrap_err();
        assert!(matches!(err, SpecflowError::InvalidTransition { .. }));

        ctl.start_task(1).unwrap();
        let err = ctl.advance_task(1, Status::Pending).unwrap_err();
        assert!(matches!(err, SpecflowError::InvalidTransition { .. }));

        ctl.complete_task(1).unwrap();
        assert!(ctl.start_task(1).is_err());

        assert_ne!(store.snapshot(), before);
        assert_eq!(store.active().unwrap().tasks[0].status, Status::Completed);
    }

    #[test]
    fn lenient_policy_accepts_any_target() {
        let config = Config {
            transitions: TransitionPolicy::Lenient,
            ..Config::default()
        };
        let mut store = store_with(config);
        let mut ctl = TaskController::new(&mut store);

        let spec = ctl.complete_task(4).unwrap();
        assert_eq!(spec.tasks[3].status, Status::Completed);

        let spec = ctl.advance_task(4, Status::Pending).unwrap();
        assert_eq!(spec.tasks[3].status, Status::Pending);
    }

    #[test]
    fn derived_status_follows_tasks() {
        let mut store = store_with(Config::default());
        let mut ctl = TaskController::new(&mut store);

        let spec = ctl.start_task(1).unwrap();
        assert_eq!(spec.status, Status::InProgress);

        let mut spec = spec;
        for id in 1..=7 {
            if id != 1 {
                ctl.start_task(id).unwrap();
            }
            spec = ctl.complete_task(id).unwrap();
        }
        assert_eq!(spec.status, Status::Completed);
        assert_eq!(spec.completed_count(), 7);
    }

    #[test]
    fn derived_status_returns_to_pending_under_lenient() {
        let config = Config {
            transitions: TransitionPolicy::Lenient,
            ..Config::default()
        };
        let mut store = store_with(config);
        let mut ctl = TaskController::new(&mut store);
        ctl.start_task(1).unwrap();
        let spec = ctl.advance_task(1, Status::Pending).unwrap();
        assert_eq!(spec.status, Status::Pending);
    }

    #[test]
    fn fixed_status_never_changes() {
        let config = Config {
            status_policy: StatusPolicy::Fixed,
            ..Config::default()
        };
        let mut store = store_with(config);
        let mut ctl = TaskController::new(&mut store);
        ctl.start_task(1).unwrap();
        ctl.advance_task(1, Status::Completed).unwrap();
        for id in 2..=7 {
            ctl.start_task(id).unwrap();
            ctl.complete_task(id).unwrap();
        }
        let spec = store.active().unwrap();
        assert_eq!(spec.completed_count(), 7);
        assert_eq!(spec.status, Status::InProgress);
    }

    #[test]
    fn next_task_walks_in_order() {
        let mut store = store_with(Config::default());
        let mut ctl = TaskController::new(&mut store);
        assert_eq!(ctl.next_task().unwrap().unwrap().id, 1);
        ctl.start_task(1).unwrap();
        assert_eq!(ctl.next_task().unwrap().unwrap().id, 1);
        ctl.complete_task(1).unwrap();
        assert_eq!(ctl.next_task().unwrap().unwrap().id, 2);
    }
}
