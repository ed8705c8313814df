use crate::cmd::spec::active;
use crate::output::{print_json, print_table};
use anyhow::Context;
use specflow_core::{task as task_ops, types::Status, SpecStore, Specification, TaskController};
use std::io::Write;

pub fn list(store: &SpecStore, out: &mut dyn Write, json: bool) -> anyhow::Result<()> {
    let spec = active(store)?;

    if json {
        return print_json(out, &spec.tasks);
    }

    writeln!(out, "{}", task_ops::summarize(&spec.tasks))?;
    writeln!(out)?;

    let rows: Vec<Vec<String>> = spec
        .tasks
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.status.to_string(),
                t.title.clone(),
                t.description.clone(),
            ]
        })
        .collect();
    print_table(out, &["ID", "STATUS", "TITLE", "DESCRIPTION"], rows)
}

pub fn start(
    store: &mut SpecStore,
    task_id: u32,
    out: &mut dyn Write,
    json: bool,
) -> anyhow::Result<()> {
    let spec = TaskController::new(store)
        .start_task(task_id)
        .with_context(|| format!("cannot start task [{task_id}]"))?;
    report(&spec, task_id, out, json, || format!("Started task [{task_id}]"))
}

pub fn complete(
    store: &mut SpecStore,
    task_id: u32,
    out: &mut dyn Write,
    json: bool,
) -> anyhow::Result<()> {
    let spec = TaskController::new(store)
        .complete_task(task_id)
        .with_context(|| format!("cannot complete task [{task_id}]"))?;
    report(&spec, task_id, out, json, || format!("Completed task [{task_id}]"))
}

pub fn advance(
    store: &mut SpecStore,
    task_id: u32,
    status: &str,
    out: &mut dyn Write,
    json: bool,
) -> anyhow::Result<()> {
    let target: Status = status.parse()?;
    let spec = TaskController::new(store)
        .advance_task(task_id, target)
        .with_context(|| format!("cannot move task [{task_id}] to {target}"))?;
    report(&spec, task_id, out, json, || {
        format!("Task [{task_id}] is now {target}")
    })
}

pub fn next(store: &mut SpecStore, out: &mut dyn Write, json: bool) -> anyhow::Result<()> {
    let next = TaskController::new(store).next_task()?;

    if json {
        return print_json(out, &next);
    }

    match next {
        Some(t) => writeln!(out, "Next task [{}] ({}): {}", t.id, t.status, t.title)?,
        None => writeln!(out, "All tasks completed.")?,
    }
    Ok(())
}

fn report(
    spec: &Specification,
    task_id: u32,
    out: &mut dyn Write,
    json: bool,
    message: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    if json {
        let status = spec.task(task_id).map(|t| t.status);
        return print_json(
            out,
            &serde_json::json!({
                "spec": spec.id,
                "task_id": task_id,
                "status": status,
                "spec_status": spec.status,
            }),
        );
    }
    writeln!(out, "{}", message())?;
    writeln!(out, "{}", task_ops::summarize(&spec.tasks))?;
    Ok(())
}
