use crate::output::{print_json, print_table};
use anyhow::Context;
use specflow_core::{
    spec::{SpecId, Specification},
    task,
    types::DocumentKind,
    SpecStore,
};
use std::io::Write;

pub fn create(
    store: &mut SpecStore,
    prompt: &str,
    out: &mut dyn Write,
    json: bool,
) -> anyhow::Result<()> {
    let spec = store
        .try_create_from_prompt(prompt)
        .context("failed to create specification")?;

    if json {
        print_json(out, &spec)?;
    } else {
        writeln!(out, "Created specification {}: {}", spec.id, spec.title)?;
        writeln!(out, "{}", task::summarize(&spec.tasks))?;
    }
    Ok(())
}

pub fn list(store: &SpecStore, out: &mut dyn Write, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(out, &store.snapshot());
    }

    if store.is_empty() {
        writeln!(out, "No specifications yet.")?;
        return Ok(());
    }

    let active = store.active_id();
    let rows: Vec<Vec<String>> = store
        .specs()
        .iter()
        .map(|s| {
            vec![
                if Some(s.id) == active { "*" } else { "" }.to_string(),
                s.id.to_string(),
                s.status.to_string(),
                format!("{}/{}", s.completed_count(), s.task_count()),
                s.title.clone(),
            ]
        })
        .collect();
    print_table(out, &["", "ID", "STATUS", "TASKS", "TITLE"], rows)
}

pub fn open(store: &mut SpecStore, id: &str, out: &mut dyn Write, json: bool) -> anyhow::Result<()> {
    let id: SpecId = id.parse()?;
    store
        .select(id)
        .with_context(|| format!("cannot open specification {id}"))?;
    let spec = active(store)?;

    if json {
        print_json(out, spec)?;
    } else {
        writeln!(out, "Opened specification {}: {}", spec.id, spec.title)?;
    }
    Ok(())
}

pub fn close(store: &mut SpecStore, out: &mut dyn Write, json: bool) -> anyhow::Result<()> {
    let closed = store.active_id();
    store.deselect();

    if json {
        print_json(out, &serde_json::json!({ "closed": closed }))?;
    } else if let Some(id) = closed {
        writeln!(out, "Closed specification {id}")?;
    } else {
        writeln!(out, "No specification open.")?;
    }
    Ok(())
}

pub fn show(
    store: &SpecStore,
    doc: Option<DocumentKind>,
    out: &mut dyn Write,
    json: bool,
) -> anyhow::Result<()> {
    let spec = active(store)?;
    write_documents(spec, doc, out, json)
}

/// Print one document of `spec`, or all three separated by blank lines.
pub fn write_documents(
    spec: &Specification,
    doc: Option<DocumentKind>,
    out: &mut dyn Write,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        return match doc {
            Some(kind) => print_json(
                out,
                &serde_json::json!({ "id": spec.id, "document": kind, "content": spec.document(kind) }),
            ),
            None => print_json(out, spec),
        };
    }

    let kinds: &[DocumentKind] = match doc {
        Some(ref kind) => std::slice::from_ref(kind),
        None => DocumentKind::all(),
    };
    for (i, kind) in kinds.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", spec.document(*kind))?;
    }
    Ok(())
}

pub fn status(store: &SpecStore, out: &mut dyn Write, json: bool) -> anyhow::Result<()> {
    let spec = active(store)?;
    let progress = spec.progress();

    if json {
        print_json(
            out,
            &serde_json::json!({
                "id": spec.id,
                "title": spec.title,
                "status": spec.status,
                "progress": progress,
            }),
        )?;
        return Ok(());
    }

    writeln!(out, "Specification: {}", spec.id)?;
    writeln!(out, "Title:    {}", spec.title)?;
    writeln!(out, "Status:   {}", spec.status)?;
    writeln!(out, "Created:  {}", spec.created_at.format("%Y-%m-%d %H:%M"))?;
    writeln!(
        out,
        "Tasks:    {}/{} completed, {} in progress, {} pending",
        progress.completed, progress.total, progress.in_progress, progress.pending
    )?;
    Ok(())
}

pub(crate) fn active(store: &SpecStore) -> anyhow::Result<&Specification> {
    store
        .active()
        .ok_or(specflow_core::SpecflowError::NoActiveSpecification)
        .map_err(Into::into)
}
