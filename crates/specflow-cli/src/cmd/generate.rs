use crate::cmd::spec::write_documents;
use anyhow::Context;
use specflow_core::{config::Config, types::DocumentKind, SpecStore};
use std::io::Write;

pub fn run(
    config: Config,
    prompt: &str,
    doc: Option<DocumentKind>,
    out: &mut dyn Write,
    json: bool,
) -> anyhow::Result<()> {
    let mut store = SpecStore::new(config);
    let spec = store
        .try_create_from_prompt(prompt)
        .context("failed to generate specification")?;

    write_documents(&spec, doc, out, json)
}
