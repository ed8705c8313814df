use crate::output::{print_json, print_table};
use specflow_core::config::{Config, ServerStatus};
use std::io::Write;

pub fn run(config: &Config, out: &mut dyn Write, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(out, &config.servers);
    }

    if config.servers.is_empty() {
        writeln!(out, "No tool servers configured.")?;
        return Ok(());
    }

    writeln!(out, "{} connected", config.connected_servers().count())?;
    writeln!(out)?;

    let rows: Vec<Vec<String>> = config
        .servers
        .iter()
        .map(|s| {
            let status = match s.status {
                ServerStatus::Connected => "connected",
                ServerStatus::Disconnected => "disconnected",
            };
            vec![
                s.name.clone(),
                status.to_string(),
                format!("{} tools available", s.tools.len()),
                s.tools.join(", "),
            ]
        })
        .collect();
    print_table(out, &["NAME", "STATUS", "COUNT", "TOOLS"], rows)
}
