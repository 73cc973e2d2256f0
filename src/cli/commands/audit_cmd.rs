//! `quill audit` — display the audit log.
//!
//! Usage:
//!   quill audit               # show last 50 entries
//!   quill audit --last 20     # show last 20
//!   quill audit --since 7d    # entries from last 7 days

use chrono::Utc;

use crate::audit::{AuditEntry, AuditLog};
use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{QuillError, Result};

/// Execute the `audit` command.
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    let ctx = Context::load(cli)?;

    let audit = AuditLog::open(&ctx.journal_dir)
        .ok_or_else(|| QuillError::AuditError("failed to open audit database".into()))?;

    let since_dt = match since {
        Some(s) => Some(parse_duration(s)?),
        None => None,
    };

    let entries = audit.query(last, since_dt)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    print_audit_table(&entries);

    Ok(())
}

/// Parse a human-friendly duration string like "7d", "24h", "30m".
fn parse_duration(input: &str) -> Result<chrono::DateTime<Utc>> {
    let input = input.trim();

    let (num_str, unit) = if let Some(s) = input.strip_suffix('d') {
        (s, 'd')
    } else if let Some(s) = input.strip_suffix('h') {
        (s, 'h')
    } else if let Some(s) = input.strip_suffix('m') {
        (s, 'm')
    } else {
        return Err(QuillError::Validation(format!(
            "invalid duration '{input}': use a form like 7d, 24h, or 30m"
        )));
    };

    let num: u32 = num_str.parse().map_err(|_| {
        QuillError::Validation(format!("invalid duration '{input}': not a whole number"))
    })?;

    let duration = match unit {
        'd' => chrono::Duration::days(num.into()),
        'h' => chrono::Duration::hours(num.into()),
        _ => chrono::Duration::minutes(num.into()),
    };

    Ok(Utc::now() - duration)
}

/// Print audit entries in a formatted table.
pub fn print_audit_table(entries: &[AuditEntry]) {
    use comfy_table::{ContentArrangement, Table};
    use console::style;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Target", "Details"]);

    for entry in entries {
        let time = entry
            .timestamp
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();

        table.add_row(vec![
            time,
            colorize_operation(&entry.operation),
            entry.target.clone().unwrap_or_else(|| "-".into()),
            entry.details.clone().unwrap_or_else(|| "-".into()),
        ]);
    }

    println!(
        "{}",
        style(format!("{} audit entries:", entries.len())).bold()
    );
    println!("{table}");
}

/// Colorize operation names for display.
fn colorize_operation(op: &str) -> String {
    use console::style;

    match op {
        "init" | "board-add" => style(op).green().to_string(),
        "write" => style(op).blue().to_string(),
        "delete" | "board-delete" => style(op).red().to_string(),
        "import-failed" => style(op).yellow().to_string(),
        "export" | "import" => style(op).cyan().to_string(),
        _ => op.to_string(),
    }
}
