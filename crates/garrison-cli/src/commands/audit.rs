//! Audit command - the settings view's audit trail.

use colored::Colorize;
use garrison_audit::{AuditAction, AuditEntry};
use garrison_console::Console;

use crate::formatter::{OutputFormat, print_json};
use crate::theme::Theme;

/// Show recent audit entries, or every entry with one tag.
pub(crate) async fn show(
    console: &Console,
    limit: Option<usize>,
    action: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let entries = match action {
        Some(tag) => {
            let mut entries = console
                .audit_by_action(&AuditAction::from(tag.trim().to_uppercase()))
                .await?;
            if let Some(limit) = limit {
                entries.truncate(limit);
            }
            entries
        },
        None => console.audit_recent(limit).await?,
    };

    if format == OutputFormat::Json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("{}", Theme::info("No audit entries"));
        return Ok(());
    }

    println!("\n{}", Theme::header("Audit Trail"));
    println!(
        "{:<16} {:<16} {}",
        "TIMESTAMP".dimmed(),
        "ACTION".dimmed(),
        "DETAIL".dimmed()
    );
    println!("{}", Theme::separator());
    for entry in &entries {
        println!(
            "{:<16} {:<16} {}: {}",
            Theme::timestamp(&entry.timestamp),
            colored_action(entry),
            entry.actor_email.bold(),
            entry.detail
        );
    }
    println!();
    Ok(())
}

fn colored_action(entry: &AuditEntry) -> String {
    let tag = entry.action.as_str();
    match entry.action {
        AuditAction::Login | AuditAction::Logout => tag.blue().to_string(),
        AuditAction::Register => tag.yellow().to_string(),
        AuditAction::ApproveUser => tag.green().to_string(),
        AuditAction::RejectUser | AuditAction::RevokeUser | AuditAction::OwnerRestored => {
            tag.red().to_string()
        },
        ref action if !action.is_known() => tag.dimmed().to_string(),
        _ => tag.to_string(),
    }
}
