//! Dashboard command.

use garrison_console::Console;

use crate::commands::reports::print_reports;
use crate::formatter::{OutputFormat, print_json};
use crate::theme::{Theme, print_banner};

/// Show the dashboard counters and recent reports.
pub(crate) async fn show(console: &Console, format: OutputFormat) -> anyhow::Result<()> {
    let summary = console.dashboard().await?;
    if format == OutputFormat::Json {
        return print_json(&summary);
    }

    let user = console.whoami()?;
    print_banner();
    println!(
        "{}",
        Theme::header(&format!("Welcome, {} {}", user.rank, user.display_name))
    );
    println!("{}", Theme::separator());
    println!("{}", Theme::kv("Total reports", &summary.total_reports.to_string()));
    println!(
        "{}",
        Theme::kv("Pending approvals", &summary.pending_approvals.to_string())
    );
    println!("{}", Theme::kv("Active users", &summary.active_users.to_string()));

    if summary.recent_reports.is_empty() {
        println!("\n{}", Theme::info("No reports yet"));
        return Ok(());
    }
    println!("\n{}", Theme::header("Recent Reports"));
    print_reports(&summary.recent_reports);
    Ok(())
}
