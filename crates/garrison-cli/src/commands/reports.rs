//! Report commands - create and list.

use colored::Colorize;
use garrison_console::Console;
use garrison_core::{DisciplinaryDetails, Rank, Report, ReportType};
use garrison_reports::NewReport;

use crate::formatter::{OutputFormat, print_json};
use crate::theme::Theme;

/// Fields of `garrison report create`.
#[derive(Debug, Default)]
pub(crate) struct ReportArgs {
    pub(crate) report_type: Option<ReportType>,
    pub(crate) subject: String,
    pub(crate) personnel: String,
    pub(crate) rank: Option<Rank>,
    pub(crate) command: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) attachments: Vec<String>,
    pub(crate) investigator_notes: Option<String>,
    pub(crate) disciplinary_steps: Option<String>,
    pub(crate) final_disposition: Option<String>,
}

impl ReportArgs {
    /// Build the draft. The type defaults to weekly.
    pub(crate) fn into_draft(self) -> NewReport {
        let mut draft = NewReport::new(
            self.report_type.unwrap_or(ReportType::Weekly),
            self.subject,
            self.personnel,
        );
        if let Some(rank) = self.rank {
            draft = draft.with_rank(rank);
        }
        if let Some(command) = self.command {
            draft = draft.with_command(command);
        }
        if let Some(description) = self.description {
            draft = draft.with_description(description);
        }
        for reference in self.attachments {
            draft = draft.with_attachment(reference);
        }
        let details = DisciplinaryDetails {
            investigator_notes: self.investigator_notes,
            disciplinary_steps: self.disciplinary_steps,
            final_disposition: self.final_disposition,
        };
        if !details.is_empty() {
            draft = draft.with_disciplinary(details);
        }
        draft
    }
}

/// File a report.
pub(crate) async fn create(console: &Console, args: ReportArgs) -> anyhow::Result<()> {
    let report = console.create_report(args.into_draft()).await?;
    println!(
        "{}",
        Theme::success(&format!(
            "Filed {} report \"{}\" ({})",
            report.report_type, report.subject, report.id
        ))
    );
    Ok(())
}

/// List reports, optionally of one type.
pub(crate) async fn list(
    console: &Console,
    filter: Option<ReportType>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let reports = console.reports(filter).await?;
    if format == OutputFormat::Json {
        return print_json(&reports);
    }
    if reports.is_empty() {
        println!("{}", Theme::info("No reports"));
        return Ok(());
    }

    let title = filter.map_or_else(|| "Reports".to_string(), |t| format!("Reports: {t}"));
    println!("\n{}", Theme::header(&title));
    print_reports(&reports);
    Ok(())
}

pub(crate) fn print_reports(reports: &[Report]) {
    println!(
        "{:<16} {:<26} {:<32} {:<10} {}",
        "DATE".dimmed(),
        "TYPE".dimmed(),
        "SUBJECT".dimmed(),
        "STATUS".dimmed(),
        "PERSONNEL".dimmed()
    );
    println!("{}", Theme::separator());
    for report in reports {
        println!(
            "{:<16} {:<26} {:<32} {:<10} {}",
            report.created_at.date_string(),
            report.report_type.to_string(),
            truncate(&report.subject, 32),
            report.status.to_string(),
            report.personnel_name
        );
    }
    println!();
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}
