//! Garrison CLI - role-based admin console.
//!
//! Each invocation opens the configured store, restores the persisted
//! session, runs one command and exits. `garrison login` makes the session
//! stick across invocations until `garrison logout`.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use garrison_console::{Console, ConsoleSettings, View};
use garrison_core::dirs::GarrisonHome;
use garrison_core::{Permission, Rank, ReportType, Role};

mod commands;
mod config_bridge;
mod formatter;
mod store;
mod theme;

use commands::{account, audit, backup, dashboard, reports, review};
use formatter::OutputFormat;
use store::StoreHandle;
use theme::Theme;

/// Garrison - role-based admin console
#[derive(Parser)]
#[command(name = "garrison")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a configuration file (must exist)
    #[arg(short, long, global = true, env = "GARRISON_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request access to the console
    Register {
        /// Login email
        email: String,
        /// War name
        #[arg(long)]
        name: String,
        /// Rank, e.g. `captain`
        #[arg(long)]
        rank: Rank,
        /// Unit or command
        #[arg(long)]
        command: String,
    },

    /// Log in as an approved user
    Login {
        /// Login email
        email: String,
    },

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List available views, or check access to one
    Views {
        /// View to open
        view: Option<View>,
    },

    /// Show the dashboard
    Dashboard,

    /// List pending access requests
    Pending,

    /// Approve a pending access request
    Approve {
        /// Email of the pending user
        email: String,
        /// Role to grant
        #[arg(long)]
        role: Role,
        /// Permission to grant (repeatable)
        #[arg(short, long = "permission")]
        permissions: Vec<Permission>,
    },

    /// Reject a pending access request
    Reject {
        /// Email of the pending user
        email: String,
    },

    /// Revoke an approved member's access
    Revoke {
        /// Email of the member
        email: String,
    },

    /// List reviewed members
    Users {
        /// Filter by name, email or command
        #[arg(default_value = "")]
        search: String,
    },

    /// Manage reports
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },

    /// Show the audit trail
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Only entries with this tag, e.g. `APPROVE_USER`
        #[arg(long)]
        action: Option<String>,
    },

    /// Export users, reports and logs to JSON (owner only)
    Export {
        /// Output file (default: a timestamped file under the backups directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ReportCommands {
    /// File a new report
    Create {
        /// Report type (default: weekly)
        #[arg(long = "type")]
        report_type: Option<ReportType>,
        /// One-line subject
        #[arg(long)]
        subject: String,
        /// Personnel the report concerns
        #[arg(long)]
        personnel: String,
        /// Rank of that personnel
        #[arg(long)]
        rank: Option<Rank>,
        /// Originating command (default: yours)
        #[arg(long)]
        command: Option<String>,
        /// Free-text body
        #[arg(long)]
        description: Option<String>,
        /// Attachment reference (repeatable)
        #[arg(long = "attach")]
        attachments: Vec<String>,
        /// Investigator notes (disciplinary proceedings)
        #[arg(long)]
        investigator_notes: Option<String>,
        /// Steps taken (disciplinary proceedings)
        #[arg(long)]
        disciplinary_steps: Option<String>,
        /// Final disposition (disciplinary proceedings)
        #[arg(long)]
        final_disposition: Option<String>,
    },

    /// List reports
    List {
        /// Only this type
        #[arg(long = "type")]
        report_type: Option<ReportType>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let home = GarrisonHome::resolve().context("resolving the Garrison home directory")?;
    let loaded = garrison_config::load(Some(home.root()), cli.config.as_deref())?;
    let cfg = loaded.config;

    // Set up logging from config, with --verbose override.
    let mut log_config = config_bridge::to_log_config(&cfg, &home);
    if cli.verbose {
        "debug".clone_into(&mut log_config.level);
    }
    if let Err(e) = garrison_telemetry::setup_logging(&log_config) {
        eprintln!("{}", Theme::warning(&format!("Failed to initialize logging: {e}")));
    }
    for file in &loaded.loaded_files {
        tracing::debug!(file = %file, "config file in use");
    }

    let store = StoreHandle::open(&cfg, &home)?;
    let outcome = match Console::open(store.kv(), ConsoleSettings::from_config(&cfg)).await {
        Ok(mut console) => run(cli.command, &mut console, &home, cli.format).await,
        Err(e) => Err(e.into()),
    };
    store.close().await?;

    if let Err(e) = outcome {
        eprintln!("{}", Theme::error(&format!("{e:#}")));
        std::process::exit(1);
    }
    Ok(())
}

async fn run(
    command: Commands,
    console: &mut Console,
    home: &GarrisonHome,
    format: OutputFormat,
) -> Result<()> {
    match command {
        Commands::Register {
            email,
            name,
            rank,
            command,
        } => account::register(console, &email, &name, rank, &command).await,
        Commands::Login { email } => account::login(console, &email).await,
        Commands::Logout => account::logout(console).await,
        Commands::Whoami => account::whoami(console, format),
        Commands::Views { view } => account::views(console, view),
        Commands::Dashboard => dashboard::show(console, format).await,
        Commands::Pending => review::pending(console, format).await,
        Commands::Approve {
            email,
            role,
            permissions,
        } => review::approve(console, &email, role, permissions).await,
        Commands::Reject { email } => review::reject(console, &email).await,
        Commands::Revoke { email } => review::revoke(console, &email).await,
        Commands::Users { search } => review::users(console, &search, format).await,
        Commands::Report { command } => handle_report(command, console, format).await,
        Commands::Audit { limit, action } => {
            audit::show(console, limit, action.as_deref(), format).await
        },
        Commands::Export { output } => backup::export(console, home, output.as_deref()).await,
    }
}

async fn handle_report(
    command: ReportCommands,
    console: &Console,
    format: OutputFormat,
) -> Result<()> {
    match command {
        ReportCommands::Create {
            report_type,
            subject,
            personnel,
            rank,
            command,
            description,
            attachments,
            investigator_notes,
            disciplinary_steps,
            final_disposition,
        } => {
            let args = reports::ReportArgs {
                report_type,
                subject,
                personnel,
                rank,
                command,
                description,
                attachments,
                investigator_notes,
                disciplinary_steps,
                final_disposition,
            };
            reports::create(console, args).await
        },
        ReportCommands::List { report_type } => reports::list(console, report_type, format).await,
    }
}
