//! Export command - owner-only JSON backup.

use std::path::{Path, PathBuf};

use anyhow::Context;
use garrison_console::{BackupSnapshot, Console};
use garrison_core::dirs::GarrisonHome;

use crate::theme::Theme;

/// Write a backup snapshot to `output`, or a timestamped file under the
/// home `backups/` directory.
pub(crate) async fn export(
    console: &Console,
    home: &GarrisonHome,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let snapshot = console.export_backup().await?;
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            home.ensure()
                .with_context(|| format!("creating {}", home.root().display()))?;
            default_path(home, &snapshot)
        },
    };

    std::fs::write(&path, snapshot.to_json()?)
        .with_context(|| format!("writing {}", path.display()))?;
    println!(
        "{}",
        Theme::success(&format!(
            "Exported {} users, {} reports, {} log entries to {}",
            snapshot.users.len(),
            snapshot.reports.len(),
            snapshot.logs.len(),
            path.display()
        ))
    );
    Ok(())
}

fn default_path(home: &GarrisonHome, snapshot: &BackupSnapshot) -> PathBuf {
    let stamp = snapshot.exported_at.0.format("%Y%m%dT%H%M%SZ");
    home.backups_dir().join(format!("garrison-backup-{stamp}.json"))
}
