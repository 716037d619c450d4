//! Review commands - pending, approve, reject, revoke, users.

use std::collections::BTreeSet;

use colored::Colorize;
use garrison_console::Console;
use garrison_core::{Permission, Role, User};

use crate::formatter::{OutputFormat, print_json};
use crate::theme::Theme;

/// List pending access requests.
pub(crate) async fn pending(console: &Console, format: OutputFormat) -> anyhow::Result<()> {
    let users = console.pending().await?;
    if format == OutputFormat::Json {
        return print_json(&users);
    }
    if users.is_empty() {
        println!("{}", Theme::info("No pending access requests"));
        return Ok(());
    }

    println!("\n{}", Theme::header("Pending Approvals"));
    print_users(&users);
    Ok(())
}

/// Approve a pending request.
pub(crate) async fn approve(
    console: &Console,
    email: &str,
    role: Role,
    permissions: Vec<Permission>,
) -> anyhow::Result<()> {
    let target = console.user_by_email(email).await?;
    let permissions: BTreeSet<Permission> = permissions.into_iter().collect();
    let user = console.approve(&target.id, role, permissions).await?;
    println!(
        "{}",
        Theme::success(&format!("Approved {} as {}", user.email, user.role))
    );
    Ok(())
}

/// Reject a pending request.
pub(crate) async fn reject(console: &Console, email: &str) -> anyhow::Result<()> {
    let target = console.user_by_email(email).await?;
    let user = console.reject(&target.id).await?;
    println!(
        "{}",
        Theme::success(&format!("Rejected access request from {}", user.email))
    );
    Ok(())
}

/// Revoke an approved member.
pub(crate) async fn revoke(console: &Console, email: &str) -> anyhow::Result<()> {
    let target = console.user_by_email(email).await?;
    let user = console.revoke(&target.id).await?;
    println!(
        "{}",
        Theme::success(&format!("Revoked access for {}", user.email))
    );
    Ok(())
}

/// List reviewed members, optionally filtered.
pub(crate) async fn users(
    console: &Console,
    search: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let users = console.members(search).await?;
    if format == OutputFormat::Json {
        return print_json(&users);
    }
    if users.is_empty() {
        println!("{}", Theme::info("No matching members"));
        return Ok(());
    }

    println!("\n{}", Theme::header("Members"));
    print_users(&users);
    Ok(())
}

fn print_users(users: &[User]) {
    println!(
        "{:<28} {:<24} {:<10} {:<10} {}",
        "EMAIL".dimmed(),
        "NAME".dimmed(),
        "COMMAND".dimmed(),
        "ROLE".dimmed(),
        "STATUS".dimmed()
    );
    println!("{}", Theme::separator());
    for user in users {
        println!(
            "{:<28} {:<24} {:<10} {:<10} {}",
            user.email,
            format!("{} {}", user.rank, user.display_name),
            user.command,
            user.role.as_str(),
            Theme::status(user.status)
        );
    }
    println!();
}
