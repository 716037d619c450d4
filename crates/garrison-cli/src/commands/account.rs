//! Account commands - register, login, logout, whoami, views.

use garrison_access::Registration;
use garrison_console::{Console, View};
use garrison_core::{Rank, User};

use crate::formatter::{OutputFormat, print_json};
use crate::theme::Theme;

/// File an access request.
pub(crate) async fn register(
    console: &Console,
    email: &str,
    name: &str,
    rank: Rank,
    command: &str,
) -> anyhow::Result<()> {
    let user = console
        .register(Registration::new(email, name, rank, command))
        .await?;
    println!(
        "{}",
        Theme::success(&format!("Access requested for {}", user.email))
    );
    println!(
        "{}",
        Theme::info("An administrator must approve the request before you can log in")
    );
    Ok(())
}

/// Log in and persist the session.
pub(crate) async fn login(console: &mut Console, email: &str) -> anyhow::Result<()> {
    let user = console.login(email).await?;
    println!(
        "{}",
        Theme::success(&format!(
            "Logged in as {} {} ({})",
            user.rank, user.display_name, user.role
        ))
    );
    Ok(())
}

/// End the session.
pub(crate) async fn logout(console: &mut Console) -> anyhow::Result<()> {
    match console.logout().await? {
        Some(user) => println!("{}", Theme::success(&format!("Logged out {}", user.email))),
        None => println!("{}", Theme::info("Not logged in")),
    }
    Ok(())
}

/// Show the session user (the profile view).
pub(crate) fn whoami(console: &Console, format: OutputFormat) -> anyhow::Result<()> {
    let user = console.whoami()?;
    if format == OutputFormat::Json {
        return print_json(user);
    }
    print_profile(user);
    Ok(())
}

/// List the views the session user may open, or resolve one.
pub(crate) fn views(console: &Console, requested: Option<View>) -> anyhow::Result<()> {
    if let Some(requested) = requested {
        let shown = console.route(requested)?;
        if shown == requested {
            println!("{}", Theme::success(&format!("Opening {shown}")));
        } else {
            println!(
                "{}",
                Theme::warning(&format!("{requested} is not available; showing {shown}"))
            );
        }
        return Ok(());
    }

    println!("\n{}", Theme::header("Views"));
    println!("{}", Theme::separator());
    for view in console.views()? {
        println!("  {view}");
    }
    println!();
    Ok(())
}

fn print_profile(user: &User) {
    println!("\n{}", Theme::header("Profile"));
    println!("{}", Theme::separator());
    println!("{}", Theme::kv("Name", &format!("{} {}", user.rank, user.display_name)));
    println!("{}", Theme::kv("Email", &user.email));
    println!("{}", Theme::kv("Command", &user.command));
    println!("{}", Theme::kv("Role", user.role.as_str()));
    println!("{}", Theme::kv("Status", &Theme::status(user.status)));
    let granted = user.effective_permissions();
    let permissions = if granted.is_empty() {
        Theme::dimmed("none")
    } else {
        granted
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("{}", Theme::kv("Permissions", &permissions));
    println!("{}", Theme::kv("Member since", &Theme::timestamp(&user.created_at)));
    println!();
}
