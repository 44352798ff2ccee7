use std::io;

use anyhow::{Context, Result};
use colored::Colorize;
use gre_application::AuthUseCase;
use gre_core::auth::{ClientContext, LoginRequest};

use crate::bootstrap::AppContext;

/// The `--password` flag when given, otherwise whatever `prompt` reads.
fn resolve_password(
    flag: Option<String>,
    prompt: impl FnOnce() -> io::Result<String>,
) -> Result<String> {
    match flag {
        Some(password) => Ok(password),
        None => prompt().context("Failed to read password"),
    }
}

fn auth_usecase(ctx: &AppContext) -> AuthUseCase {
    AuthUseCase::new(ctx.login.clone(), ctx.session.clone(), &ctx.config)
}

pub async fn login(
    ctx: &AppContext,
    email: String,
    password: Option<String>,
    remember: bool,
) -> Result<()> {
    let password = resolve_password(password, || rpassword::prompt_password("Password: "))?;
    let request = LoginRequest {
        email,
        password,
        remember_me: remember,
    };
    let client = ClientContext {
        user_agent: format!("gre-cli/{}", env!("CARGO_PKG_VERSION")),
        ..ClientContext::default()
    };

    let user = auth_usecase(ctx).login(&request, &client).await?;
    println!(
        "{}",
        format!("Logged in as {} <{}>", user.full_name, user.email).green()
    );
    Ok(())
}

pub fn logout(ctx: &AppContext) {
    let route = auth_usecase(ctx).logout();
    println!("{}", "Logged out".yellow());
    tracing::debug!(route = %route, "Redirect after logout");
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    let user = ctx.require_user()?;
    println!("{}", user.full_name.bold());
    println!("  email:    {}", user.email);
    println!("  user id:  {}", user.user_id);
    if ctx.session.is_sales_manager() {
        println!("  role:     {}", "sales manager".cyan());
    }
    println!("  storage:  {}", ctx.paths.storage_file().display());
    if let Some(email) = auth_usecase(ctx).remembered_email() {
        println!("  remembered email: {}", email);
    }
    Ok(())
}
