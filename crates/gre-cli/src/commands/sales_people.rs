use anyhow::Result;
use colored::Colorize;
use gre_core::api::DashboardApi;
use gre_core::filter::search;

use crate::bootstrap::AppContext;

pub async fn list(ctx: &AppContext, term: Option<&str>) -> Result<()> {
    ctx.require_user()?;
    let token = ctx.session.token();
    let people = ctx.dashboard.fetch_sales_people(token.as_deref()).await?;
    let people = search(&people, term.unwrap_or_default());

    if people.is_empty() {
        println!("{}", "No sales people found.".yellow());
        return Ok(());
    }

    for person in &people {
        println!(
            "{:<24} {:<28} {:<14} {}",
            person.name.bold(),
            person.email.as_deref().unwrap_or("-"),
            person.phone.as_deref().unwrap_or("-"),
            person.route().path().dimmed(),
        );
    }
    println!("\n{}", format!("{} sales people", people.len()).dimmed());
    Ok(())
}
