use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use gre_application::CustomerBrowser;
use gre_core::api::{CustomerQuery, DashboardApi};
use gre_core::customer::{Customer, CustomerPatch};
use gre_core::export::{ExportFile, ExportKind};
use gre_core::format::format_budget;
use gre_core::route::Route;
use serde_json::Value;

use crate::ListArgs;
use crate::bootstrap::AppContext;

fn server_query(args: &ListArgs) -> CustomerQuery {
    match (&args.date, &args.sales_person) {
        (Some(date), _) => CustomerQuery::ByDate(*date),
        (None, Some(name)) => CustomerQuery::BySalesPerson(name.clone()),
        (None, None) => CustomerQuery::All,
    }
}

/// Loads the server-side slice and applies the local filters from `args`.
async fn browse(ctx: &AppContext, args: &ListArgs) -> Result<CustomerBrowser> {
    let browser = CustomerBrowser::new(ctx.dashboard.clone(), ctx.session.clone(), &ctx.config);
    browser.load(&server_query(args)).await?;

    browser.set_period(args.period);
    browser.set_month(args.month.clone());
    if let Some(page_size) = args.page_size {
        browser.set_page_size(page_size);
    }
    if let Some(search) = &args.search {
        browser.search_now(search.clone());
    }
    browser.set_page(args.page);
    Ok(browser)
}

fn print_row(customer: &Customer, ctx: &AppContext) {
    let offset = ctx.config.timezone();
    let created = customer
        .created_at_in(offset)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = if customer.is_active {
        customer.status_label().green()
    } else {
        customer.status_label().dimmed()
    };

    println!(
        "{:<24} {:<14} {:<20} {:>10}  {:<8} {}",
        customer.name.bold(),
        customer.phone,
        customer.sales_person.as_deref().unwrap_or("-"),
        format_budget(customer.effective_budget()),
        status,
        created,
    );
}

pub async fn list(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    ctx.require_user()?;
    let browser = browse(ctx, args).await?;
    let page = browser.current_page();

    if page.items.is_empty() {
        println!("{}", "No customers match the current filters.".yellow());
        return Ok(());
    }

    for customer in &page.items {
        print_row(customer, ctx);
    }
    println!(
        "\n{}",
        format!(
            "Showing {}-{} of {} (page {}/{}, {} loaded)",
            page.first_index(),
            page.last_index(),
            page.total_items,
            page.page,
            page.total_pages,
            browser.total_loaded()
        )
        .dimmed()
    );
    Ok(())
}

pub async fn show(ctx: &AppContext, phone: &str) -> Result<()> {
    ctx.require_user()?;
    let token = ctx.session.token();
    let customers = ctx
        .dashboard
        .fetch_customers(token.as_deref(), &CustomerQuery::ByPhone(phone.to_string()))
        .await?;
    let Some(customer) = customers.into_iter().next() else {
        bail!("No customer found with phone {}", phone);
    };

    let offset = ctx.config.timezone();
    println!("{} ({})", customer.name.bold(), customer.display_id());
    println!("  phone:          {}", customer.phone);
    println!("  email:          {}", customer.email);
    println!(
        "  sales person:   {}",
        customer.sales_person.as_deref().unwrap_or("-")
    );
    println!("  budget:         {}", format_budget(customer.effective_budget()));
    println!("  status:         {}", customer.status_label());
    if let Some(visit) = customer.most_recent_visit(offset) {
        println!("  last visit:     {}", visit);
    }
    if let Some(partner) = customer.channel_partner_name() {
        println!("  channel partner: {}", partner);
    }
    let remarks = customer.combined_remarks();
    if !remarks.is_empty() {
        println!("  remarks:        {}", remarks);
    }
    if let Some(route) = Route::customer_detail(customer.sales_person.as_deref(), &customer.phone) {
        println!("  {}", route.path().dimmed());
    }
    Ok(())
}

/// `FIELD=VALUE`; the value is JSON when it parses, a string otherwise.
fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    let (field, value) = raw
        .split_once('=')
        .with_context(|| format!("Expected FIELD=VALUE, got '{}'", raw))?;
    let field = field.trim();
    if field.is_empty() {
        bail!("Empty field name in '{}'", raw);
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((field.to_string(), value))
}

pub async fn update(ctx: &AppContext, id: &str, fields: &[String]) -> Result<()> {
    ctx.require_user()?;
    let mut patch = CustomerPatch::new();
    for raw in fields {
        let (field, value) = parse_assignment(raw)?;
        patch = patch.set(field, value);
    }

    let browser = CustomerBrowser::new(ctx.dashboard.clone(), ctx.session.clone(), &ctx.config);
    let updated = browser.update_customer(id, &patch).await?;
    println!(
        "{}",
        format!("Updated {} ({} field(s))", updated.name, patch.fields().len()).green()
    );
    Ok(())
}

pub async fn export(
    ctx: &AppContext,
    args: &ListArgs,
    gre: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    ctx.require_user()?;
    let browser = browse(ctx, args).await?;
    let kind = if gre { ExportKind::Gre } else { ExportKind::Full };
    let export = browser.export(kind)?;

    let dir = output.unwrap_or_else(|| PathBuf::from("."));
    let path = write_export(&dir, &export)?;

    println!(
        "{}",
        format!("Exported {} row(s) to {}", export.rows.len(), path.display()).green()
    );
    Ok(())
}

fn write_export(dir: &Path, export: &ExportFile) -> Result<PathBuf> {
    let path = dir.join(&export.file_name);
    std::fs::write(&path, export.to_csv()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use gre_core::export::{ExportOptions, build_export};
    use gre_core::time::ist;
    use tempfile::TempDir;

    #[test]
    fn test_parse_assignment_prefers_json() {
        let (field, value) = parse_assignment("budget=2500000").unwrap();
        assert_eq!(field, "budget");
        assert_eq!(value, Value::from(2500000));

        let (_, value) = parse_assignment("name=Asha Patil").unwrap();
        assert_eq!(value, Value::String("Asha Patil".into()));

        let (_, value) = parse_assignment("remark=a=b").unwrap();
        assert_eq!(value, Value::String("a=b".into()));
    }

    #[test]
    fn test_parse_assignment_rejects_bad_input() {
        assert!(parse_assignment("no-equals").is_err());
        assert!(parse_assignment("=value").is_err());
    }

    #[test]
    fn test_written_export_reads_back_as_table() {
        let temp_dir = TempDir::new().unwrap();
        let customers = vec![
            Customer {
                name: "Asha".into(),
                phone: "9876543210".into(),
                ..Default::default()
            },
            Customer {
                name: "Vikram".into(),
                phone: "9123456780".into(),
                ..Default::default()
            },
        ];
        let now = ist().with_ymd_and_hms(2024, 3, 15, 9, 5, 7).unwrap();
        let export = build_export(ExportKind::Gre, &customers, &ExportOptions::default(), now).unwrap();

        let path = write_export(temp_dir.path(), &export).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "gre_customers_2024-03-15_09-05-07.csv"
        );

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.headers().unwrap().len(), 11);
        assert_eq!(&reader.headers().unwrap()[0], "Client Name");
        let names: Vec<String> = reader
            .records()
            .map(|r| r.unwrap()[0].to_string())
            .collect();
        assert_eq!(names, vec!["Asha", "Vikram"]);
    }
}
