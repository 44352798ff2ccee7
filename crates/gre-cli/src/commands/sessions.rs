use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use gre_application::ActiveSessionPoller;
use gre_core::polling::{PollSnapshot, RefreshPolicy};
use gre_core::session::{format_session_duration, format_start_time};

use crate::bootstrap::AppContext;

fn render(snapshot: &PollSnapshot) {
    if let Some(error) = &snapshot.error {
        let banner = if snapshot.online {
            error.red()
        } else {
            error.yellow()
        };
        println!("{}", banner);
    }

    let now = Utc::now();
    for session in &snapshot.filtered {
        println!(
            "{:<22} {:<22} {:<32} {}",
            session.sales_person_name.bold(),
            session.customer_name,
            format_start_time(session.start_time.as_deref()),
            format_session_duration(session.start_time.as_deref(), now).cyan(),
        );
    }

    let updated = snapshot
        .last_updated
        .map(|at| at.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    println!(
        "{}",
        format!(
            "{} of {} active session(s), updated {}, next refresh in {}s",
            snapshot.filtered.len(),
            snapshot.sessions.len(),
            updated,
            snapshot.countdown_secs
        )
        .dimmed()
    );
}

pub async fn run(ctx: &AppContext, watch: bool, search: String) -> Result<()> {
    ctx.require_user()?;
    let poller = ActiveSessionPoller::new(
        ctx.dashboard.clone(),
        ctx.session.clone(),
        RefreshPolicy::from(&ctx.config.polling),
    );
    poller.set_search_term(search);
    poller.start().await;

    let snapshot = poller.snapshot();
    render(&snapshot);
    if !watch {
        poller.stop();
        if let Some(error) = snapshot.error {
            anyhow::bail!(error);
        }
        return Ok(());
    }

    let mut updates = poller.subscribe();
    let mut rendered_at = snapshot.last_updated;
    let mut rendered_error = snapshot.error;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("{}", "Stopping.".yellow());
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                // Countdown ticks alone do not warrant a redraw.
                if snapshot.last_updated != rendered_at || snapshot.error != rendered_error {
                    println!();
                    render(&snapshot);
                    rendered_at = snapshot.last_updated;
                    rendered_error = snapshot.error;
                }
            }
        }
    }

    poller.stop();
    Ok(())
}
