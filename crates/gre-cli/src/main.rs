use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use gre_core::filter::FilterPeriod;
use gre_infrastructure::GrePaths;

mod bootstrap;
mod commands;
mod logging;

use bootstrap::AppContext;

#[derive(Parser)]
#[command(name = "gre")]
#[command(about = "GRE Dashboard CLI - customer leads, sales people and live sessions", long_about = None)]
struct Cli {
    /// Only log errors
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        email: String,
        /// Prompted for without echo when omitted
        #[arg(long)]
        password: Option<String>,
        /// Keep the email for the next login
        #[arg(long)]
        remember: bool,
    },
    /// Forget the persisted session
    Logout,
    /// Show the logged-in identity
    Whoami,
    /// List customers with date, search and page filters
    Customers(ListArgs),
    /// Show one customer by phone number
    Customer { phone: String },
    /// Send a partial update for one customer
    UpdateCustomer {
        id: String,
        /// Field assignment; the value is parsed as JSON when possible
        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        fields: Vec<String>,
    },
    /// List the project's sales people
    SalesPeople {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show active sales sessions
    Sessions {
        /// Keep refreshing until Ctrl-C
        #[arg(long)]
        watch: bool,
        #[arg(long)]
        search: Option<String>,
    },
    /// Export the filtered customer list as a CSV spreadsheet
    Export {
        #[command(flatten)]
        list: ListArgs,
        /// Masked GRE-desk columns instead of the full record
        #[arg(long)]
        gre: bool,
        /// Directory to write into (defaults to the current directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Server-side: customers created on this date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "sales_person")]
    date: Option<NaiveDate>,
    /// Server-side: customers of one sales person
    #[arg(long)]
    sales_person: Option<String>,
    /// all, today, week, month or specific-month
    #[arg(long, default_value = "all")]
    period: FilterPeriod,
    /// Month for `--period specific-month` (YYYY-MM)
    #[arg(long)]
    month: Option<String>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long)]
    page_size: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = GrePaths::resolve()?;
    std::fs::create_dir_all(paths.logs_dir())
        .with_context(|| format!("Failed to create {}", paths.logs_dir().display()))?;
    let _log_guard = logging::init_logging(&paths.logs_dir(), cli.quiet);

    let ctx = AppContext::bootstrap(paths)?;

    match cli.command {
        Commands::Login {
            email,
            password,
            remember,
        } => commands::auth::login(&ctx, email, password, remember).await?,
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx)?,
        Commands::Customers(args) => commands::customers::list(&ctx, &args).await?,
        Commands::Customer { phone } => commands::customers::show(&ctx, &phone).await?,
        Commands::UpdateCustomer { id, fields } => {
            commands::customers::update(&ctx, &id, &fields).await?
        }
        Commands::SalesPeople { search } => {
            commands::sales_people::list(&ctx, search.as_deref()).await?
        }
        Commands::Sessions { watch, search } => {
            commands::sessions::run(&ctx, watch, search.unwrap_or_default()).await?
        }
        Commands::Export { list, gre, output } => {
            commands::customers::export(&ctx, &list, gre, output).await?
        }
    }

    Ok(())
}
