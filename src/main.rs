mod config;
mod dashboard;
mod filter;
mod paginate;
mod parser;
mod record;
mod render;
mod source;

use std::time::Instant;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use config::Settings;
use dashboard::Summary;
use filter::Query;
use record::ApiRecord;

#[derive(Parser)]
#[command(name = "apis", version, about = "Browse a catalog of public APIs")]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Paged list of APIs, optionally searched and filtered
    List {
        /// Page number (1-based; anything below 1 reads as 1)
        #[arg(short, long, allow_hyphen_values = true)]
        page: Option<String>,
        /// Case-insensitive match on name, description or category
        #[arg(short, long)]
        search: Option<String>,
        /// Exact category (markdown source only)
        #[arg(short, long)]
        category: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Details for one API, by id (`category/name`) or exact name
    Show {
        key: String,
        #[arg(long)]
        json: bool,
    },
    /// Summary counts and breakdowns
    Dashboard {
        #[arg(short, long)]
        search: Option<String>,
        /// Exact category (markdown source only)
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Distinct categories, sorted
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let raw = source::load(&cli.settings).await?;
    let all = parser::normalize(&raw)?;
    info!(
        "Loaded {} APIs in {:.2}s",
        all.len(),
        t0.elapsed().as_secs_f64()
    );

    match cli.command {
        Commands::List {
            page,
            search,
            category,
            json,
        } => {
            let query = Query {
                search,
                category: filter::effective_category(cli.settings.source, category),
            };
            let filtered = filter::apply(&all, &query);
            let current = filter::clamp_page(page.as_deref());
            let result = paginate::paginate(&filtered, current, cli.settings.page_size);

            if json {
                print_json(&ListOutput {
                    page: &result,
                    window: paginate::page_window(current, result.total_pages),
                })?;
            } else {
                println!("{}", render::list(&result));
            }
            Ok(())
        }
        Commands::Show { key, json } => {
            let api = filter::find(&all, &key).ok_or_else(|| anyhow!("No API found: {}", key))?;
            if json {
                print_json(api)?;
            } else {
                println!("{}", render::details(api));
            }
            Ok(())
        }
        Commands::Dashboard {
            search,
            category,
            json,
        } => {
            let query = Query {
                search,
                category: filter::effective_category(cli.settings.source, category),
            };
            let summary = Summary::from_records(&filter::apply(&all, &query));
            if json {
                print_json(&summary)?;
            } else {
                println!("{}", render::dashboard(&summary));
            }
            Ok(())
        }
        Commands::Categories => {
            let categories = filter::categories(&all);
            if categories.is_empty() {
                println!("No categories found.");
            }
            for category in categories {
                println!("{}", category);
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct ListOutput<'a> {
    #[serde(flatten)]
    page: &'a paginate::PageResult<ApiRecord>,
    window: Vec<paginate::PageSlot>,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
