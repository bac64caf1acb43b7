//! Resolve directory queries from the command line.
//!
//! With a QUERY argument it resolves once and prints the result. Without one
//! it reads queries from stdin, one per line. A newer line supersedes an
//! older one that is still resolving, the same way a search box does.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use company_search::{apply_filter, CompanyRecord, Resolution, Resolver, SearchSession};
use server_core::companies::load_companies;
use server_core::server::build_resolver;
use server_core::Config;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "search_cli")]
#[command(about = "Resolve natural-language company queries")]
struct Cli {
    /// Raw company directory JSON
    #[arg(long, default_value = "companies.json")]
    companies: String,

    /// Skip the model and use the heuristic matcher only
    #[arg(long)]
    offline: bool,

    /// Print the filter as JSON only
    #[arg(long)]
    json: bool,

    /// Query to resolve; reads stdin when omitted
    query: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,company_search=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let resolver = if cli.offline {
        Resolver::heuristic_only().with_config(config.resolver_config())
    } else {
        build_resolver(&config)
    };
    let companies = Arc::new(load_companies(&cli.companies)?);

    match cli.query {
        Some(query) => {
            let resolution = resolver.resolve(&query, &companies).await;
            print_resolution(&query, &resolution, &companies, cli.json)?;
        }
        None => run_interactive(resolver, companies, cli.json).await?,
    }

    Ok(())
}

async fn run_interactive(resolver: Resolver, companies: Arc<Vec<CompanyRecord>>, json: bool) -> Result<()> {
    let session = Arc::new(SearchSession::new(resolver, companies));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending = JoinSet::new();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let query = line.trim().to_string();
        if query == ":clear" {
            session.clear();
            println!("(cleared, {} companies visible)", session.visible().len());
            continue;
        }

        let session = session.clone();
        pending.spawn(async move {
            if let Some(resolution) = session.submit(&query).await {
                print_resolution(&query, &resolution, session.companies(), json)?;
            }
            Ok::<_, anyhow::Error>(())
        });
    }

    while let Some(result) = pending.join_next().await {
        result.context("Query task panicked")??;
    }
    Ok(())
}

fn print_resolution(
    query: &str,
    resolution: &Resolution,
    companies: &[CompanyRecord],
    json: bool,
) -> Result<()> {
    let filter_json = serde_json::to_string_pretty(&resolution.filter)?;
    if json {
        println!("{}", filter_json);
        return Ok(());
    }

    let visible = apply_filter(&resolution.filter, companies);
    println!("query:  {}", query);
    match resolution.via.fallback_cause() {
        Some(cause) => println!("via:    {} ({})", resolution.via.label(), cause.kind()),
        None => println!("via:    {}", resolution.via.label()),
    }
    println!("filter: {}", filter_json);
    println!("{} of {} companies:", visible.len(), companies.len());
    for company in &visible {
        println!("  - {}", company.name);
    }
    Ok(())
}
