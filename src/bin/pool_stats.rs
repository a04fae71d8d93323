use anyhow::{Context, Result};
use reqwest::Client;
use std::collections::BTreeSet;
use tracing::info;

use warmpool::{
    candidates::{build_counts, Facet},
    config::Config,
    logging,
    sheet::{GvizSource, RowSource},
};

fn label(f: &Facet) -> &str {
    match f {
        Facet::Any => "(any)",
        Facet::Is(v) if v.is_empty() => "(blank)",
        Facet::Is(v) => v.as_str(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = Config::from_env()?;
    let source = GvizSource::new(Client::new(), &config.sheet)?;
    let rows = source
        .fetch_rows()
        .await
        .context("fetching pool from sheet")?;
    let counts = build_counts(&rows);
    info!(rows = rows.len(), eligible = counts.total(), "pool loaded");

    let seniorities: BTreeSet<&Facet> = counts.iter().map(|(_, s, _)| s).collect();
    let techs: BTreeSet<&Facet> = counts.iter().map(|(t, _, _)| t).collect();

    print!("{:<20}", "tech \\ seniority");
    for s in &seniorities {
        print!("{:>12}", label(s));
    }
    println!();
    for t in &techs {
        print!("{:<20}", label(t));
        for s in &seniorities {
            print!("{:>12}", counts.get(t, s));
        }
        println!();
    }
    println!("eligible candidates: {}", counts.total());

    Ok(())
}
