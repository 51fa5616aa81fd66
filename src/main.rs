use anyhow::Context;
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{error, info};

use ncaab_stats::config::Config;
use ncaab_stats::logging;
use ncaab_stats::{Sources, Teams};

#[derive(Parser)]
#[command(name = "ncaab_stats")]
#[command(about = "NCAA men's basketball season team statistics")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every team of a season and export it as JSON
    Teams {
        /// Season, named after the year it ends in. Defaults to the current season
        #[arg(long)]
        season: Option<u16>,
        /// Only export this team (abbreviation, e.g. PURDUE)
        #[arg(long)]
        team: Option<String>,
        /// Write the export here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the team to conference mapping for a season
    Conferences {
        #[arg(long)]
        season: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    logging::init_logging(&config.logging);

    let sources = Sources::from_config(&config)?;

    match cli.command {
        Commands::Teams {
            season,
            team,
            output,
        } => {
            let teams = match Teams::new(season, &sources).await {
                Ok(teams) => teams,
                Err(e) => {
                    error!("Season build failed: {}", e);
                    return Err(e.into());
                }
            };

            let frame = match team {
                Some(abbreviation) => teams.get(&abbreviation)?.dataframe()?,
                None => teams.dataframes()?,
            };
            let json = frame.to_json()?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(rows = frame.len(), path = %path.display(), "Export written");
                }
                None => println!("{json}"),
            }
        }
        Commands::Conferences { season } => {
            let season = ncaab_stats::season::resolve_season(
                season,
                sources.clock.as_ref(),
                sources.fetcher.as_ref(),
                &sources.urls,
            )
            .await;
            let teams = sources.conferences.team_conference(season).await?;
            let sorted: BTreeMap<_, _> = teams.into_iter().collect();
            println!("{}", serde_json::to_string_pretty(&sorted)?);
        }
    }
    Ok(())
}
