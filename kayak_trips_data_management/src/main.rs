use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use kayak_trips_data_management::{config::DataConfig, DataManager, DataManagerError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI for manual data operations on the kayak trip store
#[derive(Parser, Debug)]
#[command(name = "kayak-trips", version)]
struct Cli {
    /// Database file, overriding configuration
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the schema and store the demonstration trip if the store is empty
    Init,
    /// List all trips
    List,
    /// Show the waypoints of a trip, or its render model as JSON
    Show {
        trip_id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Create a trip from a JSON descriptor file
    Add { file: PathBuf },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kayak_trips_data_management=info,kayak_trips=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("kayak-trips: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), DataManagerError> {
    let mut config = DataConfig::load()?.database;
    if let Some(path) = cli.database {
        config.path = path;
    }

    let data_manager = DataManager::start(&config).await?;
    let result = execute(&data_manager, cli.command).await;
    data_manager.close().await;
    result
}

async fn execute(data_manager: &DataManager, command: Command) -> Result<(), DataManagerError> {
    match command {
        Command::Init => match data_manager.seed_if_empty().await? {
            Some(trip_id) => println!("Seeded demonstration trip {trip_id}"),
            None => println!("Store already has trips, nothing to seed"),
        },
        Command::List => {
            for trip in data_manager.get_trips().await? {
                println!("{:>4}  {}  {}", trip.trip_id, trip.name, trip.description.unwrap_or_default());
            }
        }
        Command::Show { trip_id, json } => {
            if json {
                let model = data_manager.get_render_model(trip_id).await?;
                println!("{}", serde_json::to_string_pretty(&model)?);
            } else {
                let trip = data_manager.get_trip(trip_id).await?;
                println!("{}", trip.name);
                for row in data_manager.get_waypoint_summary(trip_id).await? {
                    println!("  {:<60} {:>9} {:>10}", row.waypoint, row.latitude, row.longitude);
                }
            }
        }
        Command::Add { file } => {
            let json = tokio::fs::read_to_string(&file).await.map_err(|source| DataManagerError::Io {
                context: format!("Failed to read {}", file.display()),
                source,
            })?;
            let trip_id = data_manager.create_trip_from_json(&json).await?;
            println!("Created trip {trip_id}");
        }
    }

    Ok(())
}
