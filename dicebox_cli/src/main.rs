use std::time::Duration;

use clap::{Parser, Subcommand};

use dicebox_core::{RollEngine, DEFAULT_MAX, DEFAULT_MIN};
use dicebox_shared::{RandomResponse, RollResponse, StatsResponse};
use dicebox_store::RollStore;

#[derive(Parser)]
#[command(name = "dicebox-cli", about = "Dice simulator front end")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Database URL, default sqlite://dicebox.db
    #[arg(long, value_parser, env = "DATABASE_URL")]
    database_url: Option<String>,
    /// Base URL of the dicebox API server
    #[arg(long, env = "DICEBOX_API_URL", default_value = "http://127.0.0.1:8080")]
    api_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a die locally, one or more times
    Roll {
        #[arg(default_value_t = 1)]
        times: i64,
    },
    /// Fetch a random number from the API, rolling locally when unreachable
    Random {
        #[arg(long, default_value_t = DEFAULT_MIN)]
        min: i64,
        #[arg(long, default_value_t = DEFAULT_MAX)]
        max: i64,
    },
    /// Roll N dice via the API, falling back to a local roll that is
    /// persisted to the database
    RollMany { count: i64 },
    /// Per-face totals across all recorded batches
    Stats,
    /// View last N recorded batches
    ViewLogs {
        #[arg(default_value_t = 20)]
        n: i64,
    },
    /// Export recorded batches to CSV path
    ExportCsv { path: String },
}

async fn open_store(url: Option<String>) -> anyhow::Result<RollStore> {
    let url = url.unwrap_or_else(|| "sqlite://dicebox.db?mode=rwc".into());
    let store = RollStore::connect(&url).await?;
    store.init().await?;
    Ok(store)
}

fn http_client() -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(3))
        .build()?;
    Ok(client)
}

async fn fetch_random(base: &str, min: i64, max: i64) -> anyhow::Result<i64> {
    let resp: RandomResponse = http_client()?
        .get(format!("{base}/random"))
        .query(&[("min", min), ("max", max)])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(resp.number)
}

async fn fetch_roll(base: &str, count: i64) -> anyhow::Result<RollResponse> {
    let resp = http_client()?
        .get(format!("{base}/roll/{count}"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(resp)
}

async fn fetch_stats(base: &str) -> anyhow::Result<StatsResponse> {
    let resp = http_client()?
        .get(format!("{base}/stats"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(resp)
}

fn print_tally(faces: impl Iterator<Item = (u8, u64)>, final_face: u8) {
    for (face, count) in faces {
        println!("{face}: {count}");
    }
    println!("final: {final_face}");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Roll { times } => {
            if times <= 0 {
                anyhow::bail!("count must be positive");
            }
            let mut engine = RollEngine::new();
            for _ in 0..times {
                println!("{}", engine.roll_one(DEFAULT_MIN, DEFAULT_MAX));
            }
            if times > 1 {
                println!("rolls performed: {}", engine.rolls_performed());
            }
        }
        Commands::Random { min, max } => {
            // try remote, else local; a network failure is never an error
            let number = match fetch_random(&cli.api_url, min, max).await {
                Ok(n) => n,
                Err(_) => RollEngine::new().roll_one(min, max),
            };
            println!("{number}");
        }
        Commands::RollMany { count } => {
            if count <= 0 {
                anyhow::bail!("count must be positive");
            }
            match fetch_roll(&cli.api_url, count).await {
                Ok(resp) => {
                    print_tally((1..=6).map(|f| (f, resp.face(f))), resp.final_face);
                }
                Err(_) => {
                    // the server is down: roll here and record the batch
                    // ourselves, as the server would have
                    let batch = RollEngine::new().roll_many(count)?;
                    let store = open_store(cli.database_url).await?;
                    store.append(&batch).await?;
                    print_tally(batch.faces.iter(), batch.faces.most_frequent());
                }
            }
        }
        Commands::Stats => {
            let totals: Vec<(u8, u64)> = match fetch_stats(&cli.api_url).await {
                Ok(resp) => (1..=6).map(|f| (f, resp.face(f))).collect(),
                Err(_) => {
                    let store = open_store(cli.database_url).await?;
                    store.totals().await?.iter().collect()
                }
            };
            for (face, total) in totals {
                println!("{face}: {total}");
            }
        }
        Commands::ViewLogs { n } => {
            let store = open_store(cli.database_url).await?;
            for row in store.recent(n).await? {
                println!(
                    "#{:>6} count={} faces={:?}",
                    row.id,
                    row.roll_count,
                    row.faces()
                );
            }
        }
        Commands::ExportCsv { path } => {
            let store = open_store(cli.database_url).await?;
            let rows = store.all().await?;
            let total = rows.len();
            let mut wtr = csv::Writer::from_path(&path)?;
            for row in &rows {
                let mut record = vec![row.id.to_string(), row.roll_count.to_string()];
                record.extend(row.faces().iter().map(|c| c.to_string()));
                wtr.write_record(&record)?;
            }
            wtr.flush()?;
            println!("Exported {} rows to {}", total, path);
        }
    }

    Ok(())
}
