//! bandstore-seed - reset the store and load sample bands
//!
//! Inputs go through the same validator as HTTP requests, so padded values
//! are trimmed before they are stored.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bandstore_common::config::{ConfigOverrides, ServerConfig};
use bandstore_common::db::{albums, bands, init_database};
use bandstore_common::Validator;
use clap::Parser;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "bandstore-seed")]
#[command(about = "Drop all bands and load the sample data set")]
#[command(version)]
struct Args {
    /// SQLite database file
    #[arg(short, long, env = "BANDSTORE_DATABASE")]
    database: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "BANDSTORE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let overrides = ConfigOverrides {
        database_path: args.database,
        ..ConfigOverrides::default()
    };
    let config = ServerConfig::load(args.config, overrides)
        .context("Failed to load configuration")?;

    info!("Seeding {}", config.database_path.display());
    let pool = init_database(&config.database_path)
        .await
        .context("Failed to initialize database")?;

    let removed = bands::clear_bands(&pool).await?;
    info!("Removed {} existing band(s)", removed);

    seed(&pool).await?;

    pool.close().await;
    info!("Done");
    Ok(())
}

async fn seed(pool: &SqlitePool) -> Result<()> {
    let validator = Validator::new();

    let blackpink = add_band(
        pool,
        &validator,
        json!({
            "name": "    Blackpink     ",
            "genre": ["Rock    ", "kPop"],
            "website": "    http://www.blackpink.com  ",
            "recordCompany": "    YG Entertainment    ",
            "groupMembers": ["      Jennie Kim   ", "     Lalisa Manobal  ", "    Jisoo kim   ", "  Rose  "],
            "yearBandWasFormed": 2016
        }),
    )
    .await?;

    add_album(
        pool,
        &validator,
        blackpink,
        json!({
            "title": "    The Album ",
            "releaseDate": "   09/12/1975  ",
            "tracks": [
                "        Shine On You Crazy Diamond, Pts. 1-5   ",
                "    Welcome to the Machine   ",
                "       Have a Cigar (Ft. Roy Harper)    ",
                "      Wish You Were Here   ",
                "      Shine On You Crazy Diamond, Pts. 6-9    "
            ],
            "rating": 2
        }),
    )
    .await?;

    add_album(
        pool,
        &validator,
        blackpink,
        json!({
            "title": "DuDUDUdu",
            "releaseDate": "09/12/2023",
            "tracks": ["Pink venom", "shutdown", "Tally", "Typa Girl"],
            "rating": 5
        }),
    )
    .await?;

    add_band(
        pool,
        &validator,
        json!({
            "name": "Chase Atlantic",
            "genre": ["Alternative", "Indie"],
            "website": "http://www.chaseatlantic.com",
            "recordCompany": "Warner Bros",
            "groupMembers": ["Mitchel Cave", "Clinton Cave", "Christian Anthony"],
            "yearBandWasFormed": 2011
        }),
    )
    .await?;

    add_band(
        pool,
        &validator,
        json!({
            "name": "Arctic Monkey",
            "genre": ["Rock", "Indie"],
            "website": "http://www.arcticmonkey.com",
            "recordCompany": "Warner Bros",
            "groupMembers": ["Alex Turner", "Matt Helders", "Jamie Cook", "Nick O'Malley"],
            "yearBandWasFormed": 2002
        }),
    )
    .await?;

    Ok(())
}

async fn add_band(pool: &SqlitePool, validator: &Validator, input: serde_json::Value) -> Result<Uuid> {
    let fields = validator.band(&input).context("Invalid sample band")?;
    let band = bands::create_band(pool, fields).await?;
    info!("Created band {} ({})", band.fields.name, band.id);
    Ok(band.id)
}

async fn add_album(
    pool: &SqlitePool,
    validator: &Validator,
    band_id: Uuid,
    input: serde_json::Value,
) -> Result<()> {
    let fields = validator.album(&input).context("Invalid sample album")?;
    let band = albums::create_album(pool, band_id, fields).await?;
    info!(
        "Band {} now has {} album(s), rating {}",
        band.fields.name,
        band.albums.len(),
        band.overall_rating
    );
    Ok(())
}
