// src/main.rs
//
// mangashelf - command line entry point

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use mangashelf::application::{AppState, CatalogSource, ErrorResponse};
use mangashelf::db::{get_connection, get_database_stats, verify_database_integrity};
use mangashelf::domain::WishlistEntry;
use mangashelf::services::DEFAULT_GRID_VOLUMES;
use mangashelf::{AppConfig, AppError, AppResult, CatalogManga, Series};

/// Command-line arguments for mangashelf
#[derive(Parser, Debug)]
#[command(name = "mangashelf")]
#[command(about = "Track a physical manga collection, volume by volume")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "MANGASHELF_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search a series catalog
    Search {
        query: String,
        #[arg(long, value_enum, default_value_t = Source::Jikan)]
        source: Source,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// Add the best catalog match for a query to the library
    Add {
        query: String,
        #[arg(long, value_enum, default_value_t = Source::Jikan)]
        source: Source,
    },

    /// Look up a book by ISBN and record it as owned
    Scan { isbn: String },

    /// List series in the library, newest first
    List,

    /// Show one series with its volume grid
    Show { id: i64 },

    /// Mark a volume as owned (or not, with --unset)
    Own {
        id: i64,
        volume: u32,
        #[arg(long)]
        unset: bool,
    },

    /// Mark every volume of a series as owned (or not, with --unset)
    OwnAll {
        id: i64,
        #[arg(long)]
        unset: bool,
    },

    /// Set the total number of volumes of a series
    SetTotal { id: i64, count: u32 },

    /// Refresh volume count and description from the catalogs
    Refresh { id: i64 },

    /// List per-volume covers for a series
    Covers { id: i64 },

    /// Delete a series and its volumes
    Delete { id: i64 },

    /// Library statistics
    Stats,

    /// Missing volumes of every series with a known total
    Wishlist,

    /// Check the library database and print its size
    Doctor,

    /// Resolve the volume count of any title without touching the library
    Resolve {
        title: String,
        /// Count reported by a structured catalog, if any
        #[arg(long, allow_hyphen_values = true)]
        authoritative: Option<i32>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Source {
    Jikan,
    Mangadex,
}

impl From<Source> for CatalogSource {
    fn from(source: Source) -> Self {
        match source {
            Source::Jikan => CatalogSource::Jikan,
            Source::Mangadex => CatalogSource::MangaDex,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        config.log_level.into()
    };
    let mut clog = colog::default_builder();
    clog.filter(None, level);
    clog.init();

    let state = AppState::initialize(&config).context("Failed to open the library")?;
    info!("Library ready");

    if let Err(error) = run(&state, cli.command).await {
        let response = ErrorResponse::from_app_error(error);
        eprintln!("Error: {}", response);
        std::process::exit(response.error_type.exit_code());
    }

    Ok(())
}

async fn run(state: &AppState, command: Command) -> AppResult<()> {
    match command {
        Command::Search {
            query,
            source,
            limit,
        } => {
            let results = state.search_manga(source.into(), &query, limit).await?;
            if results.is_empty() {
                println!("No results for \"{}\"", query);
            }
            for manga in &results {
                print_manga(manga);
            }
        }

        Command::Add { query, source } => {
            let source = CatalogSource::from(source);
            let hit = state
                .search_manga(source, &query, 1)
                .await?
                .into_iter()
                .next()
                .ok_or(AppError::NotFound)?;
            let manga = state.manga_details(source, hit).await;

            let series = state.library.add_from_catalog(&manga).await?;
            println!("Added #{} {}", series.id, series);
        }

        Command::Scan { isbn } => {
            let lookup = state
                .resolver
                .lookup_by_isbn(&isbn)
                .await
                .ok_or_else(|| AppError::Validation(format!("No book found for ISBN {}", isbn)))?;
            println!("Found: {}", lookup.full_title);

            let outcome = state.library.add_from_scan(&lookup).await?;
            match (outcome.created, outcome.volume) {
                (true, Some(volume)) => println!(
                    "{} added with Vol. {} (#{})",
                    lookup.series_title, volume, outcome.series_id
                ),
                (false, Some(volume)) => {
                    println!("Vol. {} added to {}", volume, lookup.series_title)
                }
                (true, None) => println!("{} added (#{})", lookup.series_title, outcome.series_id),
                (false, None) => println!("{} is already in the library", lookup.series_title),
            }
        }

        Command::List => {
            let series = state.library.list_series()?;
            if series.is_empty() {
                println!("Library is empty");
            }
            for s in &series {
                print_series_line(s);
            }
        }

        Command::Show { id } => {
            let detail = state.library.series_detail(id)?;
            let series = &detail.series;

            println!("#{} {}", series.id, series.title);
            println!("  Author: {}", series.author);
            println!("  Status: {}", series.status);
            println!(
                "  Owned:  {}/{}",
                detail.owned_count,
                series
                    .total_volumes
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "?".to_string())
            );
            if let Some(description) = &series.description {
                println!("\n{}\n", description);
            }

            let owned: HashSet<u32> = detail
                .volumes
                .iter()
                .filter(|v| v.is_owned)
                .map(|v| v.volume_number)
                .collect();
            let grid = series.total_volumes.unwrap_or(DEFAULT_GRID_VOLUMES);
            let cells: Vec<String> = (1..=grid)
                .map(|n| {
                    if owned.contains(&n) {
                        format!("[{:>3}]", n)
                    } else {
                        format!(" {:>3} ", n)
                    }
                })
                .collect();
            for row in cells.chunks(10) {
                println!("  {}", row.join(""));
            }

            if let Some(entry) = state.wishlist.missing_for_series(id)? {
                print_wishlist_entry(&entry);
            }
        }

        Command::Own { id, volume, unset } => {
            state.library.toggle_volume(id, volume, !unset)?;
            println!(
                "Vol. {} marked as {}",
                volume,
                if unset { "not owned" } else { "owned" }
            );
        }

        Command::OwnAll { id, unset } => {
            let count = state.library.mark_all(id, !unset)?;
            println!(
                "{} volumes marked as {}",
                count,
                if unset { "not owned" } else { "owned" }
            );
        }

        Command::SetTotal { id, count } => {
            state.library.update_total_volumes(id, count)?;
            println!("Total set to {}", count);
        }

        Command::Refresh { id } => {
            let series = state.library.refresh_info(id).await?;
            println!("Updated {}", series);
        }

        Command::Covers { id } => {
            let covers = state.library.volume_covers(id).await?;
            if covers.is_empty() {
                println!("No covers found");
            }
            for cover in &covers {
                println!(
                    "Vol. {:>3}  {}  {}",
                    cover.volume_number,
                    cover.cover_url.as_deref().unwrap_or("-"),
                    cover.title
                );
            }
        }

        Command::Delete { id } => {
            state.library.delete_series(id)?;
            println!("Deleted series #{}", id);
        }

        Command::Stats => {
            let stats = state.library.library_stats()?;
            println!("Series:           {}", stats.total_series);
            println!("Completed series: {}", stats.completed_series);
            println!("Owned volumes:    {}", stats.total_owned_volumes);
            println!("Known volumes:    {}", stats.total_volumes);
            println!("Completion:       {}%", stats.completion_percent());
        }

        Command::Wishlist => {
            let wishlist = state.wishlist.missing_volumes()?;
            if wishlist.is_empty() {
                println!("Nothing missing");
            }
            for entry in &wishlist {
                print_wishlist_entry(entry);
            }
        }

        Command::Doctor => {
            let conn = get_connection(&state.pool)?;
            verify_database_integrity(&conn)?;
            let stats = get_database_stats(&conn)?;
            println!("Integrity:  ok");
            println!("Series:     {}", stats.series_count);
            println!("Volumes:    {}", stats.volume_count);
            println!(
                "Size:       {} KiB ({} pages of {} bytes)",
                stats.size_bytes / 1024,
                stats.page_count,
                stats.page_size
            );
        }

        Command::Resolve {
            title,
            authoritative,
        } => match state.resolver.resolve(&title, authoritative).await {
            Some(resolved) => println!("{}: {} volumes ({})", title, resolved.count, resolved.source),
            None => println!("{}: volume count unknown", title),
        },
    }

    Ok(())
}

fn print_manga(manga: &CatalogManga) {
    let volumes = manga
        .volumes
        .filter(|v| *v > 0)
        .map(|v| format!("{} vols", v))
        .unwrap_or_else(|| "? vols".to_string());
    let year = manga.year.map(|y| format!(" ({})", y)).unwrap_or_default();

    println!(
        "[{}] {}{} - {} - {}",
        manga.source_id,
        manga.title,
        year,
        manga.author.as_deref().unwrap_or("Unknown"),
        volumes
    );
}

fn print_series_line(series: &Series) {
    println!("#{:<4} {} by {}", series.id, series, series.author);
}

fn print_wishlist_entry(entry: &WishlistEntry) {
    let volumes: Vec<String> = entry.missing_volumes.iter().map(u32::to_string).collect();
    println!(
        "#{:<4} {} ({} missing): {}",
        entry.series_id,
        entry.series_title,
        entry.missing_volumes.len(),
        volumes.join(", ")
    );
}
