//! daylog CLI - sleep, mood and stress diary over a local CSV file.

mod config;

use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use daylog_core::{CsvEntryStore, DiaryService, Entry, MonthView, NewEntry};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "daylog")]
#[command(version)]
#[command(about = "Personal sleep, mood and stress diary backed by a local CSV file")]
struct Cli {
    /// Override the configured data file
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record (or replace) the entry for one day
    Add {
        /// Day of the entry, ISO format; defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Hours slept, 0-12
        #[arg(long)]
        sleep: f64,

        /// Mood, 1-5
        #[arg(long)]
        mood: i64,

        /// Stress, 0-10
        #[arg(long)]
        stress: i64,

        /// Free-text remarks
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show one month's entries and averages
    Month {
        /// Year, defaults to the current one
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12, defaults to the current one
        #[arg(long)]
        month: Option<u32>,
    },

    /// List all entries, newest first
    List,

    /// Write the full table as a CSV download artifact
    Export {
        /// Output path; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("daylog: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let cfg = config::load_or_default();

    if let Err(err) = daylog_core::init_logging(&cfg.log_level, &cfg.log_dir) {
        eprintln!("daylog: logging disabled: {err}");
    }

    let data_file = cli.data.unwrap_or(cfg.data_file);
    let service = DiaryService::new(CsvEntryStore::new(data_file));

    match cli.command {
        Command::Add {
            date,
            sleep,
            mood,
            stress,
            notes,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let entries = service.add_entry(&NewEntry {
                date,
                sleep_hours: sleep,
                mood,
                stress,
                notes,
            })?;
            println!("saved entry for {date} ({} total)", entries.len());
        }
        Command::Month { year, month } => {
            let today = Local::now().date_naive();
            let year = year.unwrap_or(today.year());
            let month = month.unwrap_or(today.month());
            let view = service.month_view(year, month)?;
            print_month(year, month, &view);
        }
        Command::List => {
            let mut entries = service.entries()?;
            entries.sort_by(|a, b| b.date.cmp(&a.date));
            if entries.is_empty() {
                println!("no entries yet");
            } else {
                for entry in &entries {
                    println!("{}", format_entry(entry));
                }
            }
        }
        Command::Export { out } => {
            let artifact = service.export_csv()?;
            match out {
                Some(path) => {
                    std::fs::write(&path, artifact)?;
                    println!("exported to {}", path.display());
                }
                None => print!("{artifact}"),
            }
        }
    }

    Ok(())
}

fn print_month(year: i32, month: u32, view: &MonthView) {
    match &view.summary {
        None => println!("no entries for {year}-{month:02}"),
        Some(summary) => {
            println!("entries for {year}-{month:02}");
            for entry in &view.entries {
                println!("  {}", format_entry(entry));
            }
            println!(
                "averages over {} entries: sleep {} h, mood {}, stress {}",
                summary.count,
                format_mean(summary.mean_sleep_hours),
                format_mean(summary.mean_mood),
                format_mean(summary.mean_stress)
            );
        }
    }
}

fn format_entry(entry: &Entry) -> String {
    let sleep = entry
        .sleep_hours
        .map(|v| format!("{v} h"))
        .unwrap_or_else(|| "-".to_string());
    let mood = entry
        .mood
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string());
    let stress = entry
        .stress
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!(
        "{}  sleep {sleep}  mood {mood}  stress {stress}",
        entry.date
    );
    if let Some(notes) = &entry.notes {
        line.push_str("  | ");
        line.push_str(notes);
    }
    line
}

fn format_mean(mean: Option<f64>) -> String {
    mean.map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "n/a".to_string())
}
