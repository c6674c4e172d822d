//! Moon Information Tool
//!
//! Prints the Moon's phase, illumination, position, and the transition
//! dates of the current lunar cycle for a given instant.
//!
//! Usage:
//!   cargo run --bin moon_info -- [--date 2023-01-01T00:00:00Z] [--json]

use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser};
use moonfield::{JulianDate, MoonSnapshot};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Moon Information Tool
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Displays the Moon's phase, position, and cycle transition dates",
    long_about = None
)]
struct Args {
    /// Instant to evaluate, RFC 3339 (defaults to now)
    #[arg(short, long)]
    date: Option<DateTime<Utc>>,

    /// Emit the snapshot as JSON instead of text
    #[arg(short, long, action = ArgAction::SetTrue)]
    json: bool,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

fn main() -> Result<()> {
    let args = Args::parse();
    let date = args.date.unwrap_or_else(Utc::now);

    let moon = MoonSnapshot::at(date)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&moon)?);
        return Ok(());
    }

    print_section_header("Moon");
    println!("{}", moon);
    println!("Julian Date: {}", JulianDate::from_datetime(&date));

    print_section_header("Cycle Transitions");
    for record in moon.transitions()? {
        println!("{:<16} {}", format!("{}:", record.transition), record.date);
    }

    let next = moon.next_transition()?;
    println!("\nNext transition: {} at {}", next.transition, next.date);

    Ok(())
}
