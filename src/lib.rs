//! Moonfield: lunar phase and position calculations inspired by John
//! Walker's moontool
//!
//! This crate computes the Moon's phase, illumination, age, distance, and
//! ecliptic coordinates for any instant, along with the dates of the four
//! named phase transitions bounding the current lunar cycle. It uses the
//! classical low-precision ephemeris model from `moontool.c` anchored at
//! epoch 1980.0.
//!
//! ```no_run
//! use chrono::Utc;
//! use moonfield::MoonSnapshot;
//!
//! let moon = MoonSnapshot::at(Utc::now()).unwrap();
//! println!("{}", moon);
//! println!("Next transition: {}", moon.next_transition().unwrap().transition);
//! ```

use thiserror::Error;

pub mod constants;
pub mod math;
pub mod moon;
pub mod time;

// Re-export commonly used types
pub use moon::{MoonSnapshot, Phase, Transition, TransitionRecord};
pub use time::{JulianDate, JulianDay};

/// Main error type for the moonfield library
#[derive(Debug, Error)]
pub enum MoonfieldError {
    #[error("Time error: {0}")]
    Time(#[from] time::TimeError),

    #[error("Math error: {0}")]
    Math(#[from] math::MathError),

    #[error("Moon calculation error: {0}")]
    Moon(#[from] moon::MoonError),
}

/// Result type for moonfield operations
pub type Result<T> = std::result::Result<T, MoonfieldError>;
