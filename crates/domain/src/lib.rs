#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod body_measurement;
mod daily_entry;
mod error;
mod exercise;
mod exercise_log;
mod export;
mod profile;
mod progress;
mod service;
mod workout_history;

pub use body_measurement::*;
pub use daily_entry::*;
pub use error::*;
pub use exercise::*;
pub use exercise_log::*;
pub use export::*;
pub use profile::*;
pub use progress::*;
pub use service::*;
pub use workout_history::*;
