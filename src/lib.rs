//! Score a business day of slot-machine sales against fixed per-model
//! baselines, with per-machine diagnostics and allocation advice.
//!
//! [`scoring::calculate_score`] is the pure core; the other modules load its
//! input, configure the command-line tool and render its output.

pub mod config;
pub mod output;
pub mod scoring;
pub mod session;
pub mod telemetry;
