pub mod engine;
pub mod factors;
pub mod parse;

pub use engine::{
    aggregate, calculate_score, score_machine, MachineResult, Recommendation, ScoreResult, Status,
    ALL_CLEAR_IMPROVEMENT,
};
pub use factors::{BaselineTier, ContextMultipliers};
pub use parse::{parse_count_or_zero, parse_whole};
