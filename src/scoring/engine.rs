use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use super::factors::{
    BaselineTier, ContextMultipliers, AVERAGE_SCORE, GOOD_SCORE, HIGH_AVERAGE_SETTING,
    IMPROVEMENT_EFFICIENCY, LOW_AVERAGE_SETTING, SETTING_LEVELS,
};
use crate::session::{MachineEntry, SessionInput};

/// Line emitted when no machine needs attention.
pub const ALL_CLEAR_IMPROVEMENT: &str =
    "Setting allocation is currently in good shape. Keep monitoring.";

/// Allocation advice for a single machine model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    IncreaseHighSettings,
    Maintain,
    Balanced,
}

impl Recommendation {
    pub fn for_average_setting(average_setting: f64) -> Self {
        if average_setting < LOW_AVERAGE_SETTING {
            Recommendation::IncreaseHighSettings
        } else if average_setting > HIGH_AVERAGE_SETTING {
            Recommendation::Maintain
        } else {
            Recommendation::Balanced
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::IncreaseHighSettings => {
                "Increase the share of units on settings 4 and 5"
            }
            Recommendation::Maintain => "High-setting allocation is appropriate; maintain it",
            Recommendation::Balanced => "Setting allocation is well balanced",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

// Consumers get the finished sentence, not a code to branch on.
impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Overall verdict for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Average,
    Caution,
}

impl Status {
    /// Classify a total score. Both thresholds are exclusive: exactly 10.0 is
    /// `Average` and exactly 0.0 is `Caution`.
    pub fn classify(total_score: f64) -> Self {
        if total_score > GOOD_SCORE {
            Status::Good
        } else if total_score > AVERAGE_SCORE {
            Status::Average
        } else {
            Status::Caution
        }
    }

    pub fn comment(&self) -> &'static str {
        match self {
            Status::Good => {
                "Sales are strong across the board. The current setting allocation strategy is working."
            }
            Status::Average => "Sales are about average. Some models have room to improve.",
            Status::Caution => {
                "Sales are below the expected baseline. The setting allocation needs a review."
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Good => "Good",
            Status::Average => "Average",
            Status::Caution => "Caution",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineResult {
    pub model: String,
    pub sales: u64,
    /// Unit-weighted mean setting, 1.0..=6.0, or 0 when no units were entered
    pub average_setting: f64,
    pub expected_median: u64,
    /// Sales as a percentage of `expected_median`
    pub efficiency: f64,
    pub recommendation: Recommendation,
    pub setting_distribution: [u64; SETTING_LEVELS],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Percent deviation of total sales from the total expected median
    pub total_score: f64,
    pub total_sales: u64,
    pub total_median: u64,
    pub difference: i64,
    pub status: Status,
    pub comment: String,
    pub machines: Vec<MachineResult>,
    pub improvements: Vec<String>,
}

/// Score a full session.
///
/// Rows without a model or without numeric sales are skipped and contribute
/// nothing. Never fails: unreadable counts are zero and every division is
/// guarded.
pub fn calculate_score(input: &SessionInput) -> ScoreResult {
    let multipliers = ContextMultipliers::from_context(&input.context);
    debug!(
        event = multipliers.event,
        island = multipliers.island,
        rows = input.machines.len(),
        "scoring session"
    );

    let machines: Vec<MachineResult> = input
        .machines
        .iter()
        .enumerate()
        .filter_map(|(row, entry)| {
            let result = score_machine(entry, &multipliers);
            if result.is_none() {
                trace!(row, "skipping incomplete machine row");
            }
            result
        })
        .collect();

    aggregate(machines)
}

/// Score a single machine row, or `None` if the row is incomplete.
///
/// The model name is kept as entered; only the blank check ignores
/// surrounding whitespace.
pub fn score_machine(entry: &MachineEntry, multipliers: &ContextMultipliers) -> Option<MachineResult> {
    if entry.model.trim().is_empty() {
        return None;
    }
    let model = entry.model.as_str();
    let sales = entry.sales_amount()?;

    let counts = entry.setting_counts();
    let total_units = saturate_u64(total_units(&counts));
    let average_setting = average_setting(&counts);

    let tier = BaselineTier::for_model(model);
    let expected_median = multipliers.expected_median(tier, total_units);
    let efficiency = if expected_median > 0 {
        sales as f64 / expected_median as f64 * 100.0
    } else {
        0.0
    };

    debug!(
        model,
        tier = tier.label(),
        total_units,
        average_setting,
        expected_median,
        efficiency,
        "scored machine"
    );

    Some(MachineResult {
        model: model.to_string(),
        sales,
        average_setting,
        expected_median,
        efficiency,
        recommendation: Recommendation::for_average_setting(average_setting),
        setting_distribution: counts,
    })
}

// Sums are widened so any six u64 counts (or any row count of u64 amounts)
// add up without overflow.
fn total_units(counts: &[u64; SETTING_LEVELS]) -> u128 {
    counts.iter().map(|&c| u128::from(c)).sum()
}

fn saturate_u64(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// Unit-weighted mean of setting levels 1..=6; 0 when there are no units.
pub fn average_setting(counts: &[u64; SETTING_LEVELS]) -> f64 {
    let total_units = total_units(counts);
    if total_units == 0 {
        return 0.0;
    }
    let weighted: u128 = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| u128::from(count) * (i as u128 + 1))
        .sum();
    weighted as f64 / total_units as f64
}

/// Combine per-machine results into the session verdict.
pub fn aggregate(machines: Vec<MachineResult>) -> ScoreResult {
    let sales_sum: u128 = machines.iter().map(|m| u128::from(m.sales)).sum();
    let median_sum: u128 = machines.iter().map(|m| u128::from(m.expected_median)).sum();
    let wide_difference = sales_sum as i128 - median_sum as i128;
    let total_score = if median_sum > 0 {
        wide_difference as f64 / median_sum as f64 * 100.0
    } else {
        0.0
    };

    let total_sales = saturate_u64(sales_sum);
    let total_median = saturate_u64(median_sum);
    let difference = wide_difference.clamp(i64::MIN as i128, i64::MAX as i128) as i64;

    let status = Status::classify(total_score);

    let mut improvements: Vec<String> = machines
        .iter()
        .filter(|m| m.efficiency < IMPROVEMENT_EFFICIENCY)
        .map(|m| format!("{}: {}", m.model, m.recommendation))
        .collect();
    if improvements.is_empty() {
        improvements.push(ALL_CLEAR_IMPROVEMENT.to_string());
    }

    debug!(
        total_sales,
        total_median,
        total_score,
        status = status.label(),
        "aggregated session"
    );

    ScoreResult {
        total_score,
        total_sales,
        total_median,
        difference,
        status,
        comment: status.comment().to_string(),
        machines,
        improvements,
    }
}
