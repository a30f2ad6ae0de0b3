use crate::session::{IslandLocation, SessionContext};

/// Number of payout setting levels on a machine (settings 1 through 6).
pub const SETTING_LEVELS: usize = 6;

pub const EVENT_MULTIPLIER: f64 = 1.10;
pub const CENTRAL_ISLAND_MULTIPLIER: f64 = 1.05;

/// Average setting below this suggests shifting units toward settings 4 and 5.
pub const LOW_AVERAGE_SETTING: f64 = 3.5;
/// Average setting above this is already a generous allocation.
pub const HIGH_AVERAGE_SETTING: f64 = 4.5;

/// Machines under this efficiency (percent) get an improvement line.
pub const IMPROVEMENT_EFFICIENCY: f64 = 90.0;

/// Total score (percent) above which a day counts as good.
pub const GOOD_SCORE: f64 = 10.0;
/// Total score (percent) above which a day counts as average.
pub const AVERAGE_SCORE: f64 = 0.0;

/// Expected per-unit sales tier for a machine model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineTier {
    Flagship,
    Featured,
    Standard,
}

impl BaselineTier {
    /// Tiers that are matched by name, in priority order. Anything that matches
    /// none of them is `Standard`.
    const MATCH_ORDER: [BaselineTier; 2] = [BaselineTier::Flagship, BaselineTier::Featured];

    /// Look up the tier for a model name.
    ///
    /// Tiers are checked in a fixed order and the first one whose needle occurs
    /// in the name wins, so a name mentioning both franchises is `Flagship`.
    pub fn for_model(model: &str) -> Self {
        let lowered = model.to_lowercase();
        Self::MATCH_ORDER
            .into_iter()
            .find(|tier| tier.needles().iter().any(|n| lowered.contains(n)))
            .unwrap_or(BaselineTier::Standard)
    }

    /// Substrings that select this tier. ASCII needles are lowercase and
    /// compared against the lowercased model name.
    pub fn needles(&self) -> &'static [&'static str] {
        match self {
            BaselineTier::Flagship => &["北斗", "hokuto"],
            BaselineTier::Featured => &["まどか", "madoka"],
            BaselineTier::Standard => &[],
        }
    }

    /// Expected sales per unit for one business day, in yen.
    pub fn base_median(&self) -> f64 {
        match self {
            BaselineTier::Flagship => 45_000.0,
            BaselineTier::Featured => 38_000.0,
            BaselineTier::Standard => 35_000.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BaselineTier::Flagship => "flagship",
            BaselineTier::Featured => "featured",
            BaselineTier::Standard => "standard",
        }
    }
}

/// Session-wide adjustments applied to every machine's baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMultipliers {
    pub event: f64,
    pub island: f64,
}

impl ContextMultipliers {
    pub fn from_context(context: &SessionContext) -> Self {
        Self {
            event: event_multiplier(context.has_event),
            island: island_multiplier(context.island),
        }
    }

    /// Expected sales for `units` machines at the given tier.
    ///
    /// The product is taken in a fixed order (base, event, island, units)
    /// and rounded to the nearest yen.
    pub fn expected_median(&self, tier: BaselineTier, units: u64) -> u64 {
        let median = tier.base_median() * self.event * self.island * units as f64;
        median.round() as u64
    }
}

pub fn event_multiplier(has_event: bool) -> f64 {
    if has_event {
        EVENT_MULTIPLIER
    } else {
        1.0
    }
}

pub fn island_multiplier(island: Option<IslandLocation>) -> f64 {
    match island {
        Some(IslandLocation::Central) => CENTRAL_ISLAND_MULTIPLIER,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(has_event: bool, island: Option<IslandLocation>) -> SessionContext {
        SessionContext {
            has_event,
            island,
            ..SessionContext::default()
        }
    }

    #[test]
    fn test_tier_flagship() {
        assert_eq!(BaselineTier::for_model("パチスロ 北斗の拳"), BaselineTier::Flagship);
    }

    #[test]
    fn test_tier_featured() {
        assert_eq!(
            BaselineTier::for_model("パチスロ まどか☆マギカ"),
            BaselineTier::Featured
        );
    }

    #[test]
    fn test_tier_standard_default() {
        assert_eq!(BaselineTier::for_model("パチスロ ハナハナ"), BaselineTier::Standard);
        assert_eq!(BaselineTier::for_model(""), BaselineTier::Standard);
    }

    #[test]
    fn test_tier_ascii_case_insensitive() {
        assert_eq!(BaselineTier::for_model("Hokuto no Ken"), BaselineTier::Flagship);
        assert_eq!(BaselineTier::for_model("MADOKA Magica"), BaselineTier::Featured);
    }

    #[test]
    fn test_tier_priority_when_both_match() {
        assert_eq!(BaselineTier::for_model("まどか 北斗 collab"), BaselineTier::Flagship);
    }

    #[test]
    fn test_base_medians() {
        assert_eq!(BaselineTier::Flagship.base_median(), 45_000.0);
        assert_eq!(BaselineTier::Featured.base_median(), 38_000.0);
        assert_eq!(BaselineTier::Standard.base_median(), 35_000.0);
    }

    #[test]
    fn test_multipliers_neutral() {
        let m = ContextMultipliers::from_context(&context(false, Some(IslandLocation::Rear)));
        assert_eq!(m.event, 1.0);
        assert_eq!(m.island, 1.0);
    }

    #[test]
    fn test_multipliers_event_and_central() {
        let m = ContextMultipliers::from_context(&context(true, Some(IslandLocation::Central)));
        assert_eq!(m.event, 1.10);
        assert_eq!(m.island, 1.05);
    }

    #[test]
    fn test_island_unset_is_neutral() {
        assert_eq!(island_multiplier(None), 1.0);
    }

    #[test]
    fn test_expected_median_neutral() {
        let m = ContextMultipliers::from_context(&context(false, None));
        assert_eq!(m.expected_median(BaselineTier::Flagship, 10), 450_000);
    }

    #[test]
    fn test_expected_median_event_central() {
        let m = ContextMultipliers::from_context(&context(true, Some(IslandLocation::Central)));
        assert_eq!(m.expected_median(BaselineTier::Flagship, 10), 519_750);
    }

    #[test]
    fn test_expected_median_zero_units() {
        let m = ContextMultipliers::from_context(&context(true, Some(IslandLocation::Central)));
        assert_eq!(m.expected_median(BaselineTier::Standard, 0), 0);
    }

    #[test]
    fn test_expected_median_monotonic_in_units() {
        let m = ContextMultipliers::from_context(&context(true, Some(IslandLocation::Central)));
        for tier in [BaselineTier::Flagship, BaselineTier::Featured, BaselineTier::Standard] {
            let mut previous = 0;
            for units in 0..50 {
                let median = m.expected_median(tier, units);
                assert!(median >= previous);
                previous = median;
            }
        }
    }
}
