use chrono::{Datelike, NaiveDate, Weekday};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::scoring::factors::SETTING_LEVELS;
use crate::scoring::parse::{parse_count_or_zero, parse_whole};

/// A raw form field as the operator typed it.
///
/// Session files may spell numbers as YAML/JSON numbers or as strings; both
/// are kept as text and only interpreted by the scoring helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Token(s)
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct TokenVisitor;

impl<'de> Visitor<'de> for TokenVisitor {
    type Value = Token;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Token, E> {
        Ok(Token(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Token, E> {
        Ok(Token(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Token, E> {
        Ok(Token(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Token, E> {
        Ok(Token(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Token, E> {
        Ok(Token(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Token, E> {
        Ok(Token(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Token, E> {
        Ok(Token::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Token, E> {
        Ok(Token::default())
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TokenVisitor)
    }
}

/// Floor placement of the island a session's machines sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IslandLocation {
    #[serde(alias = "中央島")]
    Central,
    #[serde(alias = "壁際島")]
    WallSide,
    #[serde(alias = "入口付近島")]
    EntranceAdjacent,
    #[serde(alias = "奥側島")]
    Rear,
}

impl IslandLocation {
    pub const ALL: [IslandLocation; 4] = [
        IslandLocation::Central,
        IslandLocation::WallSide,
        IslandLocation::EntranceAdjacent,
        IslandLocation::Rear,
    ];

    /// Key used in session files
    pub fn key(&self) -> &'static str {
        match self {
            IslandLocation::Central => "central",
            IslandLocation::WallSide => "wall-side",
            IslandLocation::EntranceAdjacent => "entrance-adjacent",
            IslandLocation::Rear => "rear",
        }
    }

    /// Floor label as printed on the hall map
    pub fn floor_label(&self) -> &'static str {
        match self {
            IslandLocation::Central => "中央島",
            IslandLocation::WallSide => "壁際島",
            IslandLocation::EntranceAdjacent => "入口付近島",
            IslandLocation::Rear => "奥側島",
        }
    }
}

/// Day-level conditions shared by every machine in a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionContext {
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Day of week as entered; derived from `date` when absent
    #[serde(default)]
    pub day_of_week: Option<Weekday>,

    #[serde(default)]
    pub has_event: bool,

    #[serde(default)]
    pub island: Option<IslandLocation>,
}

impl SessionContext {
    /// The entered weekday, falling back to the weekday of `date`.
    pub fn resolved_weekday(&self) -> Option<Weekday> {
        self.day_of_week.or_else(|| self.date.map(|d| d.weekday()))
    }
}

/// One machine model row from the entry form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineEntry {
    #[serde(default)]
    pub model: String,

    /// Unit counts for settings 1..=6; short lists are padded with blanks
    #[serde(default)]
    pub settings: Vec<Token>,

    #[serde(default)]
    pub sales: Option<Token>,
}

impl MachineEntry {
    /// Unit counts per setting level, unreadable or missing values as zero.
    pub fn setting_counts(&self) -> [u64; SETTING_LEVELS] {
        let mut counts = [0u64; SETTING_LEVELS];
        for (count, token) in counts.iter_mut().zip(&self.settings) {
            *count = parse_count_or_zero(token.as_str());
        }
        counts
    }

    /// Recorded sales, or `None` when blank or not a number.
    pub fn sales_amount(&self) -> Option<u64> {
        self.sales.as_ref().and_then(|t| parse_whole(t.as_str()))
    }

    /// Whether the engine will score this row.
    pub fn is_scorable(&self) -> bool {
        !self.model.trim().is_empty() && self.sales_amount().is_some()
    }
}

/// Everything the scoring engine needs for one business day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionInput {
    #[serde(default)]
    pub context: SessionContext,

    #[serde(default)]
    pub machines: Vec<MachineEntry>,
}

impl SessionInput {
    /// Fresh session with `rows` empty machine rows, dated `date`.
    pub fn blank(date: NaiveDate, rows: usize) -> Self {
        Self {
            context: SessionContext {
                date: Some(date),
                ..SessionContext::default()
            },
            machines: vec![
                MachineEntry {
                    settings: vec![Token::default(); SETTING_LEVELS],
                    sales: Some(Token::default()),
                    ..MachineEntry::default()
                };
                rows
            ],
        }
    }

    pub fn has_scorable_machine(&self) -> bool {
        self.machines.iter().any(MachineEntry::is_scorable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_yaml_scalars() {
        let yaml = r#"
model: "パチスロ 北斗の拳"
settings: [0, "2", "", 1.5, null]
sales: 500000
"#;
        let entry: MachineEntry = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(entry.settings.len(), 5);
        assert_eq!(entry.settings[1].as_str(), "2");
        assert!(entry.settings[2].is_blank());
        assert!(entry.settings[4].is_blank());
        assert_eq!(entry.sales_amount(), Some(500_000));
        assert_eq!(entry.setting_counts(), [0, 2, 0, 1, 0, 0]);
    }

    #[test]
    fn test_token_from_json_scalars() {
        let json = r#"{"model": "x", "settings": [1, "3", 2.0], "sales": "1200"}"#;
        let entry: MachineEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.setting_counts(), [1, 3, 2, 0, 0, 0]);
        assert_eq!(entry.sales_amount(), Some(1200));
    }

    #[test]
    fn test_extra_settings_ignored() {
        let entry = MachineEntry {
            model: "x".to_string(),
            settings: (1..=8).map(|n| Token::from(n.to_string())).collect(),
            sales: None,
        };
        assert_eq!(entry.setting_counts(), [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_is_scorable() {
        let mut entry = MachineEntry {
            model: "パチスロ ハナハナ".to_string(),
            settings: vec![],
            sales: Some(Token::from("0")),
        };
        assert!(entry.is_scorable());

        entry.sales = Some(Token::from(""));
        assert!(!entry.is_scorable());

        entry.sales = Some(Token::from("1000"));
        entry.model = " ".to_string();
        assert!(!entry.is_scorable());
    }

    #[test]
    fn test_island_keys_and_aliases() {
        let central: IslandLocation = serde_json::from_str(r#""central""#).unwrap();
        assert_eq!(central, IslandLocation::Central);
        let wall: IslandLocation = serde_json::from_str(r#""壁際島""#).unwrap();
        assert_eq!(wall, IslandLocation::WallSide);
        let entrance: IslandLocation = serde_json::from_str(r#""entrance-adjacent""#).unwrap();
        assert_eq!(entrance, IslandLocation::EntranceAdjacent);
        assert!(serde_json::from_str::<IslandLocation>(r#""roof""#).is_err());
    }

    #[test]
    fn test_island_key_matches_serde() {
        for island in IslandLocation::ALL {
            let json = serde_json::to_string(&island).unwrap();
            assert_eq!(json, format!("\"{}\"", island.key()));
        }
    }

    #[test]
    fn test_context_parse() {
        let yaml = r#"
date: 2024-05-03
has_event: true
island: 中央島
"#;
        let context: SessionContext = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(context.date, NaiveDate::from_ymd_opt(2024, 5, 3));
        assert!(context.has_event);
        assert_eq!(context.island, Some(IslandLocation::Central));
        assert_eq!(context.resolved_weekday(), Some(Weekday::Fri));
    }

    #[test]
    fn test_explicit_weekday_wins() {
        let context = SessionContext {
            date: NaiveDate::from_ymd_opt(2024, 5, 3),
            day_of_week: Some(Weekday::Sat),
            ..SessionContext::default()
        };
        assert_eq!(context.resolved_weekday(), Some(Weekday::Sat));
    }

    #[test]
    fn test_weekday_full_name() {
        let context: SessionContext = serde_json::from_str(r#"{"day_of_week": "monday"}"#).unwrap();
        assert_eq!(context.day_of_week, Some(Weekday::Mon));
    }

    #[test]
    fn test_blank_session() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let input = SessionInput::blank(date, 3);
        assert_eq!(input.machines.len(), 3);
        assert_eq!(input.machines[0].settings.len(), SETTING_LEVELS);
        assert!(!input.has_scorable_machine());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{"model": "x", "salse": "100"}"#;
        assert!(serde_json::from_str::<MachineEntry>(json).is_err());
    }
}
