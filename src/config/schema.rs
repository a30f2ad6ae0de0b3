use serde::{Deserialize, Serialize};

/// How a score result is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Tsv,
    Json,
}

/// When to color text output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

/// User preferences, read from `~/.config/slot-score/config.yaml`.
///
/// Example YAML:
/// ```yaml
/// format: text
/// color: auto
/// log_level: info
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub format: Option<OutputFormat>,

    #[serde(default)]
    pub color: Option<ColorMode>,

    /// `tracing` filter directive used when neither RUST_LOG nor --verbose is set
    #[serde(default)]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
format: json
color: never
log_level: "slot_score=debug"
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.format, Some(OutputFormat::Json));
        assert_eq!(config.color, Some(ColorMode::Never));
        assert_eq!(config.log_level.as_deref(), Some("slot_score=debug"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "formatt: json\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            format: Some(OutputFormat::Tsv),
            color: Some(ColorMode::Always),
            log_level: Some("info".to_string()),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
