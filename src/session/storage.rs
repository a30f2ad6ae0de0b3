use super::catalog::MACHINE_CATALOG;
use super::types::{IslandLocation, SessionInput};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::NaiveDate;
use std::io::{Read, Write};
use std::path::Path;

/// Rows in a freshly written template, matching the entry form.
pub const TEMPLATE_ROWS: usize = 3;

/// On-disk encoding of a session file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFormat {
    Yaml,
    Json,
}

impl SessionFormat {
    /// `.json` files are JSON; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SessionFormat::Json,
            _ => SessionFormat::Yaml,
        }
    }
}

pub fn parse_session(content: &str, format: SessionFormat) -> Result<SessionInput> {
    let input: SessionInput = match format {
        SessionFormat::Yaml => {
            serde_saphyr::from_str(content).context("Failed to parse session: invalid YAML")?
        }
        SessionFormat::Json => {
            serde_json::from_str(content).context("Failed to parse session: invalid JSON")?
        }
    };
    Ok(input)
}

/// Load a session file. A path of `-` reads YAML (or JSON) from stdin.
pub fn load_session(path: &Path) -> Result<SessionInput> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read session from stdin")?;
        return parse_session(&content, SessionFormat::Yaml);
    }

    if !path.exists() {
        anyhow::bail!("Session file not found at {}", path.display());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read session file at {}", path.display()))?;

    let input = parse_session(&content, SessionFormat::from_path(path))
        .with_context(|| format!("Invalid session file {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        rows = input.machines.len(),
        "loaded session"
    );
    Ok(input)
}

/// Render a blank session for `date` as commented YAML.
pub fn render_template(date: NaiveDate) -> Result<String> {
    let blank = SessionInput::blank(date, TEMPLATE_ROWS);
    let body = serde_saphyr::to_string(&blank)
        .map_err(|e| anyhow::anyhow!("Failed to serialize session template: {}", e))?;

    let mut header = String::new();
    header.push_str("# slot-score session\n");
    header.push_str("#\n");
    header.push_str("# settings: unit counts at settings 1-6, in order\n");
    header.push_str("# sales: the day's sales for the model, in yen\n");
    header.push_str("# island: ");
    header.push_str(
        &IslandLocation::ALL
            .iter()
            .map(|i| i.key())
            .collect::<Vec<_>>()
            .join(" | "),
    );
    header.push('\n');
    header.push_str("# models:\n");
    for model in MACHINE_CATALOG {
        header.push_str(&format!("#   - {}\n", model));
    }
    header.push('\n');

    Ok(header + &body)
}

/// Write a blank session template atomically.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn write_template(path: &Path, date: NaiveDate, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it",
            path.display()
        );
    }

    let content = render_template(date)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(content.as_bytes())
        .context("Failed to write session template")?;
    file.commit().context("Failed to save session template")?;

    Ok(())
}
