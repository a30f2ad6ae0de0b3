use std::io::IsTerminal;

use chrono::Weekday;
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::config::ColorMode;
use crate::scoring::factors::SETTING_LEVELS;
use crate::scoring::{MachineResult, ScoreResult, Status};
use crate::session::SessionContext;

const MAX_RULE_WIDTH: usize = 64;

/// Decide whether to emit ANSI colors for the given mode.
pub fn should_use_colors(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Group digits in threes: 1234567 -> "1,234,567"
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format an unsigned yen amount: "¥450,000"
pub fn format_amount(amount: u64) -> String {
    format!("¥{}", group_thousands(amount))
}

/// Format a yen amount: "¥450,000", "-¥19,750"
pub fn format_yen(amount: i64) -> String {
    let formatted = format_amount(amount.unsigned_abs());
    if amount < 0 {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Format a difference with an explicit sign for non-negative values: "+¥50,000"
pub fn format_signed_yen(amount: i64) -> String {
    if amount >= 0 {
        format!("+{}", format_yen(amount))
    } else {
        format_yen(amount)
    }
}

/// Format a total score: "+11.1%", "-3.8%", "0.0%"
pub fn format_percent(score: f64) -> String {
    if score > 0.0 {
        format!("+{:.1}%", score)
    } else {
        format!("{:.1}%", score)
    }
}

/// Non-zero setting counts, e.g. "S5: 5 units, S6: 5 units"
pub fn format_distribution(distribution: &[u64; SETTING_LEVELS]) -> String {
    let parts: Vec<String> = distribution
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(i, count)| {
            let unit = if *count == 1 { "unit" } else { "units" };
            format!("S{}: {} {}", i + 1, count, unit)
        })
        .collect();

    if parts.is_empty() {
        "no units entered".to_string()
    } else {
        parts.join(", ")
    }
}

pub fn format_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Get terminal width, defaulting to None for pipes
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

fn rule() -> String {
    let width = get_terminal_width()
        .map(|w| w.min(MAX_RULE_WIDTH))
        .unwrap_or(MAX_RULE_WIDTH);
    "─".repeat(width)
}

/// Truncate to `max_width` characters, accounting for Unicode
fn truncate_model(model: &str, max_width: usize) -> String {
    let chars: Vec<char> = model.chars().collect();
    if chars.len() <= max_width {
        model.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn paint_status(text: &str, status: Status, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match status {
        Status::Good => text.green().bold().to_string(),
        Status::Average => text.yellow().bold().to_string(),
        Status::Caution => text.red().bold().to_string(),
    }
}

fn paint_efficiency(efficiency: f64, use_colors: bool) -> String {
    let text = format!("{:.1}%", efficiency);
    if !use_colors {
        text
    } else if efficiency >= 100.0 {
        text.green().to_string()
    } else if efficiency >= 90.0 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

fn format_context_line(context: &SessionContext) -> String {
    let date = context
        .date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "undated".to_string());
    let weekday = context
        .resolved_weekday()
        .map(format_weekday)
        .unwrap_or("-");
    let event = if context.has_event { "event day" } else { "no event" };
    let island = context
        .island
        .map(|i| format!("{} ({})", i.key(), i.floor_label()))
        .unwrap_or_else(|| "island not set".to_string());
    format!("{} {} | {} | {}", date, weekday, event, island)
}

fn format_machine_block(machine: &MachineResult, use_colors: bool) -> String {
    let title = if use_colors {
        machine.model.bold().to_string()
    } else {
        machine.model.clone()
    };
    let recommendation = if use_colors {
        machine.recommendation.message().cyan().to_string()
    } else {
        machine.recommendation.message().to_string()
    };
    format!(
        "{}\n  Sales: {}  Median: {}\n  Avg setting: {:.1}  Efficiency: {}\n  Allocation: {}\n  -> {}",
        title,
        format_amount(machine.sales),
        format_amount(machine.expected_median),
        machine.average_setting,
        paint_efficiency(machine.efficiency, use_colors),
        format_distribution(&machine.setting_distribution),
        recommendation
    )
}

/// Full multi-section report for a terminal.
pub fn format_report(result: &ScoreResult, context: &SessionContext, use_colors: bool) -> String {
    let mut sections: Vec<String> = Vec::new();
    let rule = rule();

    let heading = if use_colors {
        "Sales performance score".bold().to_string()
    } else {
        "Sales performance score".to_string()
    };
    sections.push(format!("{}\n{}", heading, format_context_line(context)));

    sections.push(format!(
        "{}  [{}]\n  Total median: {}\n  Total sales:  {}\n  Difference:   {}",
        paint_status(&format_percent(result.total_score), result.status, use_colors),
        paint_status(result.status.label(), result.status, use_colors),
        format_amount(result.total_median),
        format_amount(result.total_sales),
        format_signed_yen(result.difference)
    ));

    if result.machines.is_empty() {
        sections.push("No machine rows had both a model and sales.".to_string());
    } else {
        let blocks: Vec<String> = result
            .machines
            .iter()
            .map(|m| format_machine_block(m, use_colors))
            .collect();
        sections.push(blocks.join("\n\n"));
    }

    let improvements: Vec<String> = result
        .improvements
        .iter()
        .map(|line| format!("  * {}", line))
        .collect();
    sections.push(format!("Improvements\n{}", improvements.join("\n")));

    sections.push(format!("Summary\n  {}", result.comment));

    sections.join(&format!("\n{}\n", rule))
}

/// Per-machine tab-separated values for scripting
/// Columns: model, sales, median, avg setting, efficiency, recommendation (no headers)
pub fn format_tsv(result: &ScoreResult) -> String {
    result
        .machines
        .iter()
        .map(|m| {
            format!(
                "{}\t{}\t{}\t{:.1}\t{:.1}\t{}",
                m.model,
                m.sales,
                m.expected_median,
                m.average_setting,
                m.efficiency,
                m.recommendation
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty JSON, the full result as the engine produced it
pub fn format_json(result: &ScoreResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// One catalog line per model for the `catalog` subcommand
pub fn format_catalog_line(model: &str, tier: &str, base_median: f64, width: usize) -> String {
    format!(
        "{:<width$}  {:<9} {}",
        truncate_model(model, width),
        tier,
        format_yen(base_median as i64),
        width = width
    )
}
