pub mod formatter;

pub use formatter::{
    format_amount, format_catalog_line, format_distribution, format_json, format_percent, format_report,
    format_signed_yen, format_tsv, format_yen, should_use_colors,
};
