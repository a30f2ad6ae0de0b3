use crate::scoring::factors::BaselineTier;

/// Machine models offered on the entry form.
pub const MACHINE_CATALOG: [&str; 6] = [
    "パチスロ 北斗の拳",
    "パチスロ ゴッドイーター",
    "パチスロ まどか☆マギカ",
    "パチスロ 戦国乙女",
    "パチスロ 番長3",
    "パチスロ ハナハナ",
];

/// A catalog model with the baseline it will be scored against.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub model: &'static str,
    pub tier: BaselineTier,
}

pub fn catalog_entries() -> Vec<CatalogEntry> {
    MACHINE_CATALOG
        .into_iter()
        .map(|model| CatalogEntry {
            model,
            tier: BaselineTier::for_model(model),
        })
        .collect()
}

/// Whether `model` is one of the catalog names (ignoring surrounding whitespace).
pub fn is_catalog_model(model: &str) -> bool {
    MACHINE_CATALOG.contains(&model.trim())
}
