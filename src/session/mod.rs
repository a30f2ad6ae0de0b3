pub mod catalog;
pub mod storage;
pub mod types;

pub use catalog::{catalog_entries, is_catalog_model, CatalogEntry, MACHINE_CATALOG};
pub use storage::{load_session, parse_session, render_template, write_template, SessionFormat};
pub use types::{IslandLocation, MachineEntry, SessionContext, SessionInput, Token};
