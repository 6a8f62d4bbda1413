//! Export/import surfaces (§4.10/§6): JSON, CSV, and TMX.

mod csv;
mod json;
mod tmx;

pub use csv::{export_to_csv, import_from_csv};
pub use json::{export_to_json, import_from_json, DungeonMetadata};
pub use tmx::export_to_tmx;
