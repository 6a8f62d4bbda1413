//! JSON export/import (§4.10): the canonical on-disk dungeon format.

use crate::error::{Error, Result};
use crate::{Grid, Tile};
use serde_json::{json, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct DungeonMetadata {
    pub name: Option<String>,
    pub generator: Option<String>,
    pub seed: Option<u64>,
    pub params: Option<Value>,
    pub created_at: Option<String>,
    pub custom: Option<Value>,
}

fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

pub fn export_to_json(grid: &Grid<Tile>, metadata: &DungeonMetadata) -> String {
    let rows: Vec<Vec<u8>> = (0..grid.height())
        .map(|y| (0..grid.width()).map(|x| grid[(x, y)].code()).collect())
        .collect();

    let mut tile_types = serde_json::Map::new();
    for tile in Tile::ALL {
        tile_types.insert(tile.code().to_string(), Value::String(tile.name().to_string()));
    }

    let mut meta = serde_json::Map::new();
    if let Some(name) = &metadata.name {
        meta.insert("name".into(), Value::String(name.clone()));
    }
    if let Some(generator) = &metadata.generator {
        meta.insert("generator".into(), Value::String(generator.clone()));
    }
    if let Some(seed) = metadata.seed {
        meta.insert("seed".into(), json!(seed));
    }
    if let Some(params) = &metadata.params {
        meta.insert("params".into(), params.clone());
    }
    meta.insert("created_at".into(), Value::String(metadata.created_at.clone().unwrap_or_else(now_iso8601)));
    if let Some(custom) = &metadata.custom {
        meta.insert("custom".into(), custom.clone());
    }

    let doc = json!({
        "version": "1.0.0",
        "width": grid.width(),
        "height": grid.height(),
        "grid": rows,
        "metadata": Value::Object(meta),
        "tile_types": Value::Object(tile_types),
    });
    serde_json::to_string_pretty(&doc).unwrap_or_default()
}

pub fn import_from_json(text: &str) -> Result<(Grid<Tile>, DungeonMetadata)> {
    let doc: Value = serde_json::from_str(text).map_err(|e| Error::ParseError(format!("invalid JSON: {e}")))?;

    let width = doc.get("width").and_then(Value::as_u64).ok_or_else(|| Error::ParseError("missing width".into()))? as usize;
    let height = doc.get("height").and_then(Value::as_u64).ok_or_else(|| Error::ParseError("missing height".into()))? as usize;
    let rows = doc.get("grid").and_then(Value::as_array).ok_or_else(|| Error::ParseError("missing grid".into()))?;

    if rows.len() != height {
        return Err(Error::ParseError(format!("grid has {} rows, expected {height}", rows.len())));
    }

    let mut grid: Grid<Tile> = Grid::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        let row = row.as_array().ok_or_else(|| Error::ParseError(format!("row {y} is not an array")))?;
        if row.len() != width {
            return Err(Error::ParseError(format!("row {y} has {} cells, expected {width}", row.len())));
        }
        for (x, cell) in row.iter().enumerate() {
            let code = cell.as_u64().ok_or_else(|| Error::ParseError(format!("cell ({x},{y}) is not an integer")))? as u8;
            let tile = Tile::from_code(code).ok_or_else(|| Error::ParseError(format!("unknown tile code {code} at ({x},{y})")))?;
            grid.set(x as i32, y as i32, tile);
        }
    }

    let mut metadata = DungeonMetadata::default();
    if let Some(meta) = doc.get("metadata").and_then(Value::as_object) {
        metadata.name = meta.get("name").and_then(Value::as_str).map(String::from);
        metadata.generator = meta.get("generator").and_then(Value::as_str).map(String::from);
        metadata.seed = meta.get("seed").and_then(Value::as_u64);
        metadata.params = meta.get("params").cloned();
        metadata.created_at = meta.get("created_at").and_then(Value::as_str).map(String::from);
        metadata.custom = meta.get("custom").cloned();
    }

    Ok((grid, metadata))
}

#[allow(dead_code)]
fn tile_name_lookup() -> HashMap<u8, &'static str> {
    Tile::ALL.iter().map(|t| (t.code(), t.name())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{generate_bsp, BspConfig};

    #[test]
    fn round_trips_grid_and_metadata() {
        let grid = generate_bsp(24, 99, BspConfig::default()).unwrap();
        let metadata = DungeonMetadata { name: Some("test".into()), generator: Some("bsp".into()), seed: Some(99), ..Default::default() };
        let text = export_to_json(&grid, &metadata);
        let (grid2, metadata2) = import_from_json(&text).unwrap();
        assert_eq!(grid, grid2);
        assert_eq!(metadata2.name, Some("test".into()));
        assert_eq!(metadata2.generator, Some("bsp".into()));
        assert_eq!(metadata2.seed, Some(99));
        assert!(metadata2.created_at.is_some());
    }

    #[test]
    fn malformed_json_triggers_parse_error() {
        let result = import_from_json("{not valid json");
        assert!(matches!(result, Err(Error::ParseError(_))));
    }

    #[test]
    fn mismatched_row_length_triggers_parse_error() {
        let text = r#"{"version":"1.0.0","width":2,"height":1,"grid":[[0,0,0]],"metadata":{},"tile_types":{}}"#;
        let result = import_from_json(text);
        assert!(matches!(result, Err(Error::ParseError(_))));
    }
}
