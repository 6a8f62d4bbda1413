//! TMX export (§4.10/§6): a Tiled-compatible orthogonal map document.

use crate::{Grid, Tile};

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

const OBJECT_TILES: [Tile; 4] = [Tile::StairsUp, Tile::Treasure, Tile::Chest, Tile::Trap];

/// Renders the grid as a Tiled 1.10 orthogonal map: a CSV tile layer plus an
/// optional object layer marking stairs/treasure/chest/trap positions.
pub fn export_to_tmx(grid: &Grid<Tile>, tile_width: u32, tile_height: u32, include_objects: bool) -> String {
    const FIRST_GID: u32 = 1;
    let (w, h) = (grid.width(), grid.height());

    let mut csv_rows = Vec::with_capacity(h);
    for y in 0..h {
        let row: Vec<String> = (0..w).map(|x| (grid[(x, y)].code() as u32 + FIRST_GID).to_string()).collect();
        csv_rows.push(row.join(","));
    }
    let csv_data = csv_rows.join(",\n");

    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    out.push('\n');
    out.push_str(&format!(
        r#"<map version="1.10" tiledversion="1.10.0" orientation="orthogonal" renderorder="right-down" width="{w}" height="{h}" tilewidth="{tile_width}" tileheight="{tile_height}" infinite="0" nextlayerid="3" nextobjectid="1">"#
    ));
    out.push('\n');
    out.push_str(&format!(
        r#"  <tileset firstgid="{FIRST_GID}" name="tiles" tilewidth="{tile_width}" tileheight="{tile_height}" tilecount="{count}" columns="1"/>"#,
        count = crate::grid::TILE_COUNT,
    ));
    out.push('\n');
    out.push_str(&format!(r#"  <layer id="1" name="Tiles" width="{w}" height="{h}">"#));
    out.push('\n');
    out.push_str(r#"    <data encoding="csv">"#);
    out.push('\n');
    out.push_str(&csv_data);
    out.push('\n');
    out.push_str("    </data>\n  </layer>\n");

    if include_objects {
        out.push_str(r#"  <objectgroup id="2" name="Objects">"#);
        out.push('\n');
        let mut object_id = 1;
        for y in 0..h {
            for x in 0..w {
                let tile = grid[(x, y)];
                if OBJECT_TILES.contains(&tile) {
                    let px = x as u32 * tile_width;
                    let py = y as u32 * tile_height;
                    out.push_str(&format!(
                        r#"    <object id="{object_id}" name="{name}" type="{ty}" x="{px}" y="{py}" width="{tile_width}" height="{tile_height}"/>"#,
                        name = xml_escape(tile.name()),
                        ty = xml_escape(tile.name()),
                    ));
                    out.push('\n');
                    object_id += 1;
                }
            }
        }
        out.push_str("  </objectgroup>\n");
    }

    out.push_str("</map>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{generate_bsp, BspConfig};

    #[test]
    fn includes_orthogonal_header_and_tile_layer() {
        let grid = generate_bsp(16, 3, BspConfig::default()).unwrap();
        let xml = export_to_tmx(&grid, 16, 16, true);
        assert!(xml.contains(r#"orientation="orthogonal""#));
        assert!(xml.contains(r#"renderorder="right-down""#));
        assert!(xml.contains(r#"name="Tiles""#));
    }

    #[test]
    fn object_layer_omitted_when_disabled() {
        let grid = generate_bsp(16, 3, BspConfig::default()).unwrap();
        let xml = export_to_tmx(&grid, 16, 16, false);
        assert!(!xml.contains("Objects"));
    }

    #[test]
    fn object_layer_lists_stairs_when_features_present() {
        let mut grid = generate_bsp(16, 3, BspConfig::default()).unwrap();
        grid.set(1, 1, Tile::StairsUp);
        let xml = export_to_tmx(&grid, 16, 16, true);
        assert!(xml.contains(r#"type="stairs_up""#));
    }
}
