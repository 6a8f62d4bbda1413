//! CSV export/import (§4.10): one row per grid row, comma-separated tile codes.

use crate::error::{Error, Result};
use crate::{Grid, Tile};

pub fn export_to_csv(grid: &Grid<Tile>) -> String {
    let mut out = String::new();
    for y in 0..grid.height() {
        let row: Vec<String> = (0..grid.width()).map(|x| grid[(x, y)].code().to_string()).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

pub fn import_from_csv(text: &str) -> Result<Grid<Tile>> {
    let rows: Vec<Vec<u8>> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.split(',')
                .map(|cell| cell.trim().parse::<u8>().map_err(|e| Error::ParseError(format!("invalid tile code {cell:?}: {e}"))))
                .collect::<Result<Vec<u8>>>()
        })
        .collect::<Result<Vec<Vec<u8>>>>()?;

    if rows.is_empty() {
        return Err(Error::ParseError("CSV has no rows".into()));
    }
    let width = rows[0].len();
    if width == 0 || rows.iter().any(|r| r.len() != width) {
        return Err(Error::ParseError("CSV rows must all have the same non-zero length".into()));
    }

    let mut grid: Grid<Tile> = Grid::new(width, rows.len());
    for (y, row) in rows.iter().enumerate() {
        for (x, &code) in row.iter().enumerate() {
            let tile = Tile::from_code(code).ok_or_else(|| Error::ParseError(format!("unknown tile code {code} at ({x},{y})")))?;
            grid.set(x as i32, y as i32, tile);
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{generate_bsp, BspConfig};

    #[test]
    fn round_trips_grid() {
        let grid = generate_bsp(20, 4, BspConfig::default()).unwrap();
        let text = export_to_csv(&grid);
        let grid2 = import_from_csv(&text).unwrap();
        assert_eq!(grid, grid2);
    }

    #[test]
    fn whitespace_and_trailing_blank_lines_are_tolerated() {
        let text = "0, 1, 0\n 1,0,1 \n\n";
        let grid = import_from_csv(text).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid[(1, 0)], Tile::Floor);
    }

    #[test]
    fn non_integer_cell_triggers_parse_error() {
        let result = import_from_csv("0,x,0\n0,0,0\n");
        assert!(matches!(result, Err(Error::ParseError(_))));
    }

    #[test]
    fn ragged_rows_trigger_parse_error() {
        let result = import_from_csv("0,0,0\n0,0\n");
        assert!(matches!(result, Err(Error::ParseError(_))));
    }
}
