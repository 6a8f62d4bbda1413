//! Room shape library (§4.2): rectangle, composite, template, cellular, and
//! polygon room footprints, all reducible to a canonical tile set via
//! [`RoomShape::tiles`].

use crate::{Point, Rect, Rng};
use std::collections::HashSet;

/// Orthogonal composite layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeVariant {
    L,
    T,
    Cross,
    U,
    Z,
    Random,
}

/// Inscribed-polygon layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonVariant {
    Hex,
    Oct,
    Circle,
    Ellipse,
    Diamond,
}

impl PolygonVariant {
    fn vertex_count(self) -> usize {
        match self {
            PolygonVariant::Hex => 6,
            PolygonVariant::Oct => 8,
            PolygonVariant::Circle => 16,
            PolygonVariant::Ellipse => 16,
            PolygonVariant::Diamond => 4,
        }
    }
}

/// A discriminant for [`ShapeOptions::allowed_shapes`], independent of each
/// variant's internal sub-kind (composite variant, template name, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Composite,
    Template,
    Cellular,
    Polygon,
}

/// Built-in boolean-mask templates (§4.2), sized relative to their own
/// natural aspect so they can be nearest-neighbor scaled into any bounds.
pub fn template_mask(name: &str) -> Option<Vec<Vec<bool>>> {
    let grid: Vec<&str> = match name {
        "cross" => vec!["..#..", "..#..", "#####", "..#..", "..#.."],
        "diamond" => vec!["..#..", ".###.", "#####", ".###.", "..#.."],
        "octagon" => vec![".###.", "#####", "#####", "#####", ".###."],
        "rounded" => vec![".###.", "#####", "#####", "#####", ".###."],
        "circle" => vec!["..#..", ".###.", "#####", ".###.", "..#.."],
        "irregular1" => vec![".##..", "####.", ".####", "..###", "...#."],
        "irregular2" => vec!["#....", "###..", ".####", "..###", "...##"],
        "irregular3" => vec!["..##.", ".####", "#####", "####.", ".##.."],
        "h" => vec!["#.#.#", "#.#.#", "#####", "#.#.#", "#.#.#"],
        "chevron" => vec!["#...#", "##.##", "#####", "##.##", "#...#"],
        "triangle" => vec!["..#..", ".###.", "#####", "#####", "#####"],
        "alcoved" => vec!["##.##", "#####", "#####", "#####", "##.##"],
        _ => return None,
    };
    Some(grid.iter().map(|row| row.chars().map(|c| c == '#').collect()).collect())
}

pub const TEMPLATE_NAMES: &[&str] = &[
    "cross", "diamond", "octagon", "rounded", "circle", "irregular1", "irregular2", "irregular3",
    "h", "chevron", "triangle", "alcoved",
];

/// A room footprint. Every variant reduces to a tile set via [`RoomShape::tiles`].
#[derive(Debug, Clone)]
pub enum RoomShape {
    Rectangle { rect: Rect },
    Composite { rects: Vec<Rect>, variant: CompositeVariant, bbox: Rect },
    Template { mask: Vec<Vec<bool>>, template_name: &'static str, bbox: Rect },
    Cellular { tiles: Vec<Point>, bbox: Rect },
    Polygon { vertices: Vec<Point>, variant: PolygonVariant, bbox: Rect },
}

impl RoomShape {
    /// The canonical tile set of this shape. All drawing routines and
    /// modifiers consume this rather than re-deriving geometry.
    pub fn tiles(&self) -> Vec<Point> {
        match self {
            RoomShape::Rectangle { rect } => rect_tiles(*rect),
            RoomShape::Composite { rects, .. } => {
                let mut seen = HashSet::new();
                let mut out = Vec::new();
                for r in rects {
                    for p in rect_tiles(*r) {
                        if seen.insert(p) {
                            out.push(p);
                        }
                    }
                }
                out
            }
            RoomShape::Template { mask, bbox, .. } => {
                let mut out = Vec::new();
                for (y, row) in mask.iter().enumerate() {
                    for (x, &solid) in row.iter().enumerate() {
                        if solid {
                            out.push(Point::new(bbox.x + x as i32, bbox.y + y as i32));
                        }
                    }
                }
                out
            }
            RoomShape::Cellular { tiles, .. } => tiles.clone(),
            RoomShape::Polygon { vertices, bbox, .. } => rasterize_polygon(vertices, *bbox),
        }
    }

    /// Integer centroid of this shape's tile set.
    pub fn center(&self) -> Point {
        let tiles = self.tiles();
        if tiles.is_empty() {
            return self.bbox().center();
        }
        let (mut sx, mut sy) = (0i64, 0i64);
        for p in &tiles {
            sx += p.x as i64;
            sy += p.y as i64;
        }
        let n = tiles.len() as i64;
        Point::new((sx / n) as i32, (sy / n) as i32)
    }

    pub fn bbox(&self) -> Rect {
        match self {
            RoomShape::Rectangle { rect } => *rect,
            RoomShape::Composite { bbox, .. }
            | RoomShape::Template { bbox, .. }
            | RoomShape::Cellular { bbox, .. }
            | RoomShape::Polygon { bbox, .. } => *bbox,
        }
    }

    pub fn fits_in(&self, bounds: Rect) -> bool {
        let b = self.bbox();
        b.width <= bounds.width && b.height <= bounds.height
    }
}

fn rect_tiles(rect: Rect) -> Vec<Point> {
    let mut out = Vec::with_capacity(rect.width * rect.height);
    for y in 0..rect.height as i32 {
        for x in 0..rect.width as i32 {
            out.push(Point::new(rect.x + x, rect.y + y));
        }
    }
    out
}

fn rasterize_polygon(vertices: &[Point], bbox: Rect) -> Vec<Point> {
    let mut out = Vec::new();
    if vertices.len() < 3 {
        return out;
    }
    let y0 = bbox.y;
    let y1 = bbox.y + bbox.height as i32;
    for y in y0..y1 {
        let yf = y as f64 + 0.5;
        let mut xs = Vec::new();
        for i in 0..vertices.len() {
            let a = vertices[i];
            let b = vertices[(i + 1) % vertices.len()];
            let (ay, by) = (a.y as f64, b.y as f64);
            if (ay <= yf && by > yf) || (by <= yf && ay > yf) {
                let t = (yf - ay) / (by - ay);
                let x = a.x as f64 + t * (b.x as f64 - a.x as f64);
                xs.push(x);
            }
        }
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in xs.chunks(2) {
            if let [lo, hi] = pair {
                let (lo, hi) = (lo.round() as i32, hi.round() as i32);
                for x in lo..=hi {
                    out.push(Point::new(x, y));
                }
            }
        }
    }
    out
}

fn polygon_vertices(bbox: Rect, variant: PolygonVariant) -> Vec<Point> {
    let n = variant.vertex_count();
    let cx = bbox.x as f64 + bbox.width as f64 / 2.0;
    let cy = bbox.y as f64 + bbox.height as f64 / 2.0;
    let rx = bbox.width as f64 / 2.0;
    let ry = bbox.height as f64 / 2.0;
    (0..n)
        .map(|i| {
            let angle = std::f64::consts::TAU * (i as f64) / (n as f64) - std::f64::consts::FRAC_PI_2;
            Point::new((cx + rx * angle.cos()).round() as i32, (cy + ry * angle.sin()).round() as i32)
        })
        .collect()
}

/// Options for the shape factory.
#[derive(Debug, Clone)]
pub struct ShapeOptions {
    pub allowed_shapes: Vec<ShapeKind>,
    pub cellular_density: f64,
    pub cellular_iterations: usize,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            allowed_shapes: vec![
                ShapeKind::Rectangle,
                ShapeKind::Composite,
                ShapeKind::Template,
                ShapeKind::Cellular,
                ShapeKind::Polygon,
            ],
            cellular_density: 0.45,
            cellular_iterations: 4,
        }
    }
}

/// Given a bounding rect and options, produces a [`RoomShape`] (§4.2).
/// Filters `allowed_shapes` to variants that fit `bounds`, weighted-picks
/// among the survivors, and falls back to [`RoomShape::Rectangle`] if none
/// fit.
pub fn generate_room_shape(bounds: Rect, options: &ShapeOptions, rng: &mut Rng) -> RoomShape {
    let candidates: Vec<ShapeKind> = options
        .allowed_shapes
        .iter()
        .copied()
        .filter(|k| fits_threshold(*k, bounds))
        .collect();

    if candidates.is_empty() {
        return RoomShape::Rectangle { rect: bounds };
    }

    let weights = vec![1.0; candidates.len()];
    let idx = rng.weighted(&weights).unwrap_or(0);
    match candidates[idx] {
        ShapeKind::Rectangle => RoomShape::Rectangle { rect: bounds },
        ShapeKind::Composite => composite_shape(bounds, rng),
        ShapeKind::Template => template_shape(bounds, rng),
        ShapeKind::Cellular => cellular_shape(bounds, options, rng),
        ShapeKind::Polygon => polygon_shape(bounds, rng),
    }
}

fn fits_threshold(kind: ShapeKind, bounds: Rect) -> bool {
    let (w, h) = (bounds.width, bounds.height);
    match kind {
        ShapeKind::Rectangle => w >= 3 && h >= 3,
        ShapeKind::Composite => w >= 6 && h >= 6,
        ShapeKind::Template => w >= 5 && h >= 5,
        ShapeKind::Cellular => w >= 5 && h >= 5,
        ShapeKind::Polygon => w >= 5 && h >= 5,
    }
}

fn composite_shape(bounds: Rect, rng: &mut Rng) -> RoomShape {
    let variants = [
        CompositeVariant::L,
        CompositeVariant::T,
        CompositeVariant::Cross,
        CompositeVariant::U,
        CompositeVariant::Z,
        CompositeVariant::Random,
    ];
    let variant = *rng.pick(&variants).unwrap();
    let arm = (bounds.width.min(bounds.height) / 2).max(1).min(2);

    let rects = match variant {
        CompositeVariant::L => {
            let mut rs = vec![
                Rect::new(bounds.x, bounds.y, bounds.width, arm),
                Rect::new(bounds.x, bounds.y, arm, bounds.height),
            ];
            if rng.chance(0.5) {
                rs = rs.into_iter().map(|r| mirror_within(r, bounds)).collect();
            }
            rs
        }
        CompositeVariant::T => vec![
            Rect::new(bounds.x, bounds.y, bounds.width, arm),
            Rect::new(
                bounds.x + (bounds.width as i32 - arm as i32) / 2,
                bounds.y,
                arm,
                bounds.height,
            ),
        ],
        CompositeVariant::Cross => vec![
            Rect::new(
                bounds.x,
                bounds.y + (bounds.height as i32 - arm as i32) / 2,
                bounds.width,
                arm,
            ),
            Rect::new(
                bounds.x + (bounds.width as i32 - arm as i32) / 2,
                bounds.y,
                arm,
                bounds.height,
            ),
        ],
        CompositeVariant::U => vec![
            Rect::new(bounds.x, bounds.y, arm, bounds.height),
            Rect::new(bounds.x + bounds.width as i32 - arm as i32, bounds.y, arm, bounds.height),
            Rect::new(
                bounds.x,
                bounds.y + bounds.height as i32 - arm as i32,
                bounds.width,
                arm,
            ),
        ],
        CompositeVariant::Z => {
            let rs = vec![
                Rect::new(bounds.x, bounds.y, bounds.width, arm),
                Rect::new(
                    bounds.x,
                    bounds.y + bounds.height as i32 - arm as i32,
                    bounds.width,
                    arm,
                ),
            ];
            if rng.chance(0.5) {
                rs.into_iter().map(|r| mirror_within(r, bounds)).collect()
            } else {
                rs
            }
        }
        CompositeVariant::Random => {
            let n = rng.range_usize(2, 5);
            (0..n)
                .map(|_| {
                    let w = rng.range_usize(bounds.width / 2, bounds.width + 1).max(2);
                    let h = rng.range_usize(bounds.height / 2, bounds.height + 1).max(2);
                    let x = bounds.x + rng.range(0, (bounds.width - w.min(bounds.width) + 1) as i32).max(0);
                    let y = bounds.y + rng.range(0, (bounds.height - h.min(bounds.height) + 1) as i32).max(0);
                    Rect::new(x, y, w.min(bounds.width), h.min(bounds.height))
                })
                .collect()
        }
    };

    let bbox = Rect::union(&rects).unwrap_or(bounds);
    RoomShape::Composite { rects, variant, bbox }
}

fn mirror_within(r: Rect, bounds: Rect) -> Rect {
    let mirrored_x = bounds.x + bounds.width as i32 - (r.x - bounds.x) - r.width as i32;
    Rect::new(mirrored_x, r.y, r.width, r.height)
}

fn template_shape(bounds: Rect, rng: &mut Rng) -> RoomShape {
    let name = *rng.pick(TEMPLATE_NAMES).unwrap();
    let mut mask = template_mask(name).unwrap();

    let rotations = rng.range_usize(0, 4);
    for _ in 0..rotations {
        mask = rotate_mask_cw(&mask);
    }
    if rng.chance(0.5) {
        mask = mirror_mask(&mask);
    }
    mask = scale_mask(&mask, bounds.width, bounds.height);

    RoomShape::Template { mask, template_name: name, bbox: bounds }
}

fn rotate_mask_cw(mask: &[Vec<bool>]) -> Vec<Vec<bool>> {
    let h = mask.len();
    let w = if h > 0 { mask[0].len() } else { 0 };
    let mut out = vec![vec![false; h]; w];
    for y in 0..h {
        for x in 0..w {
            out[x][h - 1 - y] = mask[y][x];
        }
    }
    out
}

fn mirror_mask(mask: &[Vec<bool>]) -> Vec<Vec<bool>> {
    mask.iter()
        .map(|row| row.iter().rev().copied().collect())
        .collect()
}

fn scale_mask(mask: &[Vec<bool>], width: usize, height: usize) -> Vec<Vec<bool>> {
    let src_h = mask.len().max(1);
    let src_w = mask[0].len().max(1);
    (0..height)
        .map(|y| {
            let sy = (y * src_h / height.max(1)).min(src_h - 1);
            (0..width)
                .map(|x| {
                    let sx = (x * src_w / width.max(1)).min(src_w - 1);
                    mask[sy][sx]
                })
                .collect()
        })
        .collect()
}

fn cellular_shape(bounds: Rect, options: &ShapeOptions, rng: &mut Rng) -> RoomShape {
    let (w, h) = (bounds.width, bounds.height);
    let mut live = vec![vec![false; w]; h];
    for row in live.iter_mut() {
        for cell in row.iter_mut() {
            *cell = rng.chance(options.cellular_density);
        }
    }

    for _ in 0..options.cellular_iterations {
        let mut next = vec![vec![false; w]; h];
        for y in 0..h {
            for x in 0..w {
                let neighbors = moore_count(&live, x as i32, y as i32, w, h);
                next[y][x] = if live[y][x] {
                    neighbors >= 3
                } else {
                    neighbors >= 4
                };
            }
        }
        live = next;
    }

    let region = largest_region(&live, w, h);
    if region.is_empty() {
        let shrunk = Rect::new(bounds.x + 1, bounds.y + 1, bounds.width.saturating_sub(2), bounds.height.saturating_sub(2));
        return RoomShape::Cellular { tiles: rect_tiles(shrunk), bbox: bounds };
    }

    let tiles: Vec<Point> = region
        .into_iter()
        .map(|(x, y)| Point::new(bounds.x + x as i32, bounds.y + y as i32))
        .collect();
    RoomShape::Cellular { tiles, bbox: bounds }
}

fn moore_count(live: &[Vec<bool>], x: i32, y: i32, w: usize, h: usize) -> usize {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 || nx as usize >= w || ny as usize >= h {
                count += 1; // edges treated as walls
            } else if live[ny as usize][nx as usize] {
                count += 1;
            }
        }
    }
    count
}

fn largest_region(live: &[Vec<bool>], w: usize, h: usize) -> Vec<(usize, usize)> {
    let mut visited = vec![vec![false; w]; h];
    let mut best = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if live[y][x] && !visited[y][x] {
                let mut region = Vec::new();
                let mut stack = vec![(x, y)];
                visited[y][x] = true;
                while let Some((cx, cy)) = stack.pop() {
                    region.push((cx, cy));
                    for (nx, ny) in [
                        (cx.wrapping_sub(1), cy),
                        (cx + 1, cy),
                        (cx, cy.wrapping_sub(1)),
                        (cx, cy + 1),
                    ] {
                        if nx < w && ny < h && live[ny][nx] && !visited[ny][nx] {
                            visited[ny][nx] = true;
                            stack.push((nx, ny));
                        }
                    }
                }
                if region.len() > best.len() {
                    best = region;
                }
            }
        }
    }
    best
}

fn polygon_shape(bounds: Rect, rng: &mut Rng) -> RoomShape {
    let variants = [
        PolygonVariant::Hex,
        PolygonVariant::Oct,
        PolygonVariant::Circle,
        PolygonVariant::Ellipse,
        PolygonVariant::Diamond,
    ];
    let variant = *rng.pick(&variants).unwrap();
    let vertices = polygon_vertices(bounds, variant);
    RoomShape::Polygon { vertices, variant, bbox: bounds }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_tiles_cover_full_area() {
        let shape = RoomShape::Rectangle { rect: Rect::new(0, 0, 4, 3) };
        assert_eq!(shape.tiles().len(), 12);
    }

    #[test]
    fn template_rotation_swaps_dimensions() {
        let mask = template_mask("cross").unwrap();
        let rotated = rotate_mask_cw(&mask);
        assert_eq!(rotated.len(), mask[0].len());
        assert_eq!(rotated[0].len(), mask.len());
    }

    #[test]
    fn cellular_shape_fits_in_bounds() {
        let bounds = Rect::new(0, 0, 12, 12);
        let mut rng = Rng::new(7);
        let shape = cellular_shape(bounds, &ShapeOptions::default(), &mut rng);
        assert!(shape.tiles().iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn generate_room_shape_falls_back_to_rectangle_when_too_small() {
        let bounds = Rect::new(0, 0, 3, 3);
        let options = ShapeOptions { allowed_shapes: vec![ShapeKind::Composite], ..Default::default() };
        let mut rng = Rng::new(1);
        let shape = generate_room_shape(bounds, &options, &mut rng);
        assert!(matches!(shape, RoomShape::Rectangle { .. }));
    }

    #[test]
    fn polygon_tiles_stay_within_bbox() {
        let bounds = Rect::new(2, 2, 9, 9);
        let shape = RoomShape::Polygon {
            vertices: polygon_vertices(bounds, PolygonVariant::Diamond),
            variant: PolygonVariant::Diamond,
            bbox: bounds,
        };
        assert!(shape.tiles().iter().all(|p| bounds.contains(*p)));
    }
}
