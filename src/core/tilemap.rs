//! Tile map loading and pixel lookup.
//!
//! A map asset is a TOML file:
//!
//! ```toml
//! tile_size = 32
//! rows = ["#####", "#..g#", "#####"]
//!
//! [legend]
//! "#" = { Collidable = true }
//! "." = {}
//! "g" = { Winnable = true }
//! ```
//!
//! Each row string holds one glyph per tile; the legend attaches named
//! boolean properties to every glyph.
use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec2;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const COLLIDABLE: &str = "Collidable";
pub const WINNABLE: &str = "Winnable";

/// Named boolean flags of one tile kind. Absent names read as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileProperties {
    props: BTreeMap<String, bool>,
}

impl TileProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: bool) -> Self {
        self.props.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> bool {
        self.props.get(name).copied().unwrap_or(false)
    }

    pub fn collidable(&self) -> bool {
        self.get(COLLIDABLE)
    }

    pub fn winnable(&self) -> bool {
        self.get(WINNABLE)
    }
}

#[derive(Debug, Deserialize)]
struct MapAsset {
    tile_size: f32,
    rows: Vec<String>,
    legend: BTreeMap<String, BTreeMap<String, bool>>,
}

#[derive(Debug, Clone)]
pub struct TileMap {
    tile_size: f32,
    cols: usize,
    rows: usize,
    // index into `kinds`, row-major
    cells: Vec<usize>,
    kinds: Vec<(char, TileProperties)>,
}

impl TileMap {
    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let map = Self::from_toml_str(&src, path)?;
        log::info!(
            "loaded map {} ({}x{} tiles of {})",
            path.display(),
            map.cols,
            map.rows,
            map.tile_size
        );
        Ok(map)
    }

    pub fn from_toml_str(src: &str, origin: &Path) -> Result<Self> {
        let asset: MapAsset =
            toml::from_str(src).map_err(|source| Error::MapParse { path: origin.to_path_buf(), source })?;
        let mut legend = Vec::with_capacity(asset.legend.len());
        for (key, props) in asset.legend {
            let mut chars = key.chars();
            let glyph = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(Error::Map(format!("legend key {key:?} must be a single character"))),
            };
            let mut tp = TileProperties::new();
            for (name, value) in props {
                tp = tp.with(&name, value);
            }
            legend.push((glyph, tp));
        }
        let rows: Vec<&str> = asset.rows.iter().map(String::as_str).collect();
        Self::from_rows(asset.tile_size, &rows, legend)
    }

    /// Builds a map from glyph rows. Unknown glyphs and short rows become solid
    /// tiles; a map without any winnable tile gets one at its farthest free cell.
    pub fn from_rows(tile_size: f32, rows: &[&str], legend: Vec<(char, TileProperties)>) -> Result<Self> {
        if !(tile_size > 0.0) {
            return Err(Error::Map(format!("tile_size must be positive, got {tile_size}")));
        }
        let grid: Vec<Vec<char>> = rows
            .iter()
            .map(|r| r.chars().collect::<Vec<char>>())
            .filter(|r| !r.is_empty())
            .collect();
        if grid.is_empty() {
            return Err(Error::Map("map has no rows".to_string()));
        }

        let mut kinds = legend;
        let solid = match kinds.iter().position(|(_, p)| p.collidable()) {
            Some(i) => i,
            None => {
                kinds.push(('#', TileProperties::new().with(COLLIDABLE, true)));
                kinds.len() - 1
            }
        };

        let cols = grid.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut cells = Vec::with_capacity(cols * grid.len());
        for (j, row) in grid.iter().enumerate() {
            for i in 0..cols {
                let kind = match row.get(i) {
                    Some(&c) => match kinds.iter().position(|(g, _)| *g == c) {
                        Some(k) => k,
                        None => {
                            log::warn!("unknown tile {c:?} at row {j} col {i}, treating as solid");
                            solid
                        }
                    },
                    None => solid,
                };
                cells.push(kind);
            }
        }

        let mut map = Self { tile_size, cols, rows: grid.len(), cells, kinds };
        map.ensure_exit();
        Ok(map)
    }

    fn ensure_exit(&mut self) {
        if self.cells.iter().any(|&k| self.kinds[k].1.winnable()) {
            return;
        }
        let mut best: Option<(usize, usize)> = None;
        for j in 0..self.rows {
            for i in 0..self.cols {
                if self.kinds[self.cells[j * self.cols + i]].1.collidable() { continue; }
                let d = i * i + j * j;
                if best.map(|b| d > b.1).unwrap_or(true) { best = Some((j * self.cols + i, d)); }
            }
        }
        let Some((idx, _)) = best else {
            log::warn!("map has no free cell to place an exit on");
            return;
        };
        let exit = match self.kinds.iter().position(|(_, p)| p.winnable() && !p.collidable()) {
            Some(k) => k,
            None => {
                self.kinds.push(('g', TileProperties::new().with(WINNABLE, true)));
                self.kinds.len() - 1
            }
        };
        log::warn!("map has no winnable tile, placing exit at col {} row {}", idx % self.cols, idx / self.cols);
        self.cells[idx] = exit;
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Map extent in world units.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.cols as f32 * self.tile_size, self.rows as f32 * self.tile_size)
    }

    pub fn cell_at_pixel(&self, p: Vec2) -> Option<(usize, usize)> {
        let i = (p.x / self.tile_size).floor();
        let j = (p.y / self.tile_size).floor();
        if !(i >= 0.0 && j >= 0.0) { return None; }
        let (i, j) = (i as usize, j as usize);
        if i >= self.cols || j >= self.rows { return None; }
        Some((i, j))
    }

    /// Properties of the tile under `p`, `None` off the map.
    pub fn get_at_pixel(&self, p: Vec2) -> Option<&TileProperties> {
        let (i, j) = self.cell_at_pixel(p)?;
        self.tile(i, j)
    }

    pub fn tile(&self, col: usize, row: usize) -> Option<&TileProperties> {
        if col >= self.cols || row >= self.rows { return None; }
        Some(&self.kinds[self.cells[row * self.cols + col]].1)
    }

    /// Glyph of the tile, used by the renderer to pick a texture.
    pub fn glyph(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.cols || row >= self.rows { return None; }
        Some(self.kinds[self.cells[row * self.cols + col]].0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legend() -> Vec<(char, TileProperties)> {
        vec![
            ('#', TileProperties::new().with(COLLIDABLE, true)),
            ('.', TileProperties::new()),
            ('g', TileProperties::new().with(WINNABLE, true)),
        ]
    }

    #[test]
    fn lookup_by_pixel() {
        let map = TileMap::from_rows(32.0, &["###", "#.g", "###"], legend()).unwrap();
        assert_eq!(map.pixel_size(), Vec2::new(96.0, 96.0));
        assert!(map.get_at_pixel(Vec2::new(5.0, 5.0)).unwrap().collidable());
        let floor = map.get_at_pixel(Vec2::new(40.0, 40.0)).unwrap();
        assert!(!floor.collidable() && !floor.winnable());
        assert!(map.get_at_pixel(Vec2::new(64.0, 63.9)).unwrap().winnable());
        assert!(map.get_at_pixel(Vec2::new(-0.1, 10.0)).is_none());
        assert!(map.get_at_pixel(Vec2::new(10.0, 96.0)).is_none());
        assert!(map.get_at_pixel(Vec2::new(f32::NAN, 10.0)).is_none());
    }

    #[test]
    fn short_rows_and_unknown_glyphs_become_solid() {
        let map = TileMap::from_rows(10.0, &["..g", ".", ".?."], legend()).unwrap();
        assert_eq!(map.cols(), 3);
        assert!(map.tile(1, 1).unwrap().collidable());
        assert!(map.tile(2, 1).unwrap().collidable());
        assert!(map.tile(1, 2).unwrap().collidable());
        assert_eq!(map.glyph(1, 2), Some('#'));
    }

    #[test]
    fn exit_is_placed_when_missing() {
        let map = TileMap::from_rows(10.0, &["....", "..#.", "...#"], legend()).unwrap();
        // farthest free cell from the origin is (3, 1)
        assert!(map.tile(3, 1).unwrap().winnable());
        assert_eq!(map.glyph(3, 1), Some('g'));
        assert!(!map.tile(2, 2).unwrap().winnable());
    }

    #[test]
    fn exit_without_legend_entry_is_synthesized() {
        let legend = vec![('#', TileProperties::new().with(COLLIDABLE, true)), ('.', TileProperties::new())];
        let map = TileMap::from_rows(10.0, &["..", ".#"], legend).unwrap();
        assert!(map.tile(1, 0).unwrap().winnable());
        assert!(!map.tile(0, 1).unwrap().winnable());
    }

    #[test]
    fn parses_toml_asset() {
        let src = r##"
            tile_size = 16
            rows = ["#.#", "#g#"]

            [legend]
            "#" = { Collidable = true }
            "." = {}
            "g" = { Winnable = true, Shiny = true }
        "##;
        let map = TileMap::from_toml_str(src, Path::new("inline.toml")).unwrap();
        assert_eq!(map.tile_size(), 16.0);
        let exit = map.get_at_pixel(Vec2::new(20.0, 20.0)).unwrap();
        assert!(exit.winnable());
        assert!(exit.get("Shiny"));
        assert!(!exit.get("Slippery"));
    }

    #[test]
    fn rejects_bad_assets() {
        let multi = "tile_size = 8\nrows = [\".\"]\n[legend]\n\"ab\" = {}\n";
        assert!(matches!(TileMap::from_toml_str(multi, Path::new("m")), Err(Error::Map(_))));
        assert!(matches!(TileMap::from_rows(0.0, &["."], legend()), Err(Error::Map(_))));
        assert!(matches!(TileMap::from_rows(8.0, &[], legend()), Err(Error::Map(_))));
        assert!(matches!(TileMap::from_toml_str("rows = 3", Path::new("m")), Err(Error::MapParse { .. })));
    }

    #[test]
    fn bundled_desert_map_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/maps/desert.toml");
        let map = TileMap::load(&path).unwrap();
        assert_eq!(map.pixel_size(), Vec2::new(1280.0, 1280.0));
        let spawn = crate::config::MapConfig::default().spawn();
        assert!(!map.get_at_pixel(spawn).unwrap().collidable());
    }
}
