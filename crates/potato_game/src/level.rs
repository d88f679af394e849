//! Level definitions and their runtime form.
//!
//! Definitions (`LevelDef`) are authored in grid units so a layout reads as
//! cells rather than pixel soup; `Level::from_def` multiplies positions and
//! sizes by the tuning's block size. The scroll vector is the exception: it
//! is already in pixels per tick, since auto-scroll speed is a pacing knob
//! and not a property of the grid.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use potato_core::Aabb;

use crate::items::{ItemKind, LevelItem};
use crate::tuning::Tuning;

const SUPPORTED_VERSION: &str = "1";

fn default_scroll() -> Vec2 {
    Vec2::new(1.0, 0.0)
}

/// One item in a level definition, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    pub kind: ItemKind,
    pub position: Vec2,
    pub size: Vec2,
}

/// One level in grid units, plus its per-tick scroll in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub start: Vec2,
    #[serde(default = "default_scroll")]
    pub scroll: Vec2,
    pub items: Vec<ItemDef>,
}

/// On-disk shape of a level file.
#[derive(Debug, Deserialize)]
struct LevelsFile {
    version: String,
    levels: Vec<LevelDef>,
}

/// A running level: pixel-space items plus the scroll state.
#[derive(Debug, Clone)]
pub struct Level {
    /// Position in the world's level sequence, reported in events and logs.
    pub index: usize,
    pub start_position: Vec2,
    pub items: Vec<LevelItem>,
    pub scroll_vector: Vec2,
    pub scroll_offset: Vec2,
    finished: bool,
}

impl Level {
    pub fn from_def(def: &LevelDef, index: usize, tuning: &Tuning) -> Self {
        let block = tuning.block_size;
        let items = def
            .items
            .iter()
            .map(|item| LevelItem::new(item.kind, item.position * block, item.size * block))
            .collect();
        Self {
            index,
            start_position: def.start * block,
            items,
            scroll_vector: def.scroll,
            scroll_offset: Vec2::ZERO,
            finished: false,
        }
    }

    pub fn advance_scroll(&mut self) {
        self.scroll_offset += self.scroll_vector;
    }

    /// Latches the finished flag; scoring on it must happen at most once.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Items whose scrolled bounds still intersect the visible field.
    pub fn visible_items(&self, field: Vec2) -> impl Iterator<Item = &LevelItem> + '_ {
        let view = Aabb::from_position_size(Vec2::ZERO, field);
        let offset = self.scroll_offset;
        self.items
            .iter()
            .filter(move |item| item.bounds(offset).overlaps(&view))
    }
}

/// Checks level definitions against the tuning they will run under.
pub fn validate_level_defs(defs: &[LevelDef], tuning: &Tuning) -> Result<(), String> {
    if defs.is_empty() {
        return Err("Level validation failed: no levels defined".to_string());
    }
    let (grid_w, grid_h) = tuning.grid_size;
    for (i, def) in defs.iter().enumerate() {
        if !def.start.is_finite() {
            return Err(format!("Level validation failed: level {i} start is not finite"));
        }
        if def.start.x < 0.0
            || def.start.y < 0.0
            || def.start.x > grid_w as f32
            || def.start.y > grid_h as f32
        {
            return Err(format!(
                "Level validation failed: level {i} start {:?} is outside the {grid_w}x{grid_h} grid",
                def.start
            ));
        }
        if !def.scroll.is_finite() {
            return Err(format!("Level validation failed: level {i} scroll is not finite"));
        }
        for (j, item) in def.items.iter().enumerate() {
            if !item.position.is_finite() {
                return Err(format!(
                    "Level validation failed: level {i} item {j} position is not finite"
                ));
            }
            if !item.size.is_finite() || item.size.x <= 0.0 || item.size.y <= 0.0 {
                return Err(format!(
                    "Level validation failed: level {i} item {j} size must be positive"
                ));
            }
        }
        if !def.items.iter().any(|item| item.kind == ItemKind::Finish) {
            log::warn!("Level {i} has no finish item; it can never be completed");
        }
    }
    Ok(())
}

/// Loads and validates level definitions from a JSON file.
pub fn load_levels_from_path(path: &Path, tuning: &Tuning) -> Result<Vec<LevelDef>, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read level file {}: {e}", path.display()))?;
    let file: LevelsFile = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse level JSON {}: {e}", path.display()))?;
    if file.version != SUPPORTED_VERSION {
        return Err(format!(
            "Level file {} has unsupported version {:?} (supported: {SUPPORTED_VERSION})",
            path.display(),
            file.version
        ));
    }
    validate_level_defs(&file.levels, tuning)?;
    Ok(file.levels)
}
