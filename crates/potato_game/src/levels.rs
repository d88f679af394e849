use glam::Vec2;

use crate::items::ItemKind;
use crate::level::{ItemDef, LevelDef};

fn item(kind: ItemKind, x: f32, y: f32, w: f32, h: f32) -> ItemDef {
    ItemDef {
        kind,
        position: Vec2::new(x, y),
        size: Vec2::new(w, h),
    }
}

/// The default two-level run, laid out in grid units. The second level
/// reuses the first's layout without the platform under the spawn point, so
/// the opening drop demands an immediate move instead of a safe landing.
pub fn builtin_levels() -> Vec<LevelDef> {
    use ItemKind::{Finish, Platform, Trap};

    let common = vec![
        item(Platform, 6.0, 11.0, 2.0, 0.2),
        item(Platform, 8.4, 9.7, 2.0, 0.2),
        item(Platform, 10.8, 8.4, 6.0, 0.2),
        item(Platform, 18.8, 7.6, 0.3, 0.2),
        item(Platform, 18.8, 6.0, 0.3, 0.2),
        item(Platform, 20.4, 6.0, 12.0, 0.2),
        item(Trap, 24.0, 5.4, 1.6, 0.6),
        item(Finish, 31.6, 3.6, 0.8, 2.4),
    ];

    let mut first_items = vec![item(Platform, 1.0, 11.0, 4.0, 0.2)];
    first_items.extend(common.iter().copied());

    let start = Vec2::new(2.0, 2.0);
    let scroll = Vec2::new(1.0, 0.0);

    vec![
        LevelDef {
            start,
            scroll,
            items: first_items,
        },
        LevelDef {
            start,
            scroll,
            items: common,
        },
    ]
}
