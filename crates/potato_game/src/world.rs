//! The world: one player, a list of levels, and a deterministic tick.
//!
//! `tick` is the only mutation entry point besides the key handlers, and it
//! always runs the same order:
//!
//! 1. drain queued key transitions into the player
//! 2. integrate motion (jump trigger, velocity, scroll carry, edge clamp)
//! 3. resolve overlaps against the current level's items
//! 4. restage gravity if no platform grounded the player this tick
//! 5. check the lethal field bounds (left edge, bottom)
//! 6. advance the scroll and, on a latched finish, the level
//!
//! Everything observable about a tick comes back as `WorldEvent`s; hosts
//! render and play sounds off those instead of poking at internals.

use glam::Vec2;

use potato_core::{GameKey, InputQueue};

use crate::items::ItemKind;
use crate::level::{validate_level_defs, Level, LevelDef};
use crate::player::{PlatformContact, Player};
use crate::score::ScoreBoard;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldPhase {
    Running,
    /// All lives spent. Terminal.
    GameOver,
    /// Every level finished. Terminal.
    Complete,
}

/// Everything noteworthy a tick can produce, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEvent {
    /// The player touched a trap and started the death arc.
    TrapSprung { position: Vec2 },
    /// A death was finalized at the field bounds.
    LifeLost { lives_left: u32 },
    /// The player was placed back into the level after a death.
    Respawned { position: Vec2 },
    /// The current level's finish was touched for the first time.
    LevelFinished { level: usize, score: u64 },
    /// Play moved on to the given level index.
    LevelAdvanced { level: usize },
    /// The last level was finished.
    RunComplete { score: u64, new_high: bool },
    /// The last life was spent.
    GameOver { score: u64, new_high: bool },
}

#[derive(Debug)]
pub struct World {
    tuning: Tuning,
    levels: Vec<Level>,
    current_level: usize,
    player: Player,
    input: InputQueue,
    scores: ScoreBoard,
    phase: WorldPhase,
}

impl World {
    pub fn new(tuning: Tuning, defs: &[LevelDef]) -> Result<Self, String> {
        tuning.validate()?;
        validate_level_defs(defs, &tuning)?;
        let levels: Vec<Level> = defs
            .iter()
            .enumerate()
            .map(|(index, def)| Level::from_def(def, index, &tuning))
            .collect();
        let player = Player::new(levels[0].start_position, &tuning);
        Ok(Self {
            tuning,
            levels,
            current_level: 0,
            player,
            input: InputQueue::default(),
            scores: ScoreBoard::default(),
            phase: WorldPhase::Running,
        })
    }

    pub fn on_key_down(&mut self, key: GameKey) {
        if self.phase == WorldPhase::Running {
            self.input.key_down(key);
        }
    }

    pub fn on_key_up(&mut self, key: GameKey) {
        if self.phase == WorldPhase::Running {
            self.input.key_up(key);
        }
    }

    /// Advances the simulation by one tick and reports what happened.
    /// Terminal phases are inert: no input, no motion, no events.
    pub fn tick(&mut self) -> Vec<WorldEvent> {
        let mut events = Vec::new();
        if self.phase != WorldPhase::Running {
            return events;
        }

        for transition in self.input.drain() {
            self.player.apply_transition(transition, &self.tuning);
        }

        let scroll = self.levels[self.current_level].scroll_vector;
        self.player.integrate(scroll, &self.tuning);

        let grounded = self.run_collision_pass(&mut events);
        self.player.apply_gravity(grounded, &self.tuning);

        // The left edge and the bottom kill; death is checked on the
        // resolved position so a landing this tick still counts as safe.
        let field = self.tuning.field_size();
        if self.player.position.x <= 0.0 || self.player.position.y > field.y {
            self.apply_death(&mut events);
        }

        if self.phase == WorldPhase::Running {
            self.levels[self.current_level].advance_scroll();
            if self.levels[self.current_level].is_finished() {
                self.advance_level(&mut events);
            }
        }

        log::trace!(
            "tick: pos {:?} vel {:?} grounded {} dying {}",
            self.player.position,
            self.player.velocity,
            self.player.on_ground,
            self.player.dying
        );

        events
    }

    /// Resolves the player against every item of the current level, in item
    /// order. Returns whether a platform grounded the player this tick.
    fn run_collision_pass(&mut self, events: &mut Vec<WorldEvent>) -> bool {
        // A dying player is a ghost: it keeps its death arc and falls
        // through everything until the bounds finalize the death.
        if self.player.dying {
            return false;
        }

        let mut grounded = false;
        let level_index = self.current_level;
        let offset = self.levels[level_index].scroll_offset;
        let item_count = self.levels[level_index].items.len();

        for idx in 0..item_count {
            let item = self.levels[level_index].items[idx];
            let bounds = item.bounds(offset);
            if !self.player.bounds().overlaps(&bounds) {
                continue;
            }
            match item.kind {
                ItemKind::Platform => {
                    // The first top contact in item order authors the
                    // grounded state and the respawn anchor.
                    let contact = self.player.resolve_platform(bounds, !grounded);
                    if contact == PlatformContact::Top && !grounded {
                        grounded = true;
                        self.player.respawn_anchor = Some(idx);
                    }
                }
                ItemKind::Trap => {
                    self.player.hit_trap(bounds, &self.tuning);
                    events.push(WorldEvent::TrapSprung {
                        position: bounds.center(),
                    });
                    // The death arc overrides any ground claimed earlier in
                    // this pass and ends the pass.
                    return false;
                }
                ItemKind::Finish => {
                    if !self.levels[level_index].is_finished() {
                        self.levels[level_index].finish();
                        self.player.score += self.tuning.level_clear_points;
                        events.push(WorldEvent::LevelFinished {
                            level: self.levels[level_index].index,
                            score: self.player.score,
                        });
                    }
                }
            }
        }
        grounded
    }

    fn apply_death(&mut self, events: &mut Vec<WorldEvent>) {
        self.player.lives = self.player.lives.saturating_sub(1);
        events.push(WorldEvent::LifeLost {
            lives_left: self.player.lives,
        });
        log::info!(
            "Player died at {:?}; {} lives left",
            self.player.position,
            self.player.lives
        );

        if self.player.lives == 0 {
            let new_high = self.scores.record(self.player.score);
            self.phase = WorldPhase::GameOver;
            events.push(WorldEvent::GameOver {
                score: self.player.score,
                new_high,
            });
            return;
        }

        let position = respawn_point(&self.levels[self.current_level], &self.player);
        self.player.respawn_at(position, &self.tuning);
        events.push(WorldEvent::Respawned { position });
    }

    fn advance_level(&mut self, events: &mut Vec<WorldEvent>) {
        let next = self.current_level + 1;
        if next < self.levels.len() {
            self.current_level = next;
            let level = self.levels[next].index;
            let start = self.levels[next].start_position;
            // Momentum carries over; ground state and the anchor do not,
            // since the anchor indexes the previous level's items.
            self.player.position = start;
            self.player.last_position = start;
            self.player.on_ground = false;
            self.player.respawn_anchor = None;
            log::info!("Advancing to level {level}");
            events.push(WorldEvent::LevelAdvanced { level });
        } else {
            let new_high = self.scores.record(self.player.score);
            self.phase = WorldPhase::Complete;
            events.push(WorldEvent::RunComplete {
                score: self.player.score,
                new_high,
            });
        }
    }

    pub fn phase(&self) -> WorldPhase {
        self.phase
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.current_level]
    }

    pub fn current_level_index(&self) -> usize {
        self.current_level
    }

    pub fn high_score(&self) -> u64 {
        self.scores.high_score()
    }

    pub fn field_size(&self) -> Vec2 {
        self.tuning.field_size()
    }
}

/// Where a death puts the player back: on the right end of the last platform
/// it stood on, unless the scroll has pushed that spot out of play, in which
/// case the level's start point is used.
fn respawn_point(level: &Level, player: &Player) -> Vec2 {
    if let Some(idx) = player.respawn_anchor {
        if let Some(item) = level.items.get(idx) {
            let bounds = item.bounds(level.scroll_offset);
            let x = bounds.max.x - player.size.x;
            if x > 0.0 {
                return Vec2::new(x, bounds.min.y - player.size.y);
            }
        }
    }
    level.start_position
}
