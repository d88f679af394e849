use std::fs;
use std::path::Path;

use serde::Deserialize;

use potato_core::{GameKey, KeyTransition};

use crate::world::{World, WorldEvent};

const SUPPORTED_VERSION: &str = "1";

const fn default_repeat() -> u32 {
    1
}

/// Key state for one tick. Omitted keys are up; `repeat` stretches the
/// frame over that many ticks.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReplayFrame {
    #[serde(default)]
    pub move_left: bool,
    #[serde(default)]
    pub move_right: bool,
    #[serde(default)]
    pub jump: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

#[derive(Debug, Deserialize)]
pub struct ReplayScript {
    pub version: String,
    pub frames: Vec<ReplayFrame>,
}

impl ReplayScript {
    pub fn validate(&self) -> Result<(), String> {
        if self.version != SUPPORTED_VERSION {
            return Err(format!(
                "Replay validation failed: unsupported version {:?} (supported: {SUPPORTED_VERSION})",
                self.version
            ));
        }
        if self.frames.is_empty() {
            return Err("Replay validation failed: no frames".to_string());
        }
        for (i, frame) in self.frames.iter().enumerate() {
            if frame.repeat == 0 {
                return Err(format!(
                    "Replay validation failed: frame {i} has repeat 0"
                ));
            }
        }
        Ok(())
    }

    /// Frames with repeats unrolled, one entry per tick.
    pub fn expanded_frames(&self) -> Vec<ReplayFrame> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat {
                out.push(*frame);
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplayScript, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read replay file {}: {e}", path.display()))?;
    let script: ReplayScript = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    script.validate()?;
    Ok(script)
}

#[derive(Debug, Default)]
struct HeldKeys {
    left: bool,
    right: bool,
    jump: bool,
}

fn edge(out: &mut Vec<KeyTransition>, key: GameKey, want: bool, held: &mut bool) {
    if want != *held {
        out.push(KeyTransition { key, pressed: want });
        *held = want;
    }
}

/// The key edges needed to move the held state to this frame's state.
fn frame_transitions(held: &mut HeldKeys, frame: &ReplayFrame) -> Vec<KeyTransition> {
    let mut out = Vec::new();
    edge(&mut out, GameKey::MoveLeft, frame.move_left, &mut held.left);
    edge(&mut out, GameKey::MoveRight, frame.move_right, &mut held.right);
    edge(&mut out, GameKey::Jump, frame.jump, &mut held.jump);
    out
}

/// Plays the script against a world, one tick per expanded frame, and
/// returns every event the run produced.
pub fn drive(world: &mut World, script: &ReplayScript) -> Vec<WorldEvent> {
    let mut held = HeldKeys::default();
    let mut events = Vec::new();
    for frame in script.expanded_frames() {
        for transition in frame_transitions(&mut held, &frame) {
            if transition.pressed {
                world.on_key_down(transition.key);
            } else {
                world.on_key_up(transition.key);
            }
        }
        events.extend(world.tick());
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::builtin_levels;
    use crate::tuning::Tuning;

    fn frame(move_left: bool, move_right: bool, jump: bool, repeat: u32) -> ReplayFrame {
        ReplayFrame {
            move_left,
            move_right,
            jump,
            repeat,
        }
    }

    fn temp_file_path(tag: &str) -> std::path::PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .subsec_nanos();
        std::env::temp_dir().join(format!(
            "potato_replay_{tag}_{}_{nanos}.json",
            std::process::id()
        ))
    }

    #[test]
    fn expansion_unrolls_repeats() {
        let script = ReplayScript {
            version: "1".to_string(),
            frames: vec![frame(false, true, false, 3), frame(false, false, true, 1)],
        };
        let expanded = script.expanded_frames();
        assert_eq!(expanded.len(), 4);
        assert!(expanded[2].move_right);
        assert!(expanded[3].jump);
    }

    #[test]
    fn holding_a_key_across_frames_emits_one_edge() {
        let mut held = HeldKeys::default();
        let first = frame_transitions(&mut held, &frame(false, true, false, 1));
        assert_eq!(
            first,
            vec![KeyTransition {
                key: GameKey::MoveRight,
                pressed: true
            }]
        );

        let second = frame_transitions(&mut held, &frame(false, true, false, 1));
        assert!(second.is_empty());

        let third = frame_transitions(&mut held, &frame(false, false, false, 1));
        assert_eq!(
            third,
            vec![KeyTransition {
                key: GameKey::MoveRight,
                pressed: false
            }]
        );
    }

    #[test]
    fn validation_rejects_bad_scripts() {
        let bad_version = ReplayScript {
            version: "9".to_string(),
            frames: vec![frame(false, false, false, 1)],
        };
        assert!(bad_version.validate().unwrap_err().contains("unsupported version"));

        let empty = ReplayScript {
            version: "1".to_string(),
            frames: vec![],
        };
        assert!(empty.validate().unwrap_err().contains("no frames"));

        let zero_repeat = ReplayScript {
            version: "1".to_string(),
            frames: vec![frame(false, true, false, 0)],
        };
        assert!(zero_repeat.validate().unwrap_err().contains("repeat 0"));
    }

    #[test]
    fn load_applies_frame_defaults() {
        let path = temp_file_path("defaults");
        std::fs::write(
            &path,
            r#"{
                "version": "1",
                "frames": [
                    { "move_right": true, "repeat": 30 },
                    { "move_right": true, "jump": true, "repeat": 6 }
                ]
            }"#,
        )
        .unwrap();

        let script = load_replay_from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(script.frames.len(), 2);
        assert!(!script.frames[0].move_left);
        assert!(!script.frames[0].jump);
        assert_eq!(script.frames[0].repeat, 30);
        assert!(script.frames[1].jump);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load_replay_from_path(&temp_file_path("missing")).unwrap_err();
        assert!(err.contains("Failed to read replay file"));
    }

    #[test]
    fn identical_scripts_produce_identical_runs() {
        let script = ReplayScript {
            version: "1".to_string(),
            frames: vec![
                frame(false, true, false, 40),
                frame(false, true, true, 8),
                frame(false, true, false, 120),
                frame(true, false, false, 30),
                frame(false, true, true, 8),
                frame(false, true, false, 94),
            ],
        };
        script.validate().unwrap();

        let defs = builtin_levels();
        let mut a = World::new(Tuning::default(), &defs).unwrap();
        let mut b = World::new(Tuning::default(), &defs).unwrap();

        let events_a = drive(&mut a, &script);
        let events_b = drive(&mut b, &script);

        assert_eq!(events_a, events_b);
        assert_eq!(a.player().position, b.player().position);
        assert_eq!(a.player().velocity, b.player().velocity);
        assert_eq!(a.player().lives, b.player().lives);
        assert_eq!(a.player().score, b.player().score);
        assert_eq!(a.current_level_index(), b.current_level_index());
        assert_eq!(a.phase(), b.phase());
    }
}
