//! Domain model - scenes and the characters that appear in them

mod scene;

pub use scene::{last_scene_id, total_duration_seconds, validate_sequence, Character, Scene};
