//! Scene entity - one narrative unit of a generated script
//!
//! Scenes carry their wire shape directly: the JSON emitted by the engine,
//! the exported `scenes.json` file, and the schema sent to the provider all
//! share these field names.

use serde::{Deserialize, Serialize};

/// A character appearing in a scene
///
/// There is no identity beyond the name; a character appearing in several
/// scenes is repeated in each, not referenced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub description: String,
}

/// A single scene of the script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Position in the script, assigned by generation starting at 1
    pub scene_id: u32,
    pub setting: String,
    pub time: String,
    pub location: String,
    pub characters: Vec<Character>,
    pub dialogue: String,
    /// Provider-estimated duration; not authoritative
    #[serde(default)]
    pub scene_length_seconds: u32,
}

/// The `scene_id` of the final scene, or 0 for an empty list
pub fn last_scene_id(scenes: &[Scene]) -> u32 {
    scenes.last().map(|s| s.scene_id).unwrap_or(0)
}

/// Sum of `scene_length_seconds` across the list
pub fn total_duration_seconds(scenes: &[Scene]) -> u64 {
    scenes.iter().map(|s| u64::from(s.scene_length_seconds)).sum()
}

/// Check that scene ids form `expected_start, expected_start + 1, ...`
///
/// Returns a description of the first violation. The list is never re-sorted;
/// out-of-order provider output is an error, not something to repair.
pub fn validate_sequence(scenes: &[Scene], expected_start: u32) -> Result<(), String> {
    for (offset, scene) in scenes.iter().enumerate() {
        let expected = expected_start.checked_add(offset as u32).ok_or_else(|| {
            format!("scene numbering exceeds the maximum id at position {}", offset)
        })?;
        if scene.scene_id != expected {
            return Err(format!(
                "expected scene_id {} at position {}, got {}",
                expected, offset, scene.scene_id
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(id: u32, seconds: u32) -> Scene {
        Scene {
            scene_id: id,
            setting: "A quiet street".to_string(),
            time: "Morning".to_string(),
            location: "Downtown".to_string(),
            characters: vec![],
            dialogue: String::new(),
            scene_length_seconds: seconds,
        }
    }

    #[test]
    fn test_last_scene_id_empty_list_is_zero() {
        assert_eq!(last_scene_id(&[]), 0);
    }

    #[test]
    fn test_last_scene_id_takes_final_element() {
        let scenes = vec![scene(1, 10), scene(2, 15), scene(5, 20)];
        assert_eq!(last_scene_id(&scenes), 5);
    }

    #[test]
    fn test_total_duration_sums_all_scenes() {
        let scenes = vec![scene(1, 10), scene(2, 15)];
        assert_eq!(total_duration_seconds(&scenes), 25);
        assert_eq!(total_duration_seconds(&[]), 0);
    }

    #[test]
    fn test_missing_scene_length_defaults_to_zero() {
        let json = r#"{
            "scene_id": 1,
            "setting": "Park",
            "time": "Noon",
            "location": "City park",
            "characters": [],
            "dialogue": "A: Hello."
        }"#;
        let parsed: Scene = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.scene_length_seconds, 0);
    }

    #[test]
    fn test_validate_sequence_accepts_contiguous_ids() {
        let scenes = vec![scene(3, 10), scene(4, 10), scene(5, 10)];
        assert!(validate_sequence(&scenes, 3).is_ok());
        assert!(validate_sequence(&[], 1).is_ok());
    }

    #[test]
    fn test_validate_sequence_rejects_gap() {
        let scenes = vec![scene(1, 10), scene(3, 10)];
        let err = validate_sequence(&scenes, 1).unwrap_err();
        assert!(err.contains("expected scene_id 2"));
    }

    #[test]
    fn test_validate_sequence_near_max_id_errors_instead_of_wrapping() {
        // Ids may legitimately sit at the maximum...
        let scenes = vec![scene(u32::MAX, 10)];
        assert!(validate_sequence(&scenes, u32::MAX).is_ok());

        // ...but numbering can never continue past it
        let scenes = vec![scene(u32::MAX, 10), scene(0, 10)];
        let err = validate_sequence(&scenes, u32::MAX).unwrap_err();
        assert!(err.contains("maximum id"));
    }

    #[test]
    fn test_validate_sequence_rejects_wrong_start() {
        let scenes = vec![scene(2, 10), scene(3, 10)];
        assert!(validate_sequence(&scenes, 1).is_err());
    }
}
