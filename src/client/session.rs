//! In-memory scene list held by the client between requests
//!
//! The list is replaced wholesale by a generate response, extended by an
//! expand response, and only ever persisted through a one-shot JSON export.

use crate::domain::{total_duration_seconds, Scene};

/// The client's working scene list
#[derive(Debug, Default)]
pub struct Session {
    scenes: Vec<Scene>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Replace the whole list with a generate response
    pub fn replace(&mut self, scenes: Vec<Scene>) {
        self.scenes = scenes;
    }

    /// Concatenate an expand response onto the existing list
    pub fn append(&mut self, new_scenes: Vec<Scene>) {
        self.scenes.extend(new_scenes);
    }

    pub fn clear(&mut self) {
        self.scenes.clear();
    }

    /// Sum of the provider's per-scene duration estimates
    pub fn total_duration_seconds(&self) -> u64 {
        total_duration_seconds(&self.scenes)
    }

    /// Pretty-printed JSON document of the whole list
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.scenes)
    }

    /// Pretty-printed JSON of a single scene, looked up by id
    pub fn scene_json(&self, scene_id: u32) -> Option<String> {
        self.scenes
            .iter()
            .find(|s| s.scene_id == scene_id)
            .and_then(|s| serde_json::to_string_pretty(s).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Character;

    fn scene(id: u32, seconds: u32) -> Scene {
        Scene {
            scene_id: id,
            setting: "A cafe".to_string(),
            time: "Afternoon".to_string(),
            location: "Corner cafe".to_string(),
            characters: vec![Character {
                name: "A".to_string(),
                description: "A regular".to_string(),
            }],
            dialogue: "A: The usual, please.".to_string(),
            scene_length_seconds: seconds,
        }
    }

    #[test]
    fn test_replace_discards_previous_scenes() {
        let mut session = Session::new();
        session.replace(vec![scene(1, 10), scene(2, 10)]);
        session.replace(vec![scene(1, 5)]);
        assert_eq!(session.len(), 1);
        assert_eq!(session.total_duration_seconds(), 5);
    }

    #[test]
    fn test_append_concatenates_in_order() {
        let mut session = Session::new();
        session.replace(vec![scene(1, 10)]);
        session.append(vec![scene(2, 20), scene(3, 30)]);
        assert_eq!(session.len(), 3);
        assert_eq!(session.scenes()[2].scene_id, 3);
        assert_eq!(session.total_duration_seconds(), 60);
    }

    #[test]
    fn test_export_round_trips() {
        let mut session = Session::new();
        session.replace(vec![scene(1, 10), scene(2, 20)]);

        let json = session.export_json().unwrap();
        let parsed: Vec<Scene> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, session.scenes());
    }

    #[test]
    fn test_scene_json_looks_up_by_id() {
        let mut session = Session::new();
        session.replace(vec![scene(1, 10), scene(2, 20)]);

        let json = session.scene_json(2).unwrap();
        let parsed: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.scene_id, 2);

        assert!(session.scene_json(9).is_none());
    }

    #[test]
    fn test_clear_empties_the_list() {
        let mut session = Session::new();
        session.replace(vec![scene(1, 10)]);
        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.total_duration_seconds(), 0);
    }
}
