//! Script service - turns transcripts into structured scene scripts
//!
//! This service owns the contract with the text-completion provider:
//!
//! - Building the segmentation and continuation prompts
//! - Requesting output constrained to the scene-array schema
//! - Stripping an optional markdown code fence and parsing the JSON
//! - Checking that scene numbering came back contiguous

use crate::application::ports::{CompletionRequest, TextCompletionPort};
use crate::domain::{last_scene_id, validate_sequence, Scene};

/// Sampling temperature for both generate and expand calls
const SAMPLING_TEMPERATURE: f32 = 0.7;

/// Service for generating and extending scene scripts
///
/// # Example
///
/// ```ignore
/// use scenescript::application::services::ScriptService;
/// use scenescript::infrastructure::gemini::GeminiClient;
///
/// let client = GeminiClient::new("https://generativelanguage.googleapis.com", "gemini-2.5-pro", "key");
/// let service = ScriptService::new(client);
///
/// let scenes = service.generate_scenes("A: Hello. B: Hi there.", None).await?;
/// let more = service.expand_scenes(&scenes, 2).await?;
/// ```
pub struct ScriptService<P: TextCompletionPort> {
    provider: P,
}

impl<P: TextCompletionPort> ScriptService<P> {
    /// Create a new script service with the provided completion client
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Segment a transcript into scenes
    ///
    /// The provider is instructed to split on changes of setting, time, or
    /// event, to reuse `character_description` verbatim for the principal
    /// character when given, and to number scenes from 1. Returned numbering
    /// is checked and a mismatch fails loudly rather than being repaired.
    pub async fn generate_scenes(
        &self,
        transcript: &str,
        character_description: Option<&str>,
    ) -> Result<Vec<Scene>, ScriptError> {
        if transcript.trim().is_empty() {
            return Err(ScriptError::EmptyInput);
        }

        let prompt = self.build_generate_prompt(transcript, character_description);
        let scenes = self.complete_and_parse(prompt).await?;

        validate_sequence(&scenes, 1).map_err(ScriptError::SequenceMismatch)?;
        Ok(scenes)
    }

    /// Continue an existing script by exactly `scenes_to_add` scenes
    ///
    /// Numbering continues from the last existing `scene_id` (0 for an empty
    /// list). Only the new scenes are returned; concatenation is the
    /// caller's job. The returned count and numbering are validated.
    pub async fn expand_scenes(
        &self,
        existing_scenes: &[Scene],
        scenes_to_add: u32,
    ) -> Result<Vec<Scene>, ScriptError> {
        let next_id = last_scene_id(existing_scenes).checked_add(1).ok_or_else(|| {
            ScriptError::SequenceMismatch(
                "last existing scene_id is already at the maximum".to_string(),
            )
        })?;
        let prompt = self.build_expand_prompt(existing_scenes, scenes_to_add, next_id);
        let scenes = self.complete_and_parse(prompt).await?;

        if scenes.len() != scenes_to_add as usize {
            return Err(ScriptError::SequenceMismatch(format!(
                "asked for {} new scenes, provider returned {}",
                scenes_to_add,
                scenes.len()
            )));
        }
        validate_sequence(&scenes, next_id).map_err(ScriptError::SequenceMismatch)?;
        Ok(scenes)
    }

    /// Build the segmentation prompt for a fresh transcript
    pub fn build_generate_prompt(
        &self,
        transcript: &str,
        character_description: Option<&str>,
    ) -> String {
        let mut prompt = String::new();

        prompt.push_str(
            "You are an AI assistant that turns dialogue transcripts into structured video \
             scripts as JSON. You will receive a transcript and an optional description of \
             the principal character, and must convert them into a JSON array of scenes.\n\n",
        );

        prompt.push_str("Output format requirements:\n");
        prompt.push_str("- The output must be a JSON array (a list of scenes).\n");
        prompt.push_str(
            "- Each scene is a JSON object with the keys \"scene_id\", \"setting\", \"time\", \
             \"location\", \"characters\", \"dialogue\", and \"scene_length_seconds\".\n",
        );
        prompt.push_str(
            "- \"characters\" must be an array of the character objects appearing in the scene.\n",
        );
        prompt.push_str("- Each character object must have \"name\" and \"description\".\n");
        prompt.push_str(
            "- \"scene_length_seconds\" is an integer estimate of the scene's duration.\n\n",
        );

        prompt.push_str("Processing rules:\n");
        prompt.push_str(
            "1. Read the transcript carefully and split it into logical scenes wherever the \
             setting, time, or event changes.\n",
        );
        prompt.push_str(
            "2. If a character description is provided below, use exactly that description for \
             the principal character in every scene they appear in, so the character stays \
             consistent.\n",
        );
        prompt.push_str(
            "3. If no description is provided, infer a short one from the transcript.\n",
        );
        prompt.push_str(
            "4. Separate the spoken lines and attribute each to the right character in \
             \"dialogue\".\n",
        );
        prompt.push_str("5. Start scene_id at 1.\n\n");

        prompt.push_str("Input data:\n\nTranscript:\n");
        prompt.push_str(transcript);
        prompt.push_str("\n\nPrincipal character description:\n");
        prompt.push_str(character_description.unwrap_or("None provided"));
        prompt.push_str("\n\nNow produce the JSON array as requested.\n");

        prompt
    }

    /// Build the continuation prompt for an expand request
    pub fn build_expand_prompt(
        &self,
        existing_scenes: &[Scene],
        scenes_to_add: u32,
        next_id: u32,
    ) -> String {
        let existing_json = serde_json::to_string_pretty(existing_scenes)
            .unwrap_or_else(|_| "[]".to_string());

        let mut prompt = String::new();

        prompt.push_str(&format!(
            "You are an AI assistant that continues video scripts. Below are the scenes \
             written so far. Based on this context, continue the narrative for exactly {} \
             more scenes.\n\n",
            scenes_to_add
        ));

        prompt.push_str("Output format requirements:\n");
        prompt.push_str("- The format must match the existing scenes exactly.\n");
        prompt.push_str(&format!(
            "- \"scene_id\" must start at {} and increase by 1 per scene.\n\n",
            next_id
        ));

        prompt.push_str("Existing scenes:\n");
        prompt.push_str(&existing_json);
        prompt.push_str(&format!(
            "\n\nNow produce the next {} scenes as JSON. Return only the new scenes, not the \
             existing ones.\n",
            scenes_to_add
        ));

        prompt
    }

    async fn complete_and_parse(&self, prompt: String) -> Result<Vec<Scene>, ScriptError> {
        let request =
            CompletionRequest::new(prompt, response_schema()).with_temperature(SAMPLING_TEMPERATURE);

        let text = self
            .provider
            .complete(request)
            .await
            .map_err(|e| ScriptError::Provider(e.to_string()))?;

        parse_scene_payload(&text)
    }
}

/// The structured-output schema sent with every provider call
///
/// All keys are required on every scene and character object.
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "scene_id": { "type": "INTEGER" },
                "setting": { "type": "STRING" },
                "time": { "type": "STRING" },
                "location": { "type": "STRING" },
                "characters": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": { "type": "STRING" },
                            "description": { "type": "STRING" }
                        },
                        "required": ["name", "description"]
                    }
                },
                "dialogue": { "type": "STRING" },
                "scene_length_seconds": { "type": "INTEGER" }
            },
            "required": [
                "scene_id", "setting", "time", "location",
                "characters", "dialogue", "scene_length_seconds"
            ]
        }
    })
}

/// Parse a provider text payload into scenes
///
/// The provider is expected to emit pure JSON, but responses are sometimes
/// wrapped in a markdown code fence; that wrapper is stripped before parsing.
fn parse_scene_payload(text: &str) -> Result<Vec<Scene>, ScriptError> {
    let payload = strip_code_fence(text);
    if payload.is_empty() {
        return Err(ScriptError::EmptyResponse);
    }
    serde_json::from_str(payload).map_err(|e| ScriptError::Parse(e.to_string()))
}

/// Strip a leading ```json (or bare ```) fence and a trailing ``` fence
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let opened = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    opened.strip_suffix("```").unwrap_or(opened).trim()
}

/// Errors that can occur while generating or expanding a script
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The transcript was missing or blank
    #[error("Transcript is required.")]
    EmptyInput,
    /// The provider call itself failed
    #[error("provider error: {0}")]
    Provider(String),
    /// The provider returned an empty text payload
    #[error("empty response from provider")]
    EmptyResponse,
    /// The provider returned text that is not a valid scene array
    #[error("failed to parse provider response: {0}")]
    Parse(String),
    /// The provider returned the wrong number of scenes or broken numbering
    #[error("scene numbering mismatch: {0}")]
    SequenceMismatch(String),
}
