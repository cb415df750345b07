//! Interactive shell driving the engine
//!
//! One command runs at a time; a generate or expand call blocks the loop
//! until the engine answers, so there is never more than one request in
//! flight. Every action ends by updating the status line.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::client::api::EngineClient;
use crate::client::session::Session;
use crate::domain::Scene;

const DEFAULT_EXPORT_PATH: &str = "scenes.json";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Generate,
    Expand(u32),
    Show,
    Scene(u32),
    Export(Option<PathBuf>),
    Open(PathBuf),
    Text(String),
    Desc(String),
    Clear,
}

/// Parse one input line into a command
///
/// The expand count is clamped to a minimum of 1; a missing or unparsable
/// count also falls back to 1.
pub fn parse_command(input: &str) -> Result<Command, String> {
    let (cmd, rest) = match input.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (input, ""),
    };

    match cmd {
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "generate" => Ok(Command::Generate),
        "expand" => {
            let count = rest.parse::<u32>().unwrap_or(1).max(1);
            Ok(Command::Expand(count))
        }
        "show" => Ok(Command::Show),
        "scene" => rest
            .parse::<u32>()
            .map(Command::Scene)
            .map_err(|_| "usage: scene <id>".to_string()),
        "export" => Ok(Command::Export(if rest.is_empty() {
            None
        } else {
            Some(PathBuf::from(rest))
        })),
        "open" => {
            if rest.is_empty() {
                Err("usage: open <file>".to_string())
            } else {
                Ok(Command::Open(PathBuf::from(rest)))
            }
        }
        "text" => Ok(Command::Text(rest.to_string())),
        "desc" => Ok(Command::Desc(rest.to_string())),
        "clear" => Ok(Command::Clear),
        other => Err(format!("unknown command: {}", other)),
    }
}

/// Interactive client session
pub struct Shell {
    api: EngineClient,
    session: Session,
    transcript: String,
    character_description: String,
    status: String,
}

impl Shell {
    pub fn new(api: EngineClient) -> Self {
        Self {
            api,
            session: Session::new(),
            transcript: String::new(),
            character_description: String::new(),
            status: "Welcome to Scenescript".to_string(),
        }
    }

    /// Preload a transcript file before the loop starts
    pub fn load_transcript(&mut self, path: &Path) -> anyhow::Result<()> {
        self.transcript = fs::read_to_string(path)?;
        self.status = format!("Loaded file: {}", path.display());
        Ok(())
    }

    /// Run the shell main loop
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new()?;

        loop {
            let readline = rl.readline(&format!("{} ", "scenescript>".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(input);

                    match parse_command(input) {
                        Ok(Command::Quit) => break,
                        Ok(command) => self.handle_command(command).await,
                        Err(message) => {
                            println!("{} {}", "?".yellow(), message);
                            continue;
                        }
                    }

                    println!("{}", self.status.as_str().dimmed());
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Help => self.print_help(),
            Command::Generate => self.handle_generate().await,
            Command::Expand(count) => self.handle_expand(count).await,
            Command::Show => self.print_scenes(),
            Command::Scene(id) => self.print_scene(id),
            Command::Export(path) => self.handle_export(path),
            Command::Open(path) => self.handle_open(&path),
            Command::Text(text) => {
                self.transcript = text;
                self.status = format!("Transcript set ({} chars).", self.transcript.len());
            }
            Command::Desc(text) => {
                self.character_description = text;
                self.status = if self.character_description.is_empty() {
                    "Character description cleared.".to_string()
                } else {
                    "Character description set.".to_string()
                };
            }
            Command::Clear => {
                self.transcript.clear();
                self.character_description.clear();
                self.session.clear();
                self.status = "All data cleared.".to_string();
            }
            Command::Quit => unreachable!("handled by the loop"),
        }
    }

    async fn handle_generate(&mut self) {
        if self.transcript.trim().is_empty() {
            self.status =
                "Error: transcript is required. Use open <file> or text <...> first.".to_string();
            return;
        }

        println!("{}", "Analyzing transcript...".dimmed());
        let description = if self.character_description.trim().is_empty() {
            None
        } else {
            Some(self.character_description.as_str())
        };

        match self.api.generate(&self.transcript, description).await {
            Ok(scenes) => {
                self.status = format!("Analysis complete - {} scenes generated.", scenes.len());
                self.session.replace(scenes);
            }
            Err(e) => {
                self.status = format!("Error: {}", e);
            }
        }
    }

    async fn handle_expand(&mut self, count: u32) {
        if self.session.is_empty() {
            self.status = "Error: existing scenes are required before expanding.".to_string();
            return;
        }

        println!(
            "{}",
            format!("Expanding script by {} scenes...", count).dimmed()
        );
        match self.api.expand(self.session.scenes(), count).await {
            Ok(new_scenes) => {
                self.session.append(new_scenes);
                self.status = format!("Expanded. Total scenes: {}.", self.session.len());
            }
            Err(e) => {
                self.status = format!("Expand error: {}", e);
            }
        }
    }

    fn handle_export(&mut self, path: Option<PathBuf>) {
        if self.session.is_empty() {
            self.status = "Error: no scenes to export.".to_string();
            return;
        }

        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH));
        let result = self
            .session
            .export_json()
            .map_err(anyhow::Error::from)
            .and_then(|json| fs::write(&path, json).map_err(anyhow::Error::from));

        self.status = match result {
            Ok(()) => format!("Exported {} scenes to {}.", self.session.len(), path.display()),
            Err(e) => format!("Export error: {}", e),
        };
    }

    fn handle_open(&mut self, path: &Path) {
        match fs::read_to_string(path) {
            Ok(text) => {
                self.transcript = text;
                self.status = format!(
                    "Loaded file: {} ({} chars).",
                    path.display(),
                    self.transcript.len()
                );
            }
            Err(e) => {
                self.status = format!("Error reading {}: {}", path.display(), e);
            }
        }
    }

    fn print_scene(&mut self, scene_id: u32) {
        match self.session.scene_json(scene_id) {
            Some(json) => {
                println!("{}", json);
                self.status = format!("Scene {} printed.", scene_id);
            }
            None => {
                self.status = format!("Error: no scene with id {}.", scene_id);
            }
        }
    }

    fn print_scenes(&mut self) {
        if self.session.is_empty() {
            self.status = "No scenes yet.".to_string();
            return;
        }

        println!();
        for scene in self.session.scenes() {
            print_scene_summary(scene);
        }
        println!();
        self.status = format!(
            "Scenes: {} | Total duration: {}s",
            self.session.len(),
            self.session.total_duration_seconds()
        );
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Scenescript".bright_cyan().bold());
        println!(
            "Type {} for commands, {} to exit",
            "help".yellow(),
            "quit".yellow()
        );
        println!("{}", self.status.as_str().dimmed());
        println!();
    }

    fn print_help(&mut self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:16} Load a transcript from a file", "open <file>".yellow());
        println!("  {:16} Set the transcript from the rest of the line", "text <...>".yellow());
        println!("  {:16} Set the principal character description", "desc <...>".yellow());
        println!("  {:16} Segment the transcript into scenes", "generate".yellow());
        println!("  {:16} Continue the script by n scenes", "expand <n>".yellow());
        println!("  {:16} List the current scenes", "show".yellow());
        println!("  {:16} Print one scene as JSON", "scene <id>".yellow());
        println!("  {:16} Write the scene list to a JSON file", "export [path]".yellow());
        println!("  {:16} Discard transcript, description, and scenes", "clear".yellow());
        println!("  {:16} Exit", "quit".yellow());
        println!();
        self.status = "Ready.".to_string();
    }
}

fn print_scene_summary(scene: &Scene) {
    let names: Vec<&str> = scene.characters.iter().map(|c| c.name.as_str()).collect();
    println!(
        "  {} {} ({}, {}) [{}s]",
        format!("#{}", scene.scene_id).bright_green(),
        scene.setting,
        scene.location,
        scene.time,
        scene.scene_length_seconds
    );
    if !names.is_empty() {
        println!("     {} {}", "cast:".dimmed(), names.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_command("generate").unwrap(), Command::Generate);
        assert_eq!(parse_command("show").unwrap(), Command::Show);
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
        assert_eq!(parse_command("clear").unwrap(), Command::Clear);
    }

    #[test]
    fn test_parse_expand_clamps_count_to_one() {
        assert_eq!(parse_command("expand 3").unwrap(), Command::Expand(3));
        assert_eq!(parse_command("expand 0").unwrap(), Command::Expand(1));
        assert_eq!(parse_command("expand").unwrap(), Command::Expand(1));
        assert_eq!(parse_command("expand abc").unwrap(), Command::Expand(1));
    }

    #[test]
    fn test_parse_scene_requires_an_id() {
        assert_eq!(parse_command("scene 4").unwrap(), Command::Scene(4));
        assert!(parse_command("scene").is_err());
        assert!(parse_command("scene four").is_err());
    }

    #[test]
    fn test_parse_export_with_and_without_path() {
        assert_eq!(parse_command("export").unwrap(), Command::Export(None));
        assert_eq!(
            parse_command("export out/take2.json").unwrap(),
            Command::Export(Some(PathBuf::from("out/take2.json")))
        );
    }

    #[test]
    fn test_parse_open_and_text() {
        assert_eq!(
            parse_command("open notes.txt").unwrap(),
            Command::Open(PathBuf::from("notes.txt"))
        );
        assert!(parse_command("open").is_err());
        assert_eq!(
            parse_command("text A: Hello. B: Hi there.").unwrap(),
            Command::Text("A: Hello. B: Hi there.".to_string())
        );
    }

    #[test]
    fn test_parse_unknown_command_is_an_error() {
        assert!(parse_command("frobnicate").is_err());
    }
}
