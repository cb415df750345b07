//! Scenescript - transcript-to-scene-script engine and terminal client
//!
//! Two binaries share this library:
//! - `scenescript-engine` serves `POST /api/generate` and `POST /api/expand`,
//!   translating structured requests into schema-constrained Gemini calls
//! - `scenescript` is the interactive terminal client that drives the engine,
//!   holds the scene list, and exports it as JSON

pub mod application;
pub mod client;
pub mod domain;
pub mod infrastructure;
