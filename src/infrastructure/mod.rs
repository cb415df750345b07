//! Infrastructure layer - configuration, the Gemini adapter, and HTTP routes

pub mod config;
pub mod gemini;
pub mod http;
pub mod state;
