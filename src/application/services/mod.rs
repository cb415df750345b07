//! Application services

mod script_service;

pub use script_service::{ScriptError, ScriptService};
