//! Terminal client - engine API wrapper, session state, and interactive shell

pub mod api;
pub mod session;
pub mod shell;
