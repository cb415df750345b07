//! Application layer - the script service and the ports it depends on

pub mod dto;
pub mod ports;
pub mod services;
