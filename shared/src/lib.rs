//! Shared types and logic for Poke Blocker
//!
//! This crate contains everything that does not touch the host's C ABI: the
//! blocking toggle, the poke filter and notice formatter, menu commands,
//! configuration and the traits the plugin adapter implements over the host.

pub mod config;
pub mod error;
pub mod filter;
pub mod host;
pub mod plugin;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::FilterConfig;
pub use error::{ConfigError, DecodeError, HostError};
pub use filter::PokeFilter;
pub use host::{Host, LogLevel, Sinks};
pub use plugin::Plugin;
pub use types::{events::*, menu::*, state::BlockingState};
