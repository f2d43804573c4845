//! Capabilities the host client provides to the plugin
//!
//! The plugin crate implements these traits over the host's C function
//! table; [`memory::MemoryHost`] implements them in-process for the CLI and
//! for tests.

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::types::events::{ChannelId, ClientId, SessionId};

/// Severity of a host log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Critical,
    Error,
    Warning,
    Debug,
    Info,
    Devel,
}

impl LogLevel {
    /// Value of the host's `LogLevel` enum
    pub fn as_raw(self) -> i32 {
        match self {
            LogLevel::Critical => 0,
            LogLevel::Error => 1,
            LogLevel::Warning => 2,
            LogLevel::Debug => 3,
            LogLevel::Info => 4,
            LogLevel::Devel => 5,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(LogLevel::Critical),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "devel" => Ok(LogLevel::Devel),
            _ => anyhow::bail!("Invalid log level: {}", s),
        }
    }
}

/// Output channels owned by the host.
///
/// Both are fire-and-forget for the filter: an `Err` is logged, never
/// surfaced.
pub trait Sinks {
    /// Print rich text into the chat tab the user is looking at
    fn print_to_current_tab(&mut self, text: &str) -> Result<(), HostError>;

    /// Append an entry to the client log
    fn log_message(
        &mut self,
        text: &str,
        level: LogLevel,
        channel: &str,
        session: SessionId,
    ) -> Result<(), HostError>;
}

/// Output sinks plus the lookups needed to describe a poke's origin
pub trait Host: Sinks {
    /// Channel the given client is currently in
    fn channel_of(&self, session: SessionId, client: ClientId) -> Result<ChannelId, HostError>;

    /// Display name of a channel
    fn channel_name(&self, session: SessionId, channel: ChannelId) -> Result<String, HostError>;
}
