//! In-process host that records every sink call

use std::cell::Cell;
use std::collections::HashMap;

use serde::Serialize;

use super::{Host, LogLevel, Sinks};
use crate::error::HostError;
use crate::types::events::{ChannelId, ClientId, SessionId};

/// Entry written through [`Sinks::log_message`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub text: String,
    pub level: LogLevel,
    pub channel: String,
    pub session: SessionId,
}

/// Host double backed by hash maps.
///
/// Lookups for unknown clients or channels fail the way the real host does
/// for a client that left the server.
#[derive(Debug, Default)]
pub struct MemoryHost {
    client_channels: HashMap<(SessionId, ClientId), ChannelId>,
    channel_names: HashMap<(SessionId, ChannelId), String>,
    printed: Vec<String>,
    logged: Vec<LogEntry>,
    fail_sinks: bool,
    lookups: Cell<usize>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a channel and return `self` for chaining
    pub fn with_channel(mut self, session: SessionId, id: ChannelId, name: &str) -> Self {
        self.add_channel(session, id, name);
        self
    }

    /// Place a client into a channel and return `self` for chaining
    pub fn with_client(mut self, session: SessionId, client: ClientId, channel: ChannelId) -> Self {
        self.move_client(session, client, channel);
        self
    }

    pub fn add_channel(&mut self, session: SessionId, id: ChannelId, name: &str) {
        self.channel_names.insert((session, id), name.to_string());
    }

    pub fn move_client(&mut self, session: SessionId, client: ClientId, channel: ChannelId) {
        self.client_channels.insert((session, client), channel);
    }

    /// Make every sink call fail (the calls are still recorded)
    pub fn set_fail_sinks(&mut self, fail: bool) {
        self.fail_sinks = fail;
    }

    pub fn printed(&self) -> &[String] {
        &self.printed
    }

    pub fn logged(&self) -> &[LogEntry] {
        &self.logged
    }

    /// Number of `channel_of` and `channel_name` calls so far
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }

    pub fn sink_calls(&self) -> usize {
        self.printed.len() + self.logged.len()
    }

    pub fn clear(&mut self) {
        self.printed.clear();
        self.logged.clear();
    }

    fn sink_result(&self, function: &'static str) -> Result<(), HostError> {
        if self.fail_sinks {
            Err(HostError::Call { function, code: 1 })
        } else {
            Ok(())
        }
    }
}

impl Sinks for MemoryHost {
    fn print_to_current_tab(&mut self, text: &str) -> Result<(), HostError> {
        self.printed.push(text.to_string());
        self.sink_result("printMessageToCurrentTab")
    }

    fn log_message(
        &mut self,
        text: &str,
        level: LogLevel,
        channel: &str,
        session: SessionId,
    ) -> Result<(), HostError> {
        self.logged.push(LogEntry {
            text: text.to_string(),
            level,
            channel: channel.to_string(),
            session,
        });
        self.sink_result("logMessage")
    }
}

impl Host for MemoryHost {
    fn channel_of(&self, session: SessionId, client: ClientId) -> Result<ChannelId, HostError> {
        self.lookups.set(self.lookups.get() + 1);
        self.client_channels
            .get(&(session, client))
            .copied()
            .ok_or(HostError::Call {
                function: "getChannelOfClient",
                code: 0x0200,
            })
    }

    fn channel_name(&self, session: SessionId, channel: ChannelId) -> Result<String, HostError> {
        self.lookups.set(self.lookups.get() + 1);
        self.channel_names
            .get(&(session, channel))
            .cloned()
            .ok_or(HostError::Call {
                function: "getChannelVariableAsString",
                code: 0x0300,
            })
    }
}
