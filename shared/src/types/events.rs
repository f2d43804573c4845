//! Event type definitions for incoming pokes
//!
//! The host hands the plugin an [`IncomingPoke`]; once the filter decides to
//! act on it, the plugin enriches it into a [`PokeEvent`] carrying the
//! sender's channel and the arrival time.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Host identifier for a connected server tab
pub type SessionId = u64;

/// Client ID, unique per session
pub type ClientId = u16;

/// Channel ID, unique per session
pub type ChannelId = u64;

/// Poke as delivered by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingPoke {
    /// Server connection the poke arrived on
    pub session: SessionId,

    /// Client ID of the sender
    pub sender_id: ClientId,

    /// Display name of the sender
    pub sender_name: String,

    /// Unique identity of the sender
    pub sender_identity: String,

    /// Poke text, possibly empty
    #[serde(default)]
    pub message: String,
}

/// Channel the sender was in when poking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef {
    pub id: ChannelId,
    pub name: String,
}

impl ChannelRef {
    pub fn new(id: ChannelId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Poke enriched with channel and arrival time
#[derive(Debug, Clone, PartialEq)]
pub struct PokeEvent {
    pub session: SessionId,
    pub sender_id: ClientId,
    pub sender_name: String,
    pub sender_identity: String,
    pub message: String,

    /// `None` when the host could not resolve the sender's channel
    pub channel: Option<ChannelRef>,

    pub received_at: DateTime<Local>,
}

impl PokeEvent {
    pub fn from_incoming(
        poke: IncomingPoke,
        channel: Option<ChannelRef>,
        received_at: DateTime<Local>,
    ) -> Self {
        Self {
            session: poke.session,
            sender_id: poke.sender_id,
            sender_name: poke.sender_name,
            sender_identity: poke.sender_identity,
            message: poke.message,
            channel,
            received_at,
        }
    }

    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }
}

/// Filter verdict for a poke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Let the host process the poke normally
    Pass,

    /// Tell the host to discard the poke
    Drop,
}

impl Decision {
    /// Return code expected by the host's poke callback
    pub fn as_host_code(self) -> i32 {
        match self {
            Decision::Pass => 0,
            Decision::Drop => 1,
        }
    }
}
