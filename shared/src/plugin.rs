//! Plugin instance and host-facing metadata
//!
//! [`Plugin`] owns the toggle and the filter. The ABI layer creates exactly
//! one when the host initialises the plugin and drops it on shutdown.

use tracing::{debug, info};

use crate::config::FilterConfig;
use crate::filter::PokeFilter;
use crate::host::{Host, Sinks};
use crate::types::events::{ChannelRef, Decision, IncomingPoke, PokeEvent};
use crate::types::menu::{MenuCommand, MenuKind};
use crate::types::state::BlockingState;
use crate::utils::time;

pub const PLUGIN_NAME: &str = "Poke Blocker";
pub const PLUGIN_VERSION: &str = "0.1";
pub const PLUGIN_AUTHOR: &str = "sk0r / Czybik";
pub const PLUGIN_CONTACT: &str = "Czybik_Stylez@gmx.de";

/// Host plugin API version this build targets
pub const PLUGIN_API_VERSION: i32 = 20;

/// Text for the host's plugin list
pub fn description() -> String {
    format!(
        "{PLUGIN_NAME}\n\nPurpose:\nA shield against pokes.\n\nDeveloped by {PLUGIN_AUTHOR} ({PLUGIN_CONTACT})\n"
    )
}

#[derive(Debug, Default)]
pub struct Plugin {
    state: BlockingState,
    filter: PokeFilter,
}

impl Plugin {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            state: BlockingState::new(),
            filter: PokeFilter::new(config),
        }
    }

    pub fn state(&self) -> &BlockingState {
        &self.state
    }

    pub fn filter(&self) -> &PokeFilter {
        &self.filter
    }

    /// Handle a poke from the host.
    ///
    /// Host lookups only happen when the poke is going to be dropped.
    pub fn on_poke<H: Host + ?Sized>(&self, poke: IncomingPoke, host: &mut H) -> Decision {
        if !self.state.is_blocking() {
            return Decision::Pass;
        }

        let channel = resolve_channel(&*host, &poke);
        let event = PokeEvent::from_incoming(poke, channel, time::now());
        self.filter.handle_poke(&self.state, &event, host)
    }

    /// Handle a click on one of the plugin's menu items.
    ///
    /// Only global items belong to this plugin; anything else is ignored.
    pub fn on_menu_item<S: Sinks + ?Sized>(&mut self, kind: MenuKind, id: i32, sinks: &mut S) {
        if kind != MenuKind::Global {
            debug!("Ignoring {:?} menu item {}", kind, id);
            return;
        }
        let Some(command) = MenuCommand::from_id(id) else {
            debug!("Ignoring unknown menu item {}", id);
            return;
        };
        self.apply(command, sinks);
    }

    /// Set the toggle for `command` and confirm it in the current tab
    pub fn apply<S: Sinks + ?Sized>(&mut self, command: MenuCommand, sinks: &mut S) {
        self.state.set_blocking(command.blocking());
        info!("{}: blocking={}", command.label(), command.blocking());

        if let Err(e) = sinks.print_to_current_tab(&command.confirmation()) {
            debug!("Failed to print menu confirmation: {}", e);
        }
    }
}

/// Look up the sender's channel, `None` if either lookup fails
fn resolve_channel<H: Host + ?Sized>(host: &H, poke: &IncomingPoke) -> Option<ChannelRef> {
    let id = match host.channel_of(poke.session, poke.sender_id) {
        Ok(id) => id,
        Err(e) => {
            debug!("Channel of client {} unavailable: {}", poke.sender_id, e);
            return None;
        }
    };
    match host.channel_name(poke.session, id) {
        Ok(name) => Some(ChannelRef::new(id, name)),
        Err(e) => {
            debug!("Name of channel {} unavailable: {}", id, e);
            None
        }
    }
}
