//! Poke filter
//!
//! Decides whether an incoming poke reaches the user and, when it does not,
//! tells the user about it through the host's sinks.

pub mod notice;

use tracing::{debug, warn};

use crate::config::FilterConfig;
use crate::host::Sinks;
use crate::types::events::{Decision, PokeEvent};
use crate::types::state::BlockingState;

/// Stateless filter; the toggle is passed in on every call.
#[derive(Debug, Clone, Default)]
pub struct PokeFilter {
    config: FilterConfig,
}

impl PokeFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Whether a dropped poke gets a notice
    pub fn should_announce(&self, event: &PokeEvent) -> bool {
        event.has_message() || self.config.announce_empty_pokes
    }

    /// Filter one poke.
    ///
    /// Returns [`Decision::Pass`] without touching `sinks` when blocking is
    /// off. Otherwise the poke is dropped and, subject to the empty-message
    /// policy, a notice goes to the current tab and to the client log.
    pub fn handle_poke<S: Sinks + ?Sized>(
        &self,
        state: &BlockingState,
        event: &PokeEvent,
        sinks: &mut S,
    ) -> Decision {
        if !state.is_blocking() {
            return Decision::Pass;
        }

        if !self.should_announce(event) {
            debug!(
                "Dropped empty poke from {} without notice",
                event.sender_identity
            );
            return Decision::Drop;
        }

        let text = notice::format_notice(event);

        if let Err(e) = sinks.print_to_current_tab(&text) {
            warn!("Failed to print blocked-poke notice: {}", e);
        }
        if let Err(e) = sinks.log_message(
            &text,
            self.config.log_level,
            &self.config.log_channel,
            event.session,
        ) {
            warn!("Failed to log blocked-poke notice: {}", e);
        }

        Decision::Drop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;
    use crate::types::events::ChannelRef;
    use chrono::Local;

    fn event(message: &str) -> PokeEvent {
        PokeEvent {
            session: 3,
            sender_id: 42,
            sender_name: "Bob".to_string(),
            sender_identity: "abc123".to_string(),
            message: message.to_string(),
            channel: Some(ChannelRef::new(5, "Lobby")),
            received_at: Local::now(),
        }
    }

    fn blocking() -> BlockingState {
        let mut state = BlockingState::new();
        state.set_blocking(true);
        state
    }

    #[test]
    fn test_pass_when_not_blocking() {
        let filter = PokeFilter::default();
        let mut host = MemoryHost::new();

        for message in ["", "hi"] {
            let decision = filter.handle_poke(&BlockingState::new(), &event(message), &mut host);
            assert_eq!(decision, Decision::Pass);
        }
        assert_eq!(host.sink_calls(), 0);
    }

    #[test]
    fn test_drop_and_announce() {
        let filter = PokeFilter::default();
        let mut host = MemoryHost::new();

        let decision = filter.handle_poke(&blocking(), &event("hi"), &mut host);

        assert_eq!(decision, Decision::Drop);
        assert_eq!(host.printed().len(), 1);
        assert_eq!(host.logged().len(), 1);
        assert_eq!(host.printed()[0], host.logged()[0].text);

        let entry = &host.logged()[0];
        assert_eq!(entry.level, crate::host::LogLevel::Info);
        assert_eq!(entry.channel, "Plugin");
        assert_eq!(entry.session, 3);
    }

    #[test]
    fn test_empty_message_default_policy() {
        let filter = PokeFilter::default();
        let mut host = MemoryHost::new();

        let decision = filter.handle_poke(&blocking(), &event(""), &mut host);

        assert_eq!(decision, Decision::Drop);
        assert_eq!(host.sink_calls(), 0);
    }

    #[test]
    fn test_empty_message_announced_when_configured() {
        let filter = PokeFilter::new(FilterConfig {
            announce_empty_pokes: true,
            ..Default::default()
        });
        let mut host = MemoryHost::new();

        let decision = filter.handle_poke(&blocking(), &event(""), &mut host);

        assert_eq!(decision, Decision::Drop);
        assert_eq!(host.printed().len(), 1);
        assert_eq!(host.logged().len(), 1);
    }

    #[test]
    fn test_sink_failures_still_drop() {
        let filter = PokeFilter::default();
        let mut host = MemoryHost::new();
        host.set_fail_sinks(true);

        let decision = filter.handle_poke(&blocking(), &event("hi"), &mut host);

        assert_eq!(decision, Decision::Drop);
        assert_eq!(host.sink_calls(), 2);
    }
}
