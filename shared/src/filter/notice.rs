//! Blocked-poke notice formatting
//!
//! Notices use the host's BBCode dialect. Sender and channel are rendered
//! as links the user can click to open the client or channel.

use crate::types::events::{ChannelRef, PokeEvent};
use crate::utils::{percent_encode, time::format_notice_time};

/// `client://` link for a sender. The display name is percent-encoded in
/// the URL part so that brackets or `~` in it cannot break the markup.
pub fn client_link(identity: &str, name: &str) -> String {
    format!(
        "[url=client://0/{}~{}]{}[/url]",
        identity,
        percent_encode(name),
        name
    )
}

/// `channelid://` link for a channel
pub fn channel_link(channel: &ChannelRef) -> String {
    format!("[url=channelid://{}]{}[/url]", channel.id, channel.name)
}

/// Build the notice shown for a blocked poke.
///
/// The channel clause is left out when the channel could not be resolved.
pub fn format_notice(event: &PokeEvent) -> String {
    let mut notice = format!(
        "[color=black] {} Blocked poke from user \"[color=red]{}[/color]\"",
        format_notice_time(&event.received_at),
        client_link(&event.sender_identity, &event.sender_name),
    );

    if let Some(channel) = &event.channel {
        notice.push_str(&format!(" in channel '{}'", channel_link(channel)));
    }

    notice.push_str(&format!(
        " with message \"[color=black]{}[/color]\"\n[/color]",
        event.message
    ));
    notice
}
