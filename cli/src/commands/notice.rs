//! Notice command implementation

use anyhow::Result;
use clap::Args;
use poke_blocker_shared::filter::notice::format_notice;
use poke_blocker_shared::utils::time;
use poke_blocker_shared::{ChannelRef, PokeEvent};

#[derive(Args, Debug)]
pub struct NoticeArgs {
    /// Sender display name
    #[arg(short, long)]
    pub name: String,

    /// Sender unique identity
    #[arg(short, long)]
    pub identity: String,

    /// Poke message
    #[arg(short, long, default_value = "")]
    pub message: String,

    /// Channel ID of the sender
    #[arg(long, requires = "channel_name")]
    pub channel_id: Option<u64>,

    /// Channel name of the sender
    #[arg(long, requires = "channel_id")]
    pub channel_name: Option<String>,
}

pub fn run(args: NoticeArgs) -> Result<()> {
    println!("{}", build_notice(args));
    Ok(())
}

fn build_notice(args: NoticeArgs) -> String {
    let channel = args
        .channel_id
        .zip(args.channel_name)
        .map(|(id, name)| ChannelRef::new(id, name));

    let event = PokeEvent {
        session: 0,
        sender_id: 0,
        sender_name: args.name,
        sender_identity: args.identity,
        message: args.message,
        channel,
        received_at: time::now(),
    };
    format_notice(&event)
}
