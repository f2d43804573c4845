//! Replay command implementation
//!
//! Runs a scripted session against an in-memory host. A script looks like:
//!
//! ```json
//! {
//!   "config": { "announce_empty_pokes": false },
//!   "channels": [{ "session": 1, "id": 5, "name": "Lobby" }],
//!   "clients": [{ "session": 1, "client": 42, "channel": 5 }],
//!   "steps": [
//!     { "menu": "block" },
//!     { "poke": { "session": 1, "sender_id": 42, "sender_name": "Bob",
//!                 "sender_identity": "abc123", "message": "hi" } }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use tracing::debug;

use poke_blocker_shared::host::memory::{LogEntry, MemoryHost};
use poke_blocker_shared::types::events::{ChannelId, ClientId, SessionId};
use poke_blocker_shared::{Decision, FilterConfig, IncomingPoke, MenuCommand, MenuKind, Plugin};

use crate::output;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Script file (JSON)
    pub script: PathBuf,

    /// Announce blocked pokes with an empty message (overrides the script)
    #[arg(long)]
    pub announce_empty: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChannelSpec {
    pub session: SessionId,
    pub id: ChannelId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ClientSpec {
    pub session: SessionId,
    pub client: ClientId,
    pub channel: ChannelId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Click on a global menu item
    Menu(MenuCommand),

    /// Incoming poke
    Poke(IncomingPoke),
}

#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: FilterConfig,

    #[serde(default)]
    pub channels: Vec<ChannelSpec>,

    #[serde(default)]
    pub clients: Vec<ClientSpec>,

    pub steps: Vec<Step>,
}

/// What happened during one step
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
    pub blocking: bool,
    pub printed: Vec<String>,
    pub logged: Vec<LogEntry>,
}

pub fn load_script(path: &Path) -> Result<Script> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    let script: Script = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse script {}", path.display()))?;
    script.config.validate().context("Invalid script config")?;
    Ok(script)
}

/// Run every step of `script` against a fresh plugin instance
pub fn replay(script: &Script) -> Vec<StepReport> {
    let mut host = MemoryHost::new();
    for channel in &script.channels {
        host.add_channel(channel.session, channel.id, &channel.name);
    }
    for client in &script.clients {
        host.move_client(client.session, client.client, client.channel);
    }

    let mut plugin = Plugin::new(script.config.clone());
    let mut reports = Vec::with_capacity(script.steps.len());

    for (i, step) in script.steps.iter().enumerate() {
        host.clear();
        let (action, decision) = match step {
            Step::Menu(command) => {
                plugin.on_menu_item(MenuKind::Global, command.id(), &mut host);
                (format!("menu {}", command.label()), None)
            }
            Step::Poke(poke) => {
                let decision = plugin.on_poke(poke.clone(), &mut host);
                (
                    format!("poke from {} ({})", poke.sender_name, poke.sender_identity),
                    Some(decision),
                )
            }
        };
        debug!("step {}: {} -> {:?}", i + 1, action, decision);

        reports.push(StepReport {
            step: i + 1,
            action,
            decision,
            blocking: plugin.state().is_blocking(),
            printed: host.printed().to_vec(),
            logged: host.logged().to_vec(),
        });
    }

    reports
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let mut script = load_script(&args.script)?;
    if args.announce_empty {
        script.config.announce_empty_pokes = true;
    }

    let reports = replay(&script);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if reports.is_empty() {
        output::warning("Script has no steps");
        return Ok(());
    }

    for report in &reports {
        let verdict = report
            .decision
            .map(output::decision)
            .unwrap_or_else(|| if report.blocking { "blocking" } else { "allowing" }.to_string());
        output::info(&format!("#{} {} -> {}", report.step, report.action, verdict));
        for text in &report.printed {
            output::sink("tab", text);
        }
        for entry in &report.logged {
            output::sink("log", &entry.text);
        }
    }

    let dropped = reports
        .iter()
        .filter(|r| r.decision == Some(Decision::Drop))
        .count();
    output::info(&format!("{} of {} steps dropped a poke", dropped, reports.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SCRIPT: &str = r#"{
        "channels": [{ "session": 1, "id": 5, "name": "Lobby" }],
        "clients": [{ "session": 1, "client": 42, "channel": 5 }],
        "steps": [
            { "poke": { "session": 1, "sender_id": 42, "sender_name": "Bob",
                        "sender_identity": "abc123", "message": "hi" } },
            { "menu": "block" },
            { "poke": { "session": 1, "sender_id": 42, "sender_name": "Bob",
                        "sender_identity": "abc123", "message": "hi" } },
            { "poke": { "session": 1, "sender_id": 42, "sender_name": "Bob",
                        "sender_identity": "abc123" } },
            { "menu": "allow" }
        ]
    }"#;

    fn write_script(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_replay_script() -> Result<()> {
        let file = write_script(SCRIPT);
        let script = load_script(file.path())?;
        let reports = replay(&script);

        assert_eq!(reports.len(), 5);

        assert_eq!(reports[0].decision, Some(Decision::Pass));
        assert!(reports[0].printed.is_empty());

        assert_eq!(reports[1].decision, None);
        assert!(reports[1].blocking);
        assert_eq!(reports[1].printed, ["[Poke Blocker] ** Blocking pokes **\n"]);

        assert_eq!(reports[2].decision, Some(Decision::Drop));
        assert_eq!(reports[2].printed.len(), 1);
        assert_eq!(reports[2].logged.len(), 1);
        assert!(reports[2].printed[0].contains("[url=channelid://5]Lobby[/url]"));

        assert_eq!(reports[3].decision, Some(Decision::Drop));
        assert!(reports[3].printed.is_empty());

        assert!(!reports[4].blocking);
        Ok(())
    }

    #[test]
    fn test_announce_empty_from_script_config() -> Result<()> {
        let file = write_script(
            r#"{
                "config": { "announce_empty_pokes": true },
                "steps": [
                    { "menu": "block" },
                    { "poke": { "session": 1, "sender_id": 1, "sender_name": "x",
                                "sender_identity": "y", "message": "" } }
                ]
            }"#,
        );
        let reports = replay(&load_script(file.path())?);
        assert_eq!(reports[1].printed.len(), 1);
        Ok(())
    }

    #[test]
    fn test_invalid_script_rejected() {
        let file = write_script(r#"{ "steps": [ { "menu": "mute" } ] }"#);
        assert!(load_script(file.path()).is_err());

        let file = write_script(r#"{ "config": { "log_channel": "" }, "steps": [] }"#);
        assert!(load_script(file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(load_script(Path::new("/nonexistent/script.json")).is_err());
    }
}
