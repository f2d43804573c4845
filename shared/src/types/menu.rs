//! Plugin menu definitions

use serde::{Deserialize, Serialize};

/// Host menu a plugin item lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuKind {
    /// "Plugins" menu in the main window's menu bar
    Global,
    Channel,
    Client,
}

impl MenuKind {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(MenuKind::Global),
            1 => Some(MenuKind::Channel),
            2 => Some(MenuKind::Client),
            _ => None,
        }
    }

    pub fn as_raw(self) -> i32 {
        match self {
            MenuKind::Global => 0,
            MenuKind::Channel => 1,
            MenuKind::Client => 2,
        }
    }
}

/// Commands behind the plugin's menu items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuCommand {
    Block,
    Allow,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 2] = [MenuCommand::Block, MenuCommand::Allow];

    /// Stable ID handed to the host when registering the menu
    pub fn id(self) -> i32 {
        match self {
            MenuCommand::Block => 0,
            MenuCommand::Allow => 1,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::Block => "Block",
            MenuCommand::Allow => "Allow",
        }
    }

    /// Icon file, loaded by the host from the plugin's resource directory
    pub fn icon(self) -> &'static str {
        match self {
            MenuCommand::Block => "block.png",
            MenuCommand::Allow => "allow.png",
        }
    }

    /// Toggle value this command sets
    pub fn blocking(self) -> bool {
        matches!(self, MenuCommand::Block)
    }

    pub fn confirmation(self) -> String {
        let verb = match self {
            MenuCommand::Block => "Blocking",
            MenuCommand::Allow => "Allowing",
        };
        format!("[{}] ** {} pokes **\n", crate::plugin::PLUGIN_NAME, verb)
    }
}

impl std::str::FromStr for MenuCommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "block" => Ok(MenuCommand::Block),
            "allow" => Ok(MenuCommand::Allow),
            _ => anyhow::bail!("Invalid menu command: {}", s),
        }
    }
}

/// Icon for the plugin's submenu
pub const MENU_ICON: &str = "main.png";
