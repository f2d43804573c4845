//! Output formatting utilities for CLI commands

use colored::Colorize;
use poke_blocker_shared::Decision;

/// Print info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print warning message
pub fn warning(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Colored label for a filter decision
pub fn decision(decision: Decision) -> String {
    match decision {
        Decision::Pass => "PASS".green().to_string(),
        Decision::Drop => "DROP".red().bold().to_string(),
    }
}

/// Print text that went to one of the host sinks, indented under its step
pub fn sink(name: &str, text: &str) {
    for line in text.lines() {
        println!("    {} {}", format!("{name}>").dimmed(), line);
    }
}
