//! The blocking toggle

/// Whether incoming pokes are currently suppressed.
///
/// Starts disabled and is never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockingState {
    blocking_enabled: bool,
}

impl BlockingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_blocking(&mut self, enabled: bool) {
        self.blocking_enabled = enabled;
    }

    pub fn is_blocking(&self) -> bool {
        self.blocking_enabled
    }

    /// Short label for the host's info panel
    pub fn status_label(&self) -> &'static str {
        if self.blocking_enabled {
            "ON"
        } else {
            "OFF"
        }
    }
}
