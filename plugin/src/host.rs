//! [`Host`] implementation over the client's function table

use std::os::raw::{c_char, c_void};
use std::ptr;

use poke_blocker_shared::host::{Host, LogLevel, Sinks};
use poke_blocker_shared::types::events::{ChannelId, ClientId, SessionId};
use poke_blocker_shared::HostError;

use crate::bindings::{Ts3Functions, CHANNEL_NAME, ERROR_OK};
use crate::memory;

const PATH_BUFSIZE: usize = 512;

/// Adapter turning raw host calls into typed results.
///
/// Holds a copy of the table installed by `ts3plugin_setFunctionPointers`;
/// `None` means the host never installed one.
#[derive(Debug, Clone, Copy)]
pub struct Ts3Host {
    functions: Option<Ts3Functions>,
}

fn check(function: &'static str, code: u32) -> Result<(), HostError> {
    if code == ERROR_OK {
        Ok(())
    } else {
        Err(HostError::Call { function, code })
    }
}

impl Ts3Host {
    pub fn new(functions: Option<Ts3Functions>) -> Self {
        Self { functions }
    }

    fn table(&self, function: &'static str) -> Result<&Ts3Functions, HostError> {
        self.functions
            .as_ref()
            .ok_or(HostError::Unavailable(function))
    }

    /// Application, resources, config and plugin directories, as reported
    /// by the host. Missing slots are skipped.
    pub fn paths(&self) -> Vec<(&'static str, String)> {
        let Some(table) = self.functions.as_ref() else {
            return Vec::new();
        };
        [
            ("app", table.get_app_path),
            ("resources", table.get_resources_path),
            ("config", table.get_config_path),
            ("plugin", table.get_plugin_path),
        ]
        .into_iter()
        .filter_map(|(label, query)| {
            let query = query?;
            let mut buf = [0 as c_char; PATH_BUFSIZE];
            // SAFETY: the host writes at most `max_len` bytes into `buf`.
            unsafe { query(buf.as_mut_ptr(), buf.len()) };
            buf[PATH_BUFSIZE - 1] = 0;
            Some((label, memory::read_buf(&buf)))
        })
        .collect()
    }

    /// Release memory the host allocated for us
    fn free(&self, pointer: *mut c_void) {
        if pointer.is_null() {
            return;
        }
        if let Some(free_memory) = self.functions.as_ref().and_then(|t| t.free_memory) {
            // SAFETY: `pointer` came from the host and is released exactly once.
            unsafe { free_memory(pointer) };
        }
    }
}

impl Sinks for Ts3Host {
    fn print_to_current_tab(&mut self, text: &str) -> Result<(), HostError> {
        const FUNCTION: &str = "printMessageToCurrentTab";
        let print = self
            .table(FUNCTION)?
            .print_message_to_current_tab
            .ok_or(HostError::Unavailable(FUNCTION))?;
        let message = memory::to_c_string(text)?;
        // SAFETY: `message` outlives the call; the host copies the text.
        unsafe { print(message.as_ptr()) };
        Ok(())
    }

    fn log_message(
        &mut self,
        text: &str,
        level: LogLevel,
        channel: &str,
        session: SessionId,
    ) -> Result<(), HostError> {
        const FUNCTION: &str = "logMessage";
        let log = self
            .table(FUNCTION)?
            .log_message
            .ok_or(HostError::Unavailable(FUNCTION))?;
        let message = memory::to_c_string(text)?;
        let channel = memory::to_c_string(channel)?;
        // SAFETY: both strings outlive the call.
        let code = unsafe { log(message.as_ptr(), level.as_raw(), channel.as_ptr(), session) };
        check(FUNCTION, code)
    }
}

impl Host for Ts3Host {
    fn channel_of(&self, session: SessionId, client: ClientId) -> Result<ChannelId, HostError> {
        const FUNCTION: &str = "getChannelOfClient";
        let lookup = self
            .table(FUNCTION)?
            .get_channel_of_client
            .ok_or(HostError::Unavailable(FUNCTION))?;
        let mut channel: u64 = 0;
        // SAFETY: `channel` is a valid out-pointer for the call.
        let code = unsafe { lookup(session, client, &mut channel) };
        check(FUNCTION, code)?;
        Ok(channel)
    }

    fn channel_name(&self, session: SessionId, channel: ChannelId) -> Result<String, HostError> {
        const FUNCTION: &str = "getChannelVariableAsString";
        let lookup = self
            .table(FUNCTION)?
            .get_channel_variable_as_string
            .ok_or(HostError::Unavailable(FUNCTION))?;
        let mut result: *mut c_char = ptr::null_mut();
        // SAFETY: `result` is a valid out-pointer; on success the host stores
        // a string it allocated, released below through `freeMemory`.
        let code = unsafe { lookup(session, channel, CHANNEL_NAME, &mut result) };
        check(FUNCTION, code)?;
        // SAFETY: on success `result` is null or a NUL-terminated host string.
        let name = unsafe { memory::read_c_str(result) };
        self.free(result as *mut c_void);
        name
    }
}
