//! Hand-written bindings for the host's plugin SDK (API version 20)
//!
//! Mirrors `ts3_functions.h`, `plugin_definitions.h` and the parts of
//! `public_definitions.h` the plugin touches.

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_int, c_uint, c_void};

pub type uint64 = u64;
pub type anyID = u16;

pub const ERROR_OK: c_uint = 0;

/// `ChannelProperties::CHANNEL_NAME`
pub const CHANNEL_NAME: usize = 0;

pub const PLUGIN_MENU_BUFSZ: usize = 128;

/// `PluginOffersConfigure::PLUGIN_OFFERS_NO_CONFIGURE`
pub const PLUGIN_OFFERS_NO_CONFIGURE: c_int = 0;

/// `struct PluginMenuItem`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct PluginMenuItem {
    /// `enum PluginMenuType`
    pub kind: c_int,
    pub id: c_int,
    pub text: [c_char; PLUGIN_MENU_BUFSZ],
    pub icon: [c_char; PLUGIN_MENU_BUFSZ],
}

/// Slot the plugin never calls; only its size matters.
pub type RawFn = Option<unsafe extern "C" fn()>;

/// `struct TS3Functions`.
///
/// The host passes the table by value, so only the leading slots up to the
/// last one the plugin calls are declared. Skipped runs are kept as arrays
/// with the first and last function of each run noted.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Ts3Functions {
    /// getClientLibVersion .. getErrorMessage
    _lib: [RawFn; 5],

    pub free_memory: Option<unsafe extern "C" fn(pointer: *mut c_void) -> c_uint>,

    pub log_message: Option<
        unsafe extern "C" fn(
            log_message: *const c_char,
            severity: c_int,
            channel: *const c_char,
            log_id: uint64,
        ) -> c_uint,
    >,

    /// getPlaybackDeviceList .. getClientList
    _devices_to_clients: [RawFn; 76],

    pub get_channel_of_client: Option<
        unsafe extern "C" fn(
            server_connection_handler_id: uint64,
            client_id: anyID,
            result: *mut uint64,
        ) -> c_uint,
    >,

    /// getChannelVariableAsInt, getChannelVariableAsUInt64
    _channel_numeric_vars: [RawFn; 2],

    pub get_channel_variable_as_string: Option<
        unsafe extern "C" fn(
            server_connection_handler_id: uint64,
            channel_id: uint64,
            flag: usize,
            result: *mut *mut c_char,
        ) -> c_uint,
    >,

    /// getChannelIDFromChannelNames .. serverPropertyStringToFlag
    _channels_to_flags: [RawFn; 92],

    pub get_app_path: Option<unsafe extern "C" fn(path: *mut c_char, max_len: usize)>,
    pub get_resources_path: Option<unsafe extern "C" fn(path: *mut c_char, max_len: usize)>,
    pub get_config_path: Option<unsafe extern "C" fn(path: *mut c_char, max_len: usize)>,
    pub get_plugin_path: Option<unsafe extern "C" fn(path: *mut c_char, max_len: usize)>,

    pub get_current_server_connection_handler_id: Option<unsafe extern "C" fn() -> uint64>,

    /// printMessage
    _print_message: RawFn,

    pub print_message_to_current_tab: Option<unsafe extern "C" fn(message: *const c_char)>,
}

impl Ts3Functions {
    /// Table with every slot empty; used by tests to install fakes.
    pub const fn empty() -> Self {
        Self {
            _lib: [None; 5],
            free_memory: None,
            log_message: None,
            _devices_to_clients: [None; 76],
            get_channel_of_client: None,
            _channel_numeric_vars: [None; 2],
            get_channel_variable_as_string: None,
            _channels_to_flags: [None; 92],
            get_app_path: None,
            get_resources_path: None,
            get_config_path: None,
            get_plugin_path: None,
            get_current_server_connection_handler_id: None,
            _print_message: None,
            print_message_to_current_tab: None,
        }
    }
}

impl std::fmt::Debug for Ts3Functions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ts3Functions")
            .field("free_memory", &self.free_memory.is_some())
            .field("log_message", &self.log_message.is_some())
            .field("get_channel_of_client", &self.get_channel_of_client.is_some())
            .field(
                "get_channel_variable_as_string",
                &self.get_channel_variable_as_string.is_some(),
            )
            .field(
                "print_message_to_current_tab",
                &self.print_message_to_current_tab.is_some(),
            )
            .finish_non_exhaustive()
    }
}
