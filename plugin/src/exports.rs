//! Symbols the host resolves when loading the plugin
//!
//! Every function here converts raw arguments, takes the single plugin
//! instance out of its slot and delegates to `poke_blocker_shared`. Nothing
//! in here may panic across the boundary.

#![allow(non_snake_case)]

use std::ffi::CString;
use std::os::raw::{c_char, c_int, c_void};
use std::ptr;
use std::sync::OnceLock;

use poke_blocker_shared::plugin::{
    description, PLUGIN_API_VERSION, PLUGIN_AUTHOR, PLUGIN_NAME, PLUGIN_VERSION,
};
use poke_blocker_shared::{Decision, FilterConfig, IncomingPoke, MenuKind, Plugin};
use tracing::{debug, info, warn};

use crate::bindings::{anyID, uint64, PluginMenuItem, Ts3Functions, PLUGIN_OFFERS_NO_CONFIGURE};
use crate::{host_handle, lock, logging, memory, menu, FUNCTIONS, PLUGIN, PLUGIN_ID};

fn cached(cell: &'static OnceLock<CString>, text: impl FnOnce() -> String) -> *const c_char {
    cell.get_or_init(|| memory::to_c_string_truncated(&text()))
        .as_ptr()
}

/// Unique name identifying this plugin
#[no_mangle]
pub extern "C" fn ts3plugin_name() -> *const c_char {
    static NAME: OnceLock<CString> = OnceLock::new();
    cached(&NAME, || PLUGIN_NAME.to_string())
}

#[no_mangle]
pub extern "C" fn ts3plugin_version() -> *const c_char {
    static VERSION: OnceLock<CString> = OnceLock::new();
    cached(&VERSION, || PLUGIN_VERSION.to_string())
}

/// Must match the client's API major version or the plugin is refused
#[no_mangle]
pub extern "C" fn ts3plugin_apiVersion() -> c_int {
    PLUGIN_API_VERSION
}

#[no_mangle]
pub extern "C" fn ts3plugin_author() -> *const c_char {
    static AUTHOR: OnceLock<CString> = OnceLock::new();
    cached(&AUTHOR, || PLUGIN_AUTHOR.to_string())
}

#[no_mangle]
pub extern "C" fn ts3plugin_description() -> *const c_char {
    static DESCRIPTION: OnceLock<CString> = OnceLock::new();
    cached(&DESCRIPTION, description)
}

#[no_mangle]
pub extern "C" fn ts3plugin_setFunctionPointers(funcs: Ts3Functions) {
    *lock(&FUNCTIONS) = Some(funcs);
}

/// 0 = success, 1 = failure. Initialisation cannot fail.
#[no_mangle]
pub extern "C" fn ts3plugin_init() -> c_int {
    logging::init_tracing();

    let config = FilterConfig::from_env().unwrap_or_else(|e| {
        warn!("Ignoring invalid configuration: {}", e);
        FilterConfig::default()
    });
    info!("{} {} init: {:?}", PLUGIN_NAME, PLUGIN_VERSION, config);

    for (label, path) in host_handle().paths() {
        info!("{} path: {}", label, path);
    }

    *lock(&PLUGIN) = Some(Plugin::new(config));
    0
}

#[no_mangle]
pub extern "C" fn ts3plugin_shutdown() {
    info!("{} shutdown", PLUGIN_NAME);
    *lock(&PLUGIN) = None;
    *lock(&PLUGIN_ID) = None;
}

#[no_mangle]
pub extern "C" fn ts3plugin_offersConfigure() -> c_int {
    PLUGIN_OFFERS_NO_CONFIGURE
}

/// The host's buffer is only valid during the call, so the ID is copied.
///
/// # Safety
/// `id` must be null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn ts3plugin_registerPluginID(id: *const c_char) {
    let id = memory::read_c_str_lossy(id);
    debug!("registerPluginID: {}", id);
    *lock(&PLUGIN_ID) = Some(id);
}

/// No chat command keyword
#[no_mangle]
pub extern "C" fn ts3plugin_commandKeyword() -> *const c_char {
    ptr::null()
}

#[no_mangle]
pub extern "C" fn ts3plugin_requestAutoload() -> c_int {
    1
}

/// # Safety
/// Both out-pointers must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn ts3plugin_initMenus(
    menu_items: *mut *mut *mut PluginMenuItem,
    menu_icon: *mut *mut c_char,
) {
    if menu_items.is_null() {
        return;
    }
    menu::write_menus(menu_items, menu_icon);
}

/// Release memory handed to the host by `initMenus` or `infoData`
///
/// # Safety
/// `data` must be null or a pointer this plugin allocated and has not freed.
#[no_mangle]
pub unsafe extern "C" fn ts3plugin_freeMemory(data: *mut c_void) {
    libc::free(data);
}

/// Title of the plugin's line in the info frame
#[no_mangle]
pub extern "C" fn ts3plugin_infoTitle() -> *const c_char {
    ts3plugin_name()
}

/// Show whether pokes are blocked for any selected server, channel or
/// client.
///
/// # Safety
/// `data` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn ts3plugin_infoData(
    _server_connection_handler_id: uint64,
    _id: uint64,
    _item_type: c_int,
    data: *mut *mut c_char,
) {
    if data.is_null() {
        return;
    }
    *data = match lock(&PLUGIN).as_ref() {
        Some(plugin) => memory::malloc_c_string(plugin.state().status_label()),
        None => ptr::null_mut(),
    };
}

/// Returns 1 to make the host drop the poke, 0 to process it.
///
/// # Safety
/// String arguments must be null or NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn ts3plugin_onClientPokeEvent(
    server_connection_handler_id: uint64,
    from_client_id: anyID,
    poker_name: *const c_char,
    poker_unique_identity: *const c_char,
    message: *const c_char,
    ff_ignored: c_int,
) -> c_int {
    let poke = IncomingPoke {
        session: server_connection_handler_id,
        sender_id: from_client_id,
        sender_name: memory::read_c_str_lossy(poker_name),
        sender_identity: memory::read_c_str_lossy(poker_unique_identity),
        message: memory::read_c_str_lossy(message),
    };
    debug!(
        "onClientPokeEvent: session={} from={} ({}) ffIgnored={}",
        poke.session, poke.sender_id, poke.sender_identity, ff_ignored
    );

    let guard = lock(&PLUGIN);
    let Some(plugin) = guard.as_ref() else {
        return Decision::Pass.as_host_code();
    };
    plugin.on_poke(poke, &mut host_handle()).as_host_code()
}

#[no_mangle]
pub extern "C" fn ts3plugin_onMenuItemEvent(
    server_connection_handler_id: uint64,
    kind: c_int,
    menu_item_id: c_int,
    selected_item_id: uint64,
) {
    debug!(
        "onMenuItemEvent: session={} type={} id={} selected={}",
        server_connection_handler_id, kind, menu_item_id, selected_item_id
    );
    let Some(kind) = MenuKind::from_raw(kind) else {
        return;
    };

    let mut guard = lock(&PLUGIN);
    if let Some(plugin) = guard.as_mut() {
        plugin.on_menu_item(kind, menu_item_id, &mut host_handle());
    }
}
