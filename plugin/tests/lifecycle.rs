use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_uint, c_void};
use std::ptr;
use std::sync::{Mutex, MutexGuard};

use poke_blocker::bindings::{uint64, anyID, PluginMenuItem, Ts3Functions};
use poke_blocker::exports::*;
use poke_blocker::memory;

/// The exports share process-wide slots, so tests take turns.
static SERIAL: Mutex<()> = Mutex::new(());

static PRINTED: Mutex<Vec<String>> = Mutex::new(Vec::new());
static LOGGED: Mutex<Vec<(String, c_int, String, u64)>> = Mutex::new(Vec::new());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|p| p.into_inner())
}

unsafe extern "C" fn fake_free(pointer: *mut c_void) -> c_uint {
    libc::free(pointer);
    0
}

unsafe extern "C" fn fake_print(message: *const c_char) {
    let text = CStr::from_ptr(message).to_string_lossy().into_owned();
    PRINTED.lock().unwrap().push(text);
}

unsafe extern "C" fn fake_log(
    message: *const c_char,
    severity: c_int,
    channel: *const c_char,
    log_id: uint64,
) -> c_uint {
    let message = CStr::from_ptr(message).to_string_lossy().into_owned();
    let channel = CStr::from_ptr(channel).to_string_lossy().into_owned();
    LOGGED.lock().unwrap().push((message, severity, channel, log_id));
    0
}

unsafe extern "C" fn fake_channel_of(_session: uint64, client: anyID, result: *mut uint64) -> c_uint {
    if client == 42 {
        *result = 5;
        0
    } else {
        0x0200
    }
}

unsafe extern "C" fn fake_channel_name(
    _session: uint64,
    channel: uint64,
    _flag: usize,
    result: *mut *mut c_char,
) -> c_uint {
    if channel != 5 {
        return 0x0300;
    }
    *result = memory::malloc_c_string("Lobby");
    0
}

unsafe extern "C" fn fake_path(path: *mut c_char, max_len: usize) {
    let value = b"/opt/client\0";
    let len = value.len().min(max_len);
    ptr::copy_nonoverlapping(value.as_ptr() as *const c_char, path, len);
}

fn install_fake_host() {
    let mut functions = Ts3Functions::empty();
    functions.free_memory = Some(fake_free);
    functions.log_message = Some(fake_log);
    functions.get_channel_of_client = Some(fake_channel_of);
    functions.get_channel_variable_as_string = Some(fake_channel_name);
    functions.get_app_path = Some(fake_path);
    functions.get_config_path = Some(fake_path);
    functions.print_message_to_current_tab = Some(fake_print);
    ts3plugin_setFunctionPointers(functions);

    PRINTED.lock().unwrap().clear();
    LOGGED.lock().unwrap().clear();
}

fn printed() -> Vec<String> {
    PRINTED.lock().unwrap().clone()
}

fn logged() -> Vec<(String, c_int, String, u64)> {
    LOGGED.lock().unwrap().clone()
}

fn poke(from: anyID, message: &str) -> c_int {
    let name = CString::new("Bob").unwrap();
    let uid = CString::new("abc123").unwrap();
    let message = CString::new(message).unwrap();
    unsafe {
        ts3plugin_onClientPokeEvent(7, from, name.as_ptr(), uid.as_ptr(), message.as_ptr(), 0)
    }
}

fn info_data() -> Option<String> {
    let mut data: *mut c_char = ptr::null_mut();
    unsafe {
        ts3plugin_infoData(7, 0, 0, &mut data);
        if data.is_null() {
            return None;
        }
        let text = memory::read_c_str(data).unwrap();
        ts3plugin_freeMemory(data as *mut c_void);
        Some(text)
    }
}

fn read(ptr: *const c_char) -> String {
    unsafe { memory::read_c_str(ptr).unwrap() }
}

#[test]
fn test_metadata() {
    assert_eq!(read(ts3plugin_name()), "Poke Blocker");
    assert_eq!(read(ts3plugin_version()), "0.1");
    assert_eq!(read(ts3plugin_author()), "sk0r / Czybik");
    assert!(read(ts3plugin_description()).contains("A shield against pokes."));
    assert_eq!(read(ts3plugin_infoTitle()), "Poke Blocker");
    assert_eq!(ts3plugin_apiVersion(), 20);
    assert_eq!(ts3plugin_requestAutoload(), 1);
    assert_eq!(ts3plugin_offersConfigure(), 0);
    assert!(ts3plugin_commandKeyword().is_null());
}

#[test]
fn test_block_and_allow_through_menu() {
    let _serial = serial();
    install_fake_host();
    assert_eq!(ts3plugin_init(), 0);
    assert_eq!(poke_blocker::is_blocking(), Some(false));
    assert_eq!(info_data().as_deref(), Some("OFF"));

    assert_eq!(poke(42, "hi"), 0);
    assert!(printed().is_empty());

    ts3plugin_onMenuItemEvent(7, 0, 0, 0);
    assert_eq!(poke_blocker::is_blocking(), Some(true));
    assert_eq!(printed(), ["[Poke Blocker] ** Blocking pokes **\n"]);
    assert_eq!(info_data().as_deref(), Some("ON"));

    assert_eq!(poke(42, "hi"), 1);
    let notices = printed();
    assert_eq!(notices.len(), 2);
    assert!(notices[1].contains("[url=client://0/abc123~Bob]Bob[/url]"));
    assert!(notices[1].contains("[url=channelid://5]Lobby[/url]"));

    let log = logged();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].0, notices[1]);
    assert_eq!(log[0].1, 4);
    assert_eq!(log[0].2, "Plugin");
    assert_eq!(log[0].3, 7);

    ts3plugin_onMenuItemEvent(7, 0, 1, 0);
    assert_eq!(poke_blocker::is_blocking(), Some(false));
    assert_eq!(poke(42, "hi"), 0);
    assert_eq!(printed().len(), 3);

    ts3plugin_shutdown();
    assert_eq!(poke_blocker::is_blocking(), None);
}

#[test]
fn test_empty_poke_dropped_silently() {
    let _serial = serial();
    install_fake_host();
    ts3plugin_init();
    ts3plugin_onMenuItemEvent(7, 0, 0, 0);
    PRINTED.lock().unwrap().clear();

    assert_eq!(poke(42, ""), 1);
    assert!(printed().is_empty());
    assert!(logged().is_empty());

    ts3plugin_shutdown();
}

#[test]
fn test_unknown_sender_channel_is_omitted() {
    let _serial = serial();
    install_fake_host();
    ts3plugin_init();
    ts3plugin_onMenuItemEvent(7, 0, 0, 0);

    assert_eq!(poke(99, "hi"), 1);
    let notices = printed();
    assert!(!notices[1].contains("in channel"));

    ts3plugin_shutdown();
}

#[test]
fn test_foreign_menu_items_ignored() {
    let _serial = serial();
    install_fake_host();
    ts3plugin_init();

    ts3plugin_onMenuItemEvent(7, 2, 0, 13);
    ts3plugin_onMenuItemEvent(7, 0, 55, 0);
    ts3plugin_onMenuItemEvent(7, 9, 0, 0);

    assert_eq!(poke_blocker::is_blocking(), Some(false));
    assert!(printed().is_empty());

    ts3plugin_shutdown();
}

#[test]
fn test_events_before_init_pass() {
    let _serial = serial();
    install_fake_host();
    ts3plugin_shutdown();

    assert_eq!(poke(42, "hi"), 0);
    ts3plugin_onMenuItemEvent(7, 0, 0, 0);
    assert_eq!(poke_blocker::is_blocking(), None);
    assert_eq!(info_data(), None);
}

#[test]
fn test_register_plugin_id_copies() {
    let _serial = serial();
    let id = CString::new("poke_blocker-1").unwrap();
    unsafe { ts3plugin_registerPluginID(id.as_ptr()) };
    drop(id);

    assert_eq!(poke_blocker::plugin_id().as_deref(), Some("poke_blocker-1"));
    ts3plugin_shutdown();
    assert_eq!(poke_blocker::plugin_id(), None);
}

#[test]
fn test_init_menus() {
    let mut items: *mut *mut PluginMenuItem = ptr::null_mut();
    let mut icon: *mut c_char = ptr::null_mut();

    unsafe {
        ts3plugin_initMenus(&mut items, &mut icon);
        assert!(!items.is_null());
        assert_eq!(read(icon), "main.png");

        let mut labels = Vec::new();
        let mut i = 0;
        while !(*items.add(i)).is_null() {
            let item = *items.add(i);
            labels.push(((*item).id, memory::read_buf(&(*item).text)));
            ts3plugin_freeMemory(item as *mut c_void);
            i += 1;
        }
        ts3plugin_freeMemory(items as *mut c_void);
        ts3plugin_freeMemory(icon as *mut c_void);

        assert_eq!(
            labels,
            vec![(0, "Block".to_string()), (1, "Allow".to_string())]
        );
    }
}
