//! Poke Blocker client plugin
//!
//! Shared library loaded by the TeamSpeak 3 client. Incoming pokes are
//! dropped while blocking is enabled; the "Block" and "Allow" entries in the
//! Plugins menu flip the toggle.
//!
//! The host calls into [`exports`] from a single thread. The statics below
//! only exist because the C ABI gives no other place to keep state between
//! calls; their locks are never contended.

pub mod bindings;
pub mod exports;
pub mod host;
pub mod logging;
pub mod memory;
pub mod menu;

use std::sync::{Mutex, MutexGuard};

use poke_blocker_shared::Plugin;

use crate::bindings::Ts3Functions;
use crate::host::Ts3Host;

/// Function table installed by the host before `init`
static FUNCTIONS: Mutex<Option<Ts3Functions>> = Mutex::new(None);

/// The plugin instance, alive between `init` and `shutdown`
static PLUGIN: Mutex<Option<Plugin>> = Mutex::new(None);

/// ID assigned by the host for menus and plugin commands
static PLUGIN_ID: Mutex<Option<String>> = Mutex::new(None);

/// Lock a slot, recovering from poisoning.
///
/// `std::sync::Mutex` is not reentrant. The poke and menu exports hold the
/// `PLUGIN` guard while calling host sinks, so a host that re-entered an
/// export from inside a sink call would deadlock. The host never does.
fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Host adapter over the currently installed function table
pub fn host_handle() -> Ts3Host {
    Ts3Host::new(*lock(&FUNCTIONS))
}

/// ID the host registered for this plugin, if any
pub fn plugin_id() -> Option<String> {
    lock(&PLUGIN_ID).clone()
}

/// Whether blocking is on; `None` outside `init`..`shutdown`
pub fn is_blocking() -> Option<bool> {
    lock(&PLUGIN).as_ref().map(|p| p.state().is_blocking())
}
