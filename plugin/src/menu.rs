//! Menu registration

use std::mem::size_of;
use std::os::raw::c_char;
use std::ptr;

use poke_blocker_shared::types::menu::{MenuCommand, MenuKind, MENU_ICON};

use crate::bindings::{PluginMenuItem, PLUGIN_MENU_BUFSZ};
use crate::memory;

/// Host representation of one global menu entry
pub fn menu_item(command: MenuCommand) -> PluginMenuItem {
    let mut item = PluginMenuItem {
        kind: MenuKind::Global.as_raw(),
        id: command.id(),
        text: [0; PLUGIN_MENU_BUFSZ],
        icon: [0; PLUGIN_MENU_BUFSZ],
    };
    memory::copy_to_buf(&mut item.text, command.label());
    memory::copy_to_buf(&mut item.icon, command.icon());
    item
}

/// Fill the out-parameters of `ts3plugin_initMenus`.
///
/// Writes a `malloc`ed, null-terminated array of `malloc`ed items and a
/// `malloc`ed icon name. Every allocation is later handed back through
/// `ts3plugin_freeMemory`. On allocation failure the array pointer is left
/// null, which the host treats as "no menus".
///
/// # Safety
/// Both out-pointers must be valid for writes.
pub unsafe fn write_menus(menu_items: *mut *mut *mut PluginMenuItem, menu_icon: *mut *mut c_char) {
    *menu_items = ptr::null_mut();
    if !menu_icon.is_null() {
        *menu_icon = memory::malloc_c_string(MENU_ICON);
    }

    let count = MenuCommand::ALL.len();
    let list = libc::malloc(size_of::<*mut PluginMenuItem>() * (count + 1)) as *mut *mut PluginMenuItem;
    if list.is_null() {
        return;
    }

    for (i, command) in MenuCommand::ALL.into_iter().enumerate() {
        let item = libc::malloc(size_of::<PluginMenuItem>()) as *mut PluginMenuItem;
        if item.is_null() {
            free_menus(list, i);
            return;
        }
        item.write(menu_item(command));
        *list.add(i) = item;
    }
    *list.add(count) = ptr::null_mut();
    *menu_items = list;
}

/// Free the first `filled` items of `list` and the list itself
unsafe fn free_menus(list: *mut *mut PluginMenuItem, filled: usize) {
    for i in 0..filled {
        libc::free(*list.add(i) as *mut libc::c_void);
    }
    libc::free(list as *mut libc::c_void);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_fields() {
        let item = menu_item(MenuCommand::Allow);
        assert_eq!(item.kind, 0);
        assert_eq!(item.id, 1);
        assert_eq!(memory::read_buf(&item.text), "Allow");
        assert_eq!(memory::read_buf(&item.icon), "allow.png");
    }

    #[test]
    fn test_write_menus() {
        let mut items: *mut *mut PluginMenuItem = ptr::null_mut();
        let mut icon: *mut c_char = ptr::null_mut();

        unsafe {
            write_menus(&mut items, &mut icon);
            assert!(!items.is_null());
            assert_eq!(memory::read_c_str(icon).unwrap(), "main.png");

            let first = &**items;
            let second = &**items.add(1);
            assert_eq!(memory::read_buf(&first.text), "Block");
            assert_eq!(first.id, MenuCommand::Block.id());
            assert_eq!(memory::read_buf(&second.text), "Allow");
            assert_eq!(second.id, MenuCommand::Allow.id());
            assert!((*items.add(2)).is_null());

            free_menus(items, 2);
            libc::free(icon as *mut libc::c_void);
        }
    }
}
