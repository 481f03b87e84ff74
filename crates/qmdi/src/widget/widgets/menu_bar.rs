//! Realized menu bar.
//!
//! A [`MenuBar`] holds the ordered top-level menus of a main window. The
//! merge engine clears and refills it on every realization pass.

use std::sync::Arc;

use qmdi_core::Signal;

use super::{Action, Menu, SharedMenu};
use crate::widget::shortcut::parse_mnemonic;

/// A horizontal bar of top-level menus.
///
/// # Signals
///
/// - [`triggered`](MenuBar::triggered): Emitted when an action is triggered
///   through [`trigger`](MenuBar::trigger)
pub struct MenuBar {
    menus: Vec<SharedMenu>,
    visible: bool,

    /// Signal emitted when an action is triggered.
    pub triggered: Signal<Arc<Action>>,
}

impl MenuBar {
    /// Create a new empty menu bar.
    pub fn new() -> Self {
        Self {
            menus: Vec::new(),
            visible: true,
            triggered: Signal::new(),
        }
    }

    // =========================================================================
    // Menu Management
    // =========================================================================

    /// Append a menu.
    pub fn add_menu(&mut self, menu: SharedMenu) {
        self.menus.push(menu);
    }

    /// Append a new menu built from `menu`, returning the shared handle.
    pub fn add_owned_menu(&mut self, menu: Menu) -> SharedMenu {
        let shared = menu.into_shared();
        self.menus.push(shared.clone());
        shared
    }

    /// Insert a menu at a specific index (clamped).
    pub fn insert_menu(&mut self, index: usize, menu: SharedMenu) {
        let index = index.min(self.menus.len());
        self.menus.insert(index, menu);
    }

    /// Remove a menu at a specific index.
    pub fn remove_menu(&mut self, index: usize) -> Option<SharedMenu> {
        (index < self.menus.len()).then(|| self.menus.remove(index))
    }

    /// Clear all menus from the menu bar.
    pub fn clear(&mut self) {
        self.menus.clear();
    }

    pub fn menu_count(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Get a menu by index.
    pub fn menu(&self, index: usize) -> Option<&SharedMenu> {
        self.menus.get(index)
    }

    /// Find a menu by title (mnemonic markers ignored).
    pub fn find_menu(&self, title: &str) -> Option<SharedMenu> {
        let wanted = parse_mnemonic(title).display_text;
        self.menus
            .iter()
            .find(|menu| menu.read().display_title() == wanted)
            .cloned()
    }

    /// Display titles of all menus, in order.
    pub fn titles(&self) -> Vec<String> {
        self.menus
            .iter()
            .map(|menu| menu.read().display_title())
            .collect()
    }

    /// Item labels of the menu with the given title, if present.
    pub fn menu_labels(&self, title: &str) -> Option<Vec<String>> {
        self.find_menu(title).map(|menu| menu.read().item_labels())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    // =========================================================================
    // Activation
    // =========================================================================

    /// Trigger an action by menu title and action text.
    ///
    /// Returns `true` if an enabled action was found and triggered.
    pub fn trigger(&self, menu_title: &str, action_text: &str) -> bool {
        let Some(menu) = self.find_menu(menu_title) else {
            return false;
        };
        let Some(action) = menu.read().find_action(action_text) else {
            return false;
        };
        if !action.is_enabled() {
            return false;
        }
        action.trigger();
        self.triggered.emit(action);
        true
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MenuBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuBar")
            .field("titles", &self.titles())
            .finish()
    }
}
