//! Realized menus.
//!
//! A [`Menu`] is the toolkit-neutral result of realizing an action group: a
//! title plus an ordered list of [`MenuItem`]s. A rendering backend mirrors
//! it; the merge engine only ever rebuilds it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use qmdi::widget::widgets::{Action, Menu};
//!
//! let mut menu = Menu::with_title("&File");
//! menu.add_action(Arc::new(Action::new("&Open")));
//! menu.add_separator();
//! menu.add_action(Arc::new(Action::new("&Quit")));
//!
//! assert_eq!(menu.display_title(), "File");
//! assert_eq!(menu.item_count(), 3);
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use qmdi_core::{Object, ObjectBase, ObjectId, Signal};

use super::Action;
use crate::widget::shortcut::parse_mnemonic;

/// A menu shared between the group that owns it and the menus it is shown in.
pub type SharedMenu = Arc<RwLock<Menu>>;

// ============================================================================
// MenuItem
// ============================================================================

/// An item in a menu.
#[derive(Clone)]
pub enum MenuItem {
    /// A clickable action item.
    Action(Arc<Action>),
    /// A visual separator line.
    Separator,
    /// A nested menu; its title is the menu's own title.
    Submenu(SharedMenu),
}

impl MenuItem {
    pub fn is_separator(&self) -> bool {
        matches!(self, MenuItem::Separator)
    }

    pub fn is_action(&self) -> bool {
        matches!(self, MenuItem::Action(_))
    }

    pub fn is_submenu(&self) -> bool {
        matches!(self, MenuItem::Submenu(_))
    }

    /// Get the action, if this is an action item.
    pub fn action(&self) -> Option<&Arc<Action>> {
        match self {
            MenuItem::Action(action) => Some(action),
            _ => None,
        }
    }

    /// Check if this item is visible.
    pub fn is_visible(&self) -> bool {
        match self {
            MenuItem::Action(action) => action.is_visible(),
            MenuItem::Separator => true,
            MenuItem::Submenu(menu) => menu.read().has_visible_items(),
        }
    }

    /// Get the display text for this item.
    pub fn display_text(&self) -> Option<String> {
        match self {
            MenuItem::Action(action) => Some(action.display_text()),
            MenuItem::Separator => None,
            MenuItem::Submenu(menu) => Some(menu.read().display_title()),
        }
    }
}

impl std::fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuItem::Action(action) => write!(f, "Action({:?})", action.text()),
            MenuItem::Separator => f.write_str("Separator"),
            MenuItem::Submenu(menu) => write!(f, "Submenu({:?})", menu.read().title()),
        }
    }
}

// ============================================================================
// Menu
// ============================================================================

/// A popup or menu-bar menu.
///
/// # Signals
///
/// - [`triggered`](Menu::triggered): Emitted when an item's action is triggered
pub struct Menu {
    object_base: ObjectBase,
    title: String,
    items: Vec<MenuItem>,
    enabled: bool,

    /// Signal emitted when an action is triggered through this menu.
    pub triggered: Signal<Arc<Action>>,
}

impl Menu {
    /// Create a new empty, untitled menu.
    pub fn new() -> Self {
        Self {
            object_base: ObjectBase::new(),
            title: String::new(),
            items: Vec::new(),
            enabled: true,
            triggered: Signal::new(),
        }
    }

    /// Create a new menu with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        let mut menu = Self::new();
        menu.title = title.into();
        menu
    }

    /// Wrap this menu for sharing.
    pub fn into_shared(self) -> SharedMenu {
        Arc::new(RwLock::new(self))
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Add an action to the menu.
    ///
    /// Separator actions become [`MenuItem::Separator`].
    pub fn add_action(&mut self, action: Arc<Action>) {
        self.items.push(Self::item_for(action));
    }

    /// Add a separator to the menu.
    pub fn add_separator(&mut self) {
        self.items.push(MenuItem::Separator);
    }

    /// Add a submenu to the menu.
    pub fn add_submenu(&mut self, menu: SharedMenu) {
        self.items.push(MenuItem::Submenu(menu));
    }

    /// Insert an action at a specific index (clamped to the item count).
    pub fn insert_action(&mut self, index: usize, action: Arc<Action>) {
        let index = index.min(self.items.len());
        self.items.insert(index, Self::item_for(action));
    }

    /// Remove an item at a specific index.
    pub fn remove_item(&mut self, index: usize) -> Option<MenuItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Clear all items from the menu.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if the menu has any visible items.
    pub fn has_visible_items(&self) -> bool {
        self.items.iter().any(MenuItem::is_visible)
    }

    /// The non-separator actions of this menu, in order.
    pub fn actions(&self) -> Vec<Arc<Action>> {
        self.items
            .iter()
            .filter_map(|item| item.action().cloned())
            .collect()
    }

    /// Display texts of every item, with `"-"` standing for separators and
    /// submenus shown as `"Title >"`.
    pub fn item_labels(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| match item {
                MenuItem::Action(action) => action.display_text(),
                MenuItem::Separator => "-".to_string(),
                MenuItem::Submenu(menu) => format!("{} >", menu.read().display_title()),
            })
            .collect()
    }

    /// Find an action by its display text (mnemonic markers ignored).
    pub fn find_action(&self, display_text: &str) -> Option<Arc<Action>> {
        let wanted = parse_mnemonic(display_text).display_text;
        self.items
            .iter()
            .filter_map(MenuItem::action)
            .find(|action| action.display_text() == wanted)
            .cloned()
    }

    // =========================================================================
    // Title and State
    // =========================================================================

    /// Get the menu title, including any `&` marker.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The title with mnemonic markers processed.
    pub fn display_title(&self) -> String {
        parse_mnemonic(&self.title).display_text
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    // =========================================================================
    // Action Triggering
    // =========================================================================

    /// Trigger the action at the given index.
    ///
    /// Returns `true` if an enabled action was triggered.
    pub fn trigger_item(&self, index: usize) -> bool {
        match self.items.get(index) {
            Some(MenuItem::Action(action)) if self.enabled && action.is_enabled() => {
                action.trigger();
                self.triggered.emit(action.clone());
                true
            }
            _ => false,
        }
    }

    /// Trigger the action with the given display text.
    pub fn trigger_action(&self, display_text: &str) -> bool {
        let wanted = parse_mnemonic(display_text).display_text;
        self.items
            .iter()
            .position(|item| {
                item.action()
                    .is_some_and(|action| action.display_text() == wanted)
            })
            .is_some_and(|index| self.trigger_item(index))
    }

    fn item_for(action: Arc<Action>) -> MenuItem {
        if action.is_separator() {
            MenuItem::Separator
        } else {
            MenuItem::Action(action)
        }
    }
}

impl Object for Menu {
    fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Menu")
            .field("title", &self.title)
            .field("items", &self.items)
            .finish()
    }
}
