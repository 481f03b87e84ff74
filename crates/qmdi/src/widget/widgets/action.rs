//! Actions: the user commands that populate menus and toolbars.
//!
//! An [`Action`] is a non-visual object. It is shared as `Arc<Action>` between
//! every menu and toolbar it appears in, and its identity is its
//! [`ObjectId`], never its text: two actions labelled "Save" are distinct
//! items, and one action added twice is still one item.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use qmdi::widget::widgets::Action;
//!
//! let save = Arc::new(
//!     Action::new("&Save")
//!         .with_shortcut_str("Ctrl+S")
//!         .with_tooltip("Save the current document"),
//! );
//!
//! save.triggered.connect(|_| println!("Save triggered!"));
//! save.trigger();
//! ```

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use qmdi_core::logging::targets;
use qmdi_core::{ConnectionId, Object, ObjectBase, ObjectId, Signal};

use crate::widget::shortcut::{KeySequence, MnemonicText, parse_mnemonic};

// ============================================================================
// Shortcut Context
// ============================================================================

/// Determines the scope in which a keyboard shortcut is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShortcutContext {
    /// Only while the widget the action is attached to has focus.
    ///
    /// Client actions attached to a client widget use this so that two
    /// documents can bind the same keys.
    Widget,

    /// Anywhere within the main window (default).
    #[default]
    Window,

    /// Across all windows of the application.
    Application,
}

impl ShortcutContext {
    /// Check if this context requires widget focus.
    pub fn requires_focus(self) -> bool {
        matches!(self, ShortcutContext::Widget)
    }
}

// ============================================================================
// Action
// ============================================================================

struct ActionState {
    text: String,
    mnemonic_cache: MnemonicText,
    shortcut: Option<KeySequence>,
    tooltip: String,
    status_tip: String,
    enabled: bool,
    visible: bool,
    checkable: bool,
    checked: bool,
    shortcut_context: ShortcutContext,
}

/// A non-visual object representing a user command.
///
/// # Signals
///
/// - [`triggered`](Action::triggered): Emitted when the action is activated
/// - [`toggled`](Action::toggled): Emitted when a checkable action's state changes
/// - [`changed`](Action::changed): Emitted when any property changes
pub struct Action {
    object_base: ObjectBase,
    state: RwLock<ActionState>,
    separator: bool,

    /// Emitted when the action is activated, with the checked state
    /// (always false for non-checkable actions).
    pub triggered: Signal<bool>,

    /// Emitted when a checkable action's state changes.
    pub toggled: Signal<bool>,

    /// Emitted when any action property changes.
    pub changed: Signal<()>,
}

impl Action {
    /// Create a new action with the given text.
    ///
    /// The text can include a mnemonic indicator using `&`:
    /// - `"&File"` - 'F' is the mnemonic
    /// - `"Fish && Chips"` - literal '&', no mnemonic
    pub fn new(text: impl Into<String>) -> Self {
        Self::build(text.into(), false)
    }

    /// Create a separator action.
    ///
    /// Separators divide runs of actions in menus and toolbars. Every call
    /// creates a distinct separator with its own identity.
    pub fn separator() -> Self {
        Self::build(String::new(), true)
    }

    fn build(text: String, separator: bool) -> Self {
        let mnemonic_cache = parse_mnemonic(&text);
        Self {
            object_base: ObjectBase::new(),
            state: RwLock::new(ActionState {
                text,
                mnemonic_cache,
                shortcut: None,
                tooltip: String::new(),
                status_tip: String::new(),
                enabled: true,
                visible: true,
                checkable: false,
                checked: false,
                shortcut_context: ShortcutContext::default(),
            }),
            separator,
            triggered: Signal::new(),
            toggled: Signal::new(),
            changed: Signal::new(),
        }
    }

    /// Check if this action is a separator.
    pub fn is_separator(&self) -> bool {
        self.separator
    }

    // ========================================================================
    // Identity
    // ========================================================================

    /// Get the object name.
    pub fn object_name(&self) -> String {
        self.object_base.name()
    }

    /// Set the object name, used to look actions up by a stable key.
    pub fn set_object_name(&self, name: impl Into<String>) {
        self.object_base.set_name(name);
    }

    /// Builder pattern for setting the object name.
    pub fn with_object_name(self, name: impl Into<String>) -> Self {
        self.set_object_name(name);
        self
    }

    // ========================================================================
    // Text
    // ========================================================================

    /// Get the action's text, including any `&` marker.
    pub fn text(&self) -> String {
        self.state.read().text.clone()
    }

    /// Set the action's text.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        let mnemonic_cache = parse_mnemonic(&text);
        {
            let mut state = self.state.write();
            if state.text == text {
                return;
            }
            state.text = text;
            state.mnemonic_cache = mnemonic_cache;
        }
        self.emit_changed();
    }

    /// Get the display text (with mnemonic marker processed).
    pub fn display_text(&self) -> String {
        self.state.read().mnemonic_cache.display_text.clone()
    }

    /// Get the mnemonic character, if any.
    pub fn mnemonic(&self) -> Option<char> {
        self.state.read().mnemonic_cache.mnemonic
    }

    // ========================================================================
    // Shortcut
    // ========================================================================

    /// Get the action's keyboard shortcut.
    pub fn shortcut(&self) -> Option<KeySequence> {
        self.state.read().shortcut.clone()
    }

    /// Set the action's keyboard shortcut.
    pub fn set_shortcut(&self, shortcut: Option<KeySequence>) {
        {
            let mut state = self.state.write();
            if state.shortcut == shortcut {
                return;
            }
            state.shortcut = shortcut;
        }
        self.emit_changed();
    }

    /// Builder pattern for setting shortcut.
    pub fn with_shortcut(self, shortcut: KeySequence) -> Self {
        self.set_shortcut(Some(shortcut));
        self
    }

    /// Builder pattern for setting shortcut from a string.
    ///
    /// Unparseable strings leave the action without a shortcut.
    pub fn with_shortcut_str(self, shortcut: &str) -> Self {
        match shortcut.parse() {
            Ok(seq) => self.set_shortcut(Some(seq)),
            Err(err) => tracing::warn!(
                target: targets::MERGE,
                shortcut,
                %err,
                "ignoring invalid shortcut"
            ),
        }
        self
    }

    /// Get the shortcut context.
    pub fn shortcut_context(&self) -> ShortcutContext {
        self.state.read().shortcut_context
    }

    /// Set the shortcut context.
    pub fn set_shortcut_context(&self, context: ShortcutContext) {
        {
            let mut state = self.state.write();
            if state.shortcut_context == context {
                return;
            }
            state.shortcut_context = context;
        }
        self.emit_changed();
    }

    /// Builder pattern for setting shortcut context.
    pub fn with_shortcut_context(self, context: ShortcutContext) -> Self {
        self.set_shortcut_context(context);
        self
    }

    // ========================================================================
    // Tooltip and Status
    // ========================================================================

    pub fn tooltip(&self) -> String {
        self.state.read().tooltip.clone()
    }

    pub fn set_tooltip(&self, tooltip: impl Into<String>) {
        self.state.write().tooltip = tooltip.into();
        self.emit_changed();
    }

    /// Builder pattern for setting tooltip.
    pub fn with_tooltip(self, tooltip: impl Into<String>) -> Self {
        self.set_tooltip(tooltip);
        self
    }

    pub fn status_tip(&self) -> String {
        self.state.read().status_tip.clone()
    }

    pub fn set_status_tip(&self, tip: impl Into<String>) {
        self.state.write().status_tip = tip.into();
        self.emit_changed();
    }

    // ========================================================================
    // Enabled / Visible
    // ========================================================================

    pub fn is_enabled(&self) -> bool {
        self.state.read().enabled
    }

    pub fn set_enabled(&self, enabled: bool) {
        {
            let mut state = self.state.write();
            if state.enabled == enabled {
                return;
            }
            state.enabled = enabled;
        }
        self.emit_changed();
    }

    /// Builder pattern for setting enabled state.
    pub fn with_enabled(self, enabled: bool) -> Self {
        self.set_enabled(enabled);
        self
    }

    pub fn is_visible(&self) -> bool {
        self.state.read().visible
    }

    pub fn set_visible(&self, visible: bool) {
        {
            let mut state = self.state.write();
            if state.visible == visible {
                return;
            }
            state.visible = visible;
        }
        self.emit_changed();
    }

    // ========================================================================
    // Checkable State
    // ========================================================================

    pub fn is_checkable(&self) -> bool {
        self.state.read().checkable
    }

    /// Set whether the action is checkable.
    ///
    /// Making a checked action non-checkable unchecks it.
    pub fn set_checkable(&self, checkable: bool) {
        let unchecked;
        {
            let mut state = self.state.write();
            if state.checkable == checkable {
                return;
            }
            state.checkable = checkable;
            unchecked = !checkable && state.checked;
            if unchecked {
                state.checked = false;
            }
        }
        if unchecked {
            self.toggled.emit(false);
        }
        self.emit_changed();
    }

    /// Builder pattern for setting checkable state.
    pub fn with_checkable(self, checkable: bool) -> Self {
        self.set_checkable(checkable);
        self
    }

    pub fn is_checked(&self) -> bool {
        self.state.read().checked
    }

    /// Set the checked state. No effect unless the action is checkable.
    pub fn set_checked(&self, checked: bool) {
        {
            let mut state = self.state.write();
            if !state.checkable || state.checked == checked {
                return;
            }
            state.checked = checked;
        }
        self.toggled.emit(checked);
        self.emit_changed();
    }

    /// Toggle the checked state of a checkable action.
    pub fn toggle(&self) {
        let checked = !self.is_checked();
        self.set_checked(checked);
    }

    // ========================================================================
    // Activation
    // ========================================================================

    /// Trigger the action programmatically.
    ///
    /// Disabled actions and separators ignore this. Checkable actions flip
    /// their state before `triggered` is emitted.
    pub fn trigger(&self) {
        if self.separator || !self.is_enabled() {
            return;
        }

        if self.is_checkable() {
            self.toggle();
        }
        self.triggered.emit(self.is_checked());
    }

    fn emit_changed(&self) {
        self.changed.emit(());
    }
}

impl Object for Action {
    fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }

    fn object_name(&self) -> String {
        self.object_base.name()
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("Action")
            .field("id", &self.object_base.id())
            .field("text", &state.text)
            .field("separator", &self.separator)
            .field("enabled", &state.enabled)
            .finish()
    }
}

// ============================================================================
// ActionCollection
// ============================================================================

struct ActionCollectionState {
    actions: Vec<(Arc<Action>, ConnectionId)>,
    exclusive: bool,
    enabled: bool,
}

/// A set of related actions, optionally mutually exclusive.
///
/// Used for radio-style choices (e.g. one of several syntax modes) and as the
/// unit handed to [`ActionGroup::add_actions`](crate::mdi::ActionGroup::add_actions),
/// which inserts the whole run at once.
///
/// Collections are shared as `Arc<ActionCollection>`. In an exclusive
/// collection, checking one member unchecks the others, however the member
/// got checked.
pub struct ActionCollection {
    object_base: ObjectBase,
    state: RwLock<ActionCollectionState>,
    this: Weak<ActionCollection>,

    /// Emitted with the newly checked action of an exclusive collection.
    pub checked_changed: Signal<Option<Arc<Action>>>,
}

impl ActionCollection {
    /// Create a new exclusive collection.
    pub fn new() -> Arc<Self> {
        Self::build(true)
    }

    /// Create a non-exclusive collection.
    pub fn non_exclusive() -> Arc<Self> {
        Self::build(false)
    }

    fn build(exclusive: bool) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            object_base: ObjectBase::new(),
            state: RwLock::new(ActionCollectionState {
                actions: Vec::new(),
                exclusive,
                enabled: true,
            }),
            this: this.clone(),
            checked_changed: Signal::new(),
        })
    }

    /// Add an action. Adding an action already present does nothing.
    pub fn add_action(&self, action: Arc<Action>) {
        let mut state = self.state.write();
        if state
            .actions
            .iter()
            .any(|(a, _)| a.object_id() == action.object_id())
        {
            return;
        }
        if !state.enabled {
            action.set_enabled(false);
        }

        let collection = self.this.clone();
        let member = Arc::downgrade(&action);
        let connection = action.toggled.connect(move |&checked| {
            if !checked {
                return;
            }
            if let (Some(collection), Some(member)) = (collection.upgrade(), member.upgrade()) {
                collection.member_checked(&member);
            }
        });
        state.actions.push((action, connection));
    }

    /// Remove an action and stop tracking its checked state.
    pub fn remove_action(&self, action: &Action) {
        self.state.write().actions.retain(|(a, connection)| {
            let keep = a.object_id() != action.object_id();
            if !keep {
                a.toggled.disconnect(*connection);
            }
            keep
        });
    }

    /// Get all actions in insertion order.
    pub fn actions(&self) -> Vec<Arc<Action>> {
        self.state
            .read()
            .actions
            .iter()
            .map(|(a, _)| a.clone())
            .collect()
    }

    /// Get the currently checked action.
    pub fn checked_action(&self) -> Option<Arc<Action>> {
        self.state
            .read()
            .actions
            .iter()
            .map(|(a, _)| a)
            .find(|a| a.is_checked())
            .cloned()
    }

    pub fn is_exclusive(&self) -> bool {
        self.state.read().exclusive
    }

    pub fn set_exclusive(&self, exclusive: bool) {
        self.state.write().exclusive = exclusive;
    }

    pub fn is_enabled(&self) -> bool {
        self.state.read().enabled
    }

    /// Enable or disable every action in the collection.
    pub fn set_enabled(&self, enabled: bool) {
        let actions = {
            let mut state = self.state.write();
            if state.enabled == enabled {
                return;
            }
            state.enabled = enabled;
            state.actions.iter().map(|(a, _)| a.clone()).collect::<Vec<_>>()
        };
        for action in actions {
            action.set_enabled(enabled);
        }
    }

    /// Uncheck every other member after `checked` became checked.
    fn member_checked(&self, checked: &Arc<Action>) {
        let others: Vec<Arc<Action>> = {
            let state = self.state.read();
            if !state.exclusive {
                return;
            }
            state
                .actions
                .iter()
                .map(|(a, _)| a)
                .filter(|a| a.object_id() != checked.object_id())
                .cloned()
                .collect()
        };
        for action in others {
            action.set_checked(false);
        }
        self.checked_changed.emit(Some(checked.clone()));
    }
}

impl Drop for ActionCollection {
    fn drop(&mut self) {
        for (action, connection) in self.state.get_mut().actions.drain(..) {
            action.toggled.disconnect(connection);
        }
    }
}

impl Object for ActionCollection {
    fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    #[test]
    fn test_action_new() {
        let action = Action::new("&Save");
        assert_eq!(action.text(), "&Save");
        assert_eq!(action.display_text(), "Save");
        assert_eq!(action.mnemonic(), Some('s'));
        assert!(action.is_enabled());
        assert!(action.is_visible());
        assert!(!action.is_checkable());
        assert!(!action.is_separator());
    }

    #[test]
    fn test_actions_with_same_text_are_distinct() {
        let a = Action::new("Save");
        let b = Action::new("Save");
        assert_ne!(a.object_id(), b.object_id());
    }

    #[test]
    fn test_separator_identity() {
        let a = Action::separator();
        let b = Action::separator();
        assert!(a.is_separator());
        assert!(a.text().is_empty());
        assert_ne!(a.object_id(), b.object_id());

        // An action with empty text is not a separator.
        assert!(!Action::new("").is_separator());
    }

    #[test]
    fn test_action_checkable() {
        let action = Action::new("Bold").with_checkable(true);
        action.set_checked(true);
        assert!(action.is_checked());
        action.toggle();
        assert!(!action.is_checked());

        action.set_checked(true);
        action.set_checkable(false);
        assert!(!action.is_checked());
    }

    #[test]
    fn test_action_trigger() {
        let action = Action::new("Test").with_checkable(true);
        let triggered = Arc::new(AtomicBool::new(false));
        let triggered_clone = triggered.clone();

        action.triggered.connect(move |&checked| {
            triggered_clone.store(checked, Ordering::SeqCst);
        });

        action.trigger();
        assert!(triggered.load(Ordering::SeqCst));
        assert!(action.is_checked());
    }

    #[test]
    fn test_action_disabled_no_trigger() {
        let action = Action::new("Test").with_enabled(false);
        let count = Arc::new(AtomicU32::new(0));
        let count_clone = count.clone();
        action.triggered.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        action.trigger();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_action_shortcut() {
        let action = Action::new("Save").with_shortcut_str("Ctrl+S");
        assert_eq!(action.shortcut().unwrap().to_string(), "Ctrl+S");

        let bad = Action::new("Bad").with_shortcut_str("Ctrl+Nope");
        assert!(bad.shortcut().is_none());
    }

    #[test]
    fn test_action_changed_signal() {
        let action = Action::new("Test");
        let changed_count = Arc::new(AtomicU32::new(0));
        let changed_clone = changed_count.clone();
        action.changed.connect(move |_| {
            changed_clone.fetch_add(1, Ordering::SeqCst);
        });

        action.set_text("New Text");
        assert_eq!(changed_count.load(Ordering::SeqCst), 1);

        action.set_text("New Text");
        assert_eq!(changed_count.load(Ordering::SeqCst), 1);

        action.set_enabled(false);
        assert_eq!(changed_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_object_name() {
        let action = Action::new("&Close").with_object_name("close_tab");
        assert_eq!(action.object_name(), "close_tab");
    }

    #[test]
    fn test_collection_exclusive() {
        let collection = ActionCollection::new();
        let a = Arc::new(Action::new("C++").with_checkable(true));
        let b = Arc::new(Action::new("Rust").with_checkable(true));
        collection.add_action(a.clone());
        collection.add_action(b.clone());
        collection.add_action(a.clone());
        assert_eq!(collection.actions().len(), 2);

        a.set_checked(true);
        b.set_checked(true);

        assert!(!a.is_checked());
        assert!(b.is_checked());
        assert_eq!(
            collection.checked_action().map(|x| x.object_id()),
            Some(b.object_id())
        );
    }

    #[test]
    fn test_collection_unchecks_others_on_its_own() {
        let collection = ActionCollection::new();
        let modes: Vec<Arc<Action>> = ["Plain", "Markdown", "Rust"]
            .into_iter()
            .map(|text| Arc::new(Action::new(text).with_checkable(true)))
            .collect();
        for mode in &modes {
            collection.add_action(mode.clone());
        }

        let announced = Arc::new(AtomicU32::new(0));
        let announced_clone = announced.clone();
        collection.checked_changed.connect(move |_| {
            announced_clone.fetch_add(1, Ordering::SeqCst);
        });

        modes[0].set_checked(true);
        modes[2].trigger();
        assert!(!modes[0].is_checked());
        assert!(!modes[1].is_checked());
        assert!(modes[2].is_checked());
        assert_eq!(announced.load(Ordering::SeqCst), 2);

        // Removed members are no longer tracked.
        collection.remove_action(&modes[2]);
        modes[1].set_checked(true);
        assert!(modes[2].is_checked());
    }

    #[test]
    fn test_non_exclusive_collection_allows_many_checked() {
        let collection = ActionCollection::non_exclusive();
        let a = Arc::new(Action::new("Bold").with_checkable(true));
        let b = Arc::new(Action::new("Italic").with_checkable(true));
        collection.add_action(a.clone());
        collection.add_action(b.clone());
        a.set_checked(true);
        b.set_checked(true);
        assert!(a.is_checked() && b.is_checked());
    }

    #[test]
    fn test_dropped_collection_releases_members() {
        let a = Arc::new(Action::new("A").with_checkable(true));
        {
            let collection = ActionCollection::new();
            collection.add_action(a.clone());
            assert_eq!(a.toggled.connection_count(), 1);
        }
        assert_eq!(a.toggled.connection_count(), 0);
        a.set_checked(true);
        assert!(a.is_checked());
    }

    #[test]
    fn test_collection_enable_disable() {
        let collection = ActionCollection::non_exclusive();
        let a = Arc::new(Action::new("One"));
        collection.add_action(a.clone());
        collection.set_enabled(false);
        assert!(!a.is_enabled());

        let late = Arc::new(Action::new("Late"));
        collection.add_action(late.clone());
        assert!(!late.is_enabled());
    }

    #[test]
    fn test_shortcut_context() {
        assert!(ShortcutContext::Widget.requires_focus());
        assert!(!ShortcutContext::Window.requires_focus());
    }
}
