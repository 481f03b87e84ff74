//! Realized toolbars and the toolbar registry.
//!
//! This module provides:
//!
//! - [`ToolBar`]: a titled row of actions, separators and embedded widgets
//! - [`EmbeddedWidget`]: a handle for a non-action widget living in a toolbar
//!   (a combo box, a search field)
//! - [`ToolBarList`]: the ordered registry a host keeps of every toolbar it
//!   has created, looked up by title
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use qmdi::widget::widgets::{Action, ToolBar};
//!
//! let mut toolbar = ToolBar::new("File");
//! toolbar.add_action(Arc::new(Action::new("&Open")));
//! toolbar.add_separator();
//! toolbar.add_action(Arc::new(Action::new("&Save")));
//! assert_eq!(toolbar.item_count(), 3);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use qmdi_core::{Object, ObjectBase, ObjectId, Signal};

use super::Action;

/// A toolbar shared between the registry and the window it is docked in.
pub type SharedToolBar = Arc<RwLock<ToolBar>>;

// ============================================================================
// ToolBarArea
// ============================================================================

/// Toolbar areas within a main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolBarArea {
    /// Top toolbar area (below menu bar).
    #[default]
    Top,
    /// Bottom toolbar area (above status bar).
    Bottom,
    Left,
    Right,
}

impl ToolBarArea {
    /// Returns all toolbar areas as an iterator.
    pub fn all() -> impl Iterator<Item = ToolBarArea> {
        [
            ToolBarArea::Top,
            ToolBarArea::Bottom,
            ToolBarArea::Left,
            ToolBarArea::Right,
        ]
        .into_iter()
    }

    /// Check if this is a horizontal toolbar area (top or bottom).
    pub fn is_horizontal(&self) -> bool {
        matches!(self, ToolBarArea::Top | ToolBarArea::Bottom)
    }
}

// ============================================================================
// EmbeddedWidget
// ============================================================================

/// A widget embedded in a toolbar.
///
/// Only the identity and visibility of the widget matter to the merge
/// engine: a merged widget is shown, an unmerged one is hidden.
pub struct EmbeddedWidget {
    object_base: ObjectBase,
    visible: AtomicBool,

    /// Emitted when visibility changes.
    pub visibility_changed: Signal<bool>,
}

impl EmbeddedWidget {
    /// Create a visible widget handle with the given object name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            object_base: ObjectBase::with_name(name),
            visible: AtomicBool::new(true),
            visibility_changed: Signal::new(),
        }
    }

    pub fn name(&self) -> String {
        self.object_base.name()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    pub fn set_visible(&self, visible: bool) {
        if self.visible.swap(visible, Ordering::SeqCst) != visible {
            self.visibility_changed.emit(visible);
        }
    }

    pub fn show(&self) {
        self.set_visible(true);
    }

    pub fn hide(&self) {
        self.set_visible(false);
    }
}

impl Object for EmbeddedWidget {
    fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }

    fn object_name(&self) -> String {
        self.object_base.name()
    }
}

impl std::fmt::Debug for EmbeddedWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedWidget")
            .field("name", &self.name())
            .field("visible", &self.is_visible())
            .finish()
    }
}

// ============================================================================
// ToolBarItem
// ============================================================================

/// An item in a toolbar.
#[derive(Clone)]
pub enum ToolBarItem {
    /// A toolbar button associated with an action.
    Action(Arc<Action>),
    /// A visual separator line.
    Separator,
    /// A custom widget embedded in the toolbar.
    Widget(Arc<EmbeddedWidget>),
}

impl ToolBarItem {
    pub fn is_action(&self) -> bool {
        matches!(self, ToolBarItem::Action(_))
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, ToolBarItem::Separator)
    }

    pub fn is_widget(&self) -> bool {
        matches!(self, ToolBarItem::Widget(_))
    }

    /// Get the action, if this is an action item.
    pub fn action(&self) -> Option<&Arc<Action>> {
        match self {
            ToolBarItem::Action(action) => Some(action),
            _ => None,
        }
    }

    /// Short label used in listings: action text, `"-"` or `"[name]"`.
    pub fn label(&self) -> String {
        match self {
            ToolBarItem::Action(action) => action.display_text(),
            ToolBarItem::Separator => "-".to_string(),
            ToolBarItem::Widget(widget) => format!("[{}]", widget.name()),
        }
    }
}

impl std::fmt::Debug for ToolBarItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// ToolBar
// ============================================================================

/// A titled, dockable row of actions and widgets.
///
/// # Signals
///
/// - [`action_triggered`](ToolBar::action_triggered): Emitted when a button is clicked
/// - [`visibility_changed`](ToolBar::visibility_changed): Emitted when shown or hidden
pub struct ToolBar {
    object_base: ObjectBase,
    title: String,
    items: Vec<ToolBarItem>,
    visible: bool,
    area: Option<ToolBarArea>,

    /// Signal emitted when an action is triggered.
    pub action_triggered: Signal<Arc<Action>>,
    /// Signal emitted when visibility changes.
    pub visibility_changed: Signal<bool>,
}

impl ToolBar {
    /// Create a new, visible, undocked toolbar with the given title.
    ///
    /// The object name starts out equal to the title.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            object_base: ObjectBase::with_name(title.clone()),
            title,
            items: Vec::new(),
            visible: true,
            area: None,
            action_triggered: Signal::new(),
            visibility_changed: Signal::new(),
        }
    }

    /// Wrap this toolbar for sharing.
    pub fn into_shared(self) -> SharedToolBar {
        Arc::new(RwLock::new(self))
    }

    // =========================================================================
    // Title
    // =========================================================================

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The object name, used to persist toolbar layout.
    pub fn object_name(&self) -> String {
        self.object_base.name()
    }

    pub fn set_object_name(&self, name: impl Into<String>) {
        self.object_base.set_name(name);
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Add an action. Separator actions become [`ToolBarItem::Separator`].
    pub fn add_action(&mut self, action: Arc<Action>) {
        if action.is_separator() {
            self.items.push(ToolBarItem::Separator);
        } else {
            self.items.push(ToolBarItem::Action(action));
        }
    }

    pub fn add_separator(&mut self) {
        self.items.push(ToolBarItem::Separator);
    }

    /// Add an embedded widget.
    pub fn add_widget(&mut self, widget: Arc<EmbeddedWidget>) {
        self.items.push(ToolBarItem::Widget(widget));
    }

    /// Insert an action at a specific index (clamped).
    pub fn insert_action(&mut self, index: usize, action: Arc<Action>) {
        let index = index.min(self.items.len());
        self.items.insert(index, ToolBarItem::Action(action));
    }

    /// Remove every item showing this action.
    pub fn remove_action(&mut self, action: &Action) {
        self.items.retain(|item| {
            item.action()
                .is_none_or(|a| a.object_id() != action.object_id())
        });
    }

    /// Remove an embedded widget.
    pub fn remove_widget(&mut self, widget: &EmbeddedWidget) {
        self.items.retain(|item| match item {
            ToolBarItem::Widget(w) => w.object_id() != widget.object_id(),
            _ => true,
        });
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[ToolBarItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Labels of every item, in order.
    pub fn item_labels(&self) -> Vec<String> {
        self.items.iter().map(ToolBarItem::label).collect()
    }

    // =========================================================================
    // Visibility and Docking
    // =========================================================================

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.visibility_changed.emit(visible);
        }
    }

    pub fn show(&mut self) {
        self.set_visible(true);
    }

    pub fn hide(&mut self) {
        self.set_visible(false);
    }

    /// The area this toolbar is docked in, if any.
    pub fn area(&self) -> Option<ToolBarArea> {
        self.area
    }

    pub(crate) fn set_area(&mut self, area: Option<ToolBarArea>) {
        self.area = area;
    }

    // =========================================================================
    // Activation
    // =========================================================================

    /// Click the button for the action at `index`.
    pub fn trigger_item(&self, index: usize) -> bool {
        match self.items.get(index) {
            Some(ToolBarItem::Action(action)) if action.is_enabled() => {
                action.trigger();
                self.action_triggered.emit(action.clone());
                true
            }
            _ => false,
        }
    }
}

impl Object for ToolBar {
    fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }

    fn object_name(&self) -> String {
        self.object_base.name()
    }
}

impl std::fmt::Debug for ToolBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolBar")
            .field("title", &self.title)
            .field("items", &self.items)
            .field("visible", &self.visible)
            .finish()
    }
}

// ============================================================================
// ToolBarList
// ============================================================================

/// Registry of every toolbar created for a window, in creation order.
///
/// Toolbars are found again by title so that realizing the same group twice
/// reuses its toolbar instead of creating a second one.
#[derive(Default)]
pub struct ToolBarList {
    toolbars: Vec<SharedToolBar>,
}

impl ToolBarList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a toolbar by exact title.
    pub fn find_by_title(&self, title: &str) -> Option<SharedToolBar> {
        self.toolbars
            .iter()
            .find(|tb| tb.read().title() == title)
            .cloned()
    }

    pub fn push(&mut self, toolbar: SharedToolBar) {
        self.toolbars.push(toolbar);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedToolBar> {
        self.toolbars.iter()
    }

    pub fn len(&self) -> usize {
        self.toolbars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toolbars.is_empty()
    }

    /// Titles of every registered toolbar, in creation order.
    pub fn titles(&self) -> Vec<String> {
        self.toolbars
            .iter()
            .map(|tb| tb.read().title().to_string())
            .collect()
    }

    /// Titles of the toolbars currently visible.
    pub fn visible_titles(&self) -> Vec<String> {
        self.toolbars
            .iter()
            .filter(|tb| tb.read().is_visible())
            .map(|tb| tb.read().title().to_string())
            .collect()
    }
}

impl std::fmt::Debug for ToolBarList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.titles()).finish()
    }
}
