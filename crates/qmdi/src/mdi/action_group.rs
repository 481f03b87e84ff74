//! A named, ordered, mergeable list of menu or toolbar items.
//!
//! An [`ActionGroup`] is the abstract definition of one menu or one toolbar.
//! Groups owned by a client are merged into the host's groups of the same
//! name when the client becomes active, and unmerged when it stops being
//! active. Realizing a group produces a [`Menu`] or fills a [`ToolBar`].
//!
//! # Merge points
//!
//! By default foreign items are appended. Calling
//! [`set_merge_point`](ActionGroup::set_merge_point) records the current item
//! count, and later merges splice foreign items at that index instead:
//!
//! ```
//! use std::sync::Arc;
//! use qmdi::mdi::ActionGroup;
//! use qmdi::widget::widgets::Action;
//!
//! let mut host_file = ActionGroup::new("&File");
//! host_file.add_action(Arc::new(Action::new("Open")));
//! host_file.set_merge_point();
//! host_file.add_action(Arc::new(Action::new("Quit")));
//!
//! let mut client_file = ActionGroup::new("&File");
//! client_file.add_action(Arc::new(Action::new("Save")));
//!
//! host_file.merge_group(&client_file);
//! assert_eq!(host_file.item_labels(), vec!["Open", "Save", "Quit"]);
//!
//! host_file.unmerge_group(&client_file);
//! assert_eq!(host_file.item_labels(), vec!["Open", "Quit"]);
//! ```

use std::sync::Arc;

use qmdi_core::logging::targets;
use qmdi_core::{Object, ObjectId};

use crate::widget::widgets::{
    Action, ActionCollection, EmbeddedWidget, Menu, SharedMenu, ToolBar,
};

// ============================================================================
// GroupItem
// ============================================================================

/// One entry of an [`ActionGroup`].
#[derive(Clone)]
pub enum GroupItem {
    /// An action; separators are actions too.
    Action(Arc<Action>),
    /// A sub-menu. Toolbars skip these.
    Menu(SharedMenu),
    /// A widget embedded in a toolbar. Menus skip these.
    Widget(Arc<EmbeddedWidget>),
}

impl GroupItem {
    /// Identity of the underlying object.
    pub fn id(&self) -> ObjectId {
        match self {
            GroupItem::Action(action) => action.object_id(),
            GroupItem::Menu(menu) => menu.read().object_id(),
            GroupItem::Widget(widget) => widget.object_id(),
        }
    }

    pub fn action(&self) -> Option<&Arc<Action>> {
        match self {
            GroupItem::Action(action) => Some(action),
            _ => None,
        }
    }

    /// A short label: the action text, `"-"` for separators, `"Title >"` for
    /// sub-menus and `"[name]"` for widgets.
    pub fn label(&self) -> String {
        match self {
            GroupItem::Action(action) if action.is_separator() => "-".to_string(),
            GroupItem::Action(action) => action.display_text(),
            GroupItem::Menu(menu) => format!("{} >", menu.read().display_title()),
            GroupItem::Widget(widget) => format!("[{}]", widget.name()),
        }
    }
}

impl From<Arc<Action>> for GroupItem {
    fn from(action: Arc<Action>) -> Self {
        GroupItem::Action(action)
    }
}

impl From<SharedMenu> for GroupItem {
    fn from(menu: SharedMenu) -> Self {
        GroupItem::Menu(menu)
    }
}

impl From<Arc<EmbeddedWidget>> for GroupItem {
    fn from(widget: Arc<EmbeddedWidget>) -> Self {
        GroupItem::Widget(widget)
    }
}

impl std::fmt::Debug for GroupItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

// ============================================================================
// ActionGroup
// ============================================================================

/// Bookkeeping for a foreign group currently merged into this one.
#[derive(Debug, Clone, Copy)]
struct MergedGroup {
    id: ObjectId,
    merge_location: Option<usize>,
    break_after: bool,
}

/// A named, ordered collection of actions, sub-menus and widgets.
pub struct ActionGroup {
    id: ObjectId,
    name: String,
    items: Vec<GroupItem>,
    merge_location: Option<usize>,
    break_after: bool,
    merged: Vec<MergedGroup>,
}

impl ActionGroup {
    /// Create an empty group. The name becomes the menu or toolbar title.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::next(),
            name: name.into(),
            items: Vec::new(),
            merge_location: None,
            break_after: false,
            merged: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the group. Realized chrome picks up the new name on the next
    /// realization pass. Lists rename through
    /// [`ActionGroupList::rename_group`](super::ActionGroupList::rename_group).
    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // =========================================================================
    // Adding items
    // =========================================================================

    /// Append an action. An action already in the group is moved to the end.
    pub fn add_action(&mut self, action: Arc<Action>) {
        self.add_item(GroupItem::Action(action), None);
    }

    /// Insert an action at `location` (clamped to the item count). An action
    /// already in the group is removed from its old position first.
    pub fn add_action_at(&mut self, action: Arc<Action>, location: usize) {
        self.add_item(GroupItem::Action(action), Some(location));
    }

    /// Add every action of a collection as a consecutive run starting at
    /// `location`, or appended when `location` is `None`.
    pub fn add_actions(&mut self, actions: &ActionCollection, location: Option<usize>) {
        let mut location = location.unwrap_or(self.items.len());
        for action in actions.actions() {
            self.add_item(GroupItem::Action(action), Some(location));
            location += 1;
        }
    }

    /// Add a sub-menu.
    pub fn add_menu(&mut self, menu: SharedMenu, location: Option<usize>) {
        self.add_item(GroupItem::Menu(menu), location);
    }

    /// Add a toolbar-embedded widget.
    pub fn add_widget(&mut self, widget: Arc<EmbeddedWidget>, location: Option<usize>) {
        self.add_item(GroupItem::Widget(widget), location);
    }

    /// Append a fresh separator and return it.
    pub fn add_separator(&mut self) -> Arc<Action> {
        let separator = Arc::new(Action::separator());
        self.add_item(GroupItem::Action(separator.clone()), None);
        separator
    }

    /// Insert a fresh separator at `location` and return it.
    pub fn add_separator_at(&mut self, location: usize) -> Arc<Action> {
        let separator = Arc::new(Action::separator());
        self.add_item(GroupItem::Action(separator.clone()), Some(location));
        separator
    }

    /// Add any item. Items are unique by identity: re-adding one moves it.
    pub fn add_item(&mut self, item: GroupItem, location: Option<usize>) {
        self.remove_item_by_id(item.id());
        match location {
            Some(location) => {
                let location = location.min(self.items.len());
                self.items.insert(location, item);
            }
            None => self.items.push(item),
        }
    }

    // =========================================================================
    // Removing items
    // =========================================================================

    pub fn contains_action(&self, action: &Action) -> bool {
        self.position_of(action.object_id()).is_some()
    }

    pub fn contains_item(&self, item: &GroupItem) -> bool {
        self.position_of(item.id()).is_some()
    }

    /// Remove an action. Absent actions are ignored.
    pub fn remove_action(&mut self, action: &Action) {
        self.remove_item_by_id(action.object_id());
    }

    /// Remove every action of a collection.
    pub fn remove_actions(&mut self, actions: &ActionCollection) {
        for action in actions.actions() {
            self.remove_action(&action);
        }
    }

    pub fn remove_menu(&mut self, menu: &SharedMenu) {
        let id = menu.read().object_id();
        self.remove_item_by_id(id);
    }

    pub fn remove_widget(&mut self, widget: &EmbeddedWidget) {
        self.remove_item_by_id(widget.object_id());
    }

    pub fn remove_item(&mut self, item: &GroupItem) {
        self.remove_item_by_id(item.id());
    }

    /// Remove every item. Merge bookkeeping is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn remove_item_by_id(&mut self, id: ObjectId) -> Option<GroupItem> {
        self.position_of(id).map(|pos| self.items.remove(pos))
    }

    fn position_of(&self, id: ObjectId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn items(&self) -> &[GroupItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// An empty group is never realized.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The actions of this group, separators included, in order.
    pub fn actions(&self) -> Vec<Arc<Action>> {
        self.items
            .iter()
            .filter_map(|item| item.action().cloned())
            .collect()
    }

    /// Labels of every item, in order. See [`GroupItem::label`].
    pub fn item_labels(&self) -> Vec<String> {
        self.items.iter().map(GroupItem::label).collect()
    }

    // =========================================================================
    // Merge points and breaks
    // =========================================================================

    /// Record the current item count as the index foreign merges splice at.
    ///
    /// There is a single merge point per group; calling this again moves it.
    pub fn set_merge_point(&mut self) {
        self.merge_location = Some(self.items.len());
    }

    pub fn clear_merge_point(&mut self) {
        self.merge_location = None;
    }

    /// The effective splice index for foreign merges.
    ///
    /// This is the largest of this group's own merge location and the merge
    /// locations of the groups currently merged into it. `None` means append.
    pub fn merge_point(&self) -> Option<usize> {
        self.merged
            .iter()
            .filter_map(|merged| merged.merge_location)
            .chain(self.merge_location)
            .max()
    }

    /// Request a toolbar break after this group's toolbar.
    pub fn set_break_after(&mut self, break_after: bool) {
        self.break_after = break_after;
    }

    pub fn with_break_after(mut self, break_after: bool) -> Self {
        self.break_after = break_after;
        self
    }

    /// Whether a toolbar break follows this group, either requested directly
    /// or by a merged group that requested one.
    pub fn break_after(&self) -> bool {
        self.break_after || self.merged.iter().any(|merged| merged.break_after)
    }

    /// Whether `other` is currently merged into this group.
    pub fn is_merged(&self, other: &ActionGroup) -> bool {
        self.merged.iter().any(|merged| merged.id == other.id)
    }

    // =========================================================================
    // Merge / unmerge
    // =========================================================================

    /// Merge the items of `other` into this group.
    ///
    /// Each item of `other`, in order, is re-added at `merge_point + i`, or
    /// appended when there is no merge point. Merged widgets are shown.
    /// `other` itself is not modified.
    pub fn merge_group(&mut self, other: &ActionGroup) {
        if self.is_merged(other) {
            tracing::debug!(
                target: targets::MERGE,
                group = %self.name,
                "group already merged, merging again"
            );
            self.merged.retain(|merged| merged.id != other.id);
        }

        let merge_point = self.merge_point();
        for (i, item) in other.items.iter().enumerate() {
            if let GroupItem::Widget(widget) = item {
                widget.show();
            }
            self.add_item(item.clone(), merge_point.map(|m| m + i));
        }

        self.merged.push(MergedGroup {
            id: other.id,
            merge_location: other.merge_location,
            break_after: other.break_after,
        });

        tracing::trace!(
            target: targets::MERGE,
            group = %self.name,
            merged = other.items.len(),
            ?merge_point,
            "merged group"
        );
    }

    /// Remove the items of `other` from this group.
    ///
    /// Widgets are hidden. The break request and merge location recorded from
    /// `other` are withdrawn.
    pub fn unmerge_group(&mut self, other: &ActionGroup) {
        for item in &other.items {
            if self.remove_item_by_id(item.id()).is_some() {
                if let GroupItem::Widget(widget) = item {
                    widget.hide();
                }
            }
        }
        self.merged.retain(|merged| merged.id != other.id);

        tracing::trace!(
            target: targets::MERGE,
            group = %self.name,
            unmerged = other.items.len(),
            "unmerged group"
        );
    }

    // =========================================================================
    // Realization
    // =========================================================================

    /// Realize this group as a menu.
    ///
    /// Returns `None` when the group is empty (an existing menu is dropped).
    /// Otherwise `existing` is retitled and refilled, or a new menu is built.
    /// Actions and sub-menus are added in order; widgets are skipped.
    pub fn update_menu(&self, existing: Option<Menu>) -> Option<Menu> {
        if self.is_empty() {
            return None;
        }

        let mut menu = existing.unwrap_or_default();
        menu.set_title(self.name.clone());
        menu.clear();
        for item in &self.items {
            match item {
                GroupItem::Action(action) => menu.add_action(action.clone()),
                GroupItem::Menu(submenu) => menu.add_submenu(submenu.clone()),
                GroupItem::Widget(_) => {}
            }
        }
        Some(menu)
    }

    /// Realize this group into a toolbar.
    ///
    /// The toolbar is retitled and refilled with actions and widgets in order
    /// (sub-menus are skipped). It is visible iff the group is non-empty.
    pub fn update_tool_bar(&self, toolbar: &mut ToolBar) {
        toolbar.set_title(self.name.clone());
        toolbar.hide();
        toolbar.clear();
        for item in &self.items {
            match item {
                GroupItem::Action(action) => toolbar.add_action(action.clone()),
                GroupItem::Widget(widget) => toolbar.add_widget(widget.clone()),
                GroupItem::Menu(_) => {}
            }
        }
        if !self.is_empty() {
            toolbar.show();
        }
    }
}

impl Object for ActionGroup {
    fn object_id(&self) -> ObjectId {
        self.id
    }

    fn object_name(&self) -> String {
        self.name.clone()
    }
}

impl std::fmt::Debug for ActionGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionGroup")
            .field("name", &self.name)
            .field("items", &self.items)
            .field("merge_point", &self.merge_point())
            .field("break_after", &self.break_after())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::widgets::MenuItem;

    fn action(text: &str) -> Arc<Action> {
        Arc::new(Action::new(text))
    }

    fn group_of(name: &str, actions: &[&Arc<Action>]) -> ActionGroup {
        let mut group = ActionGroup::new(name);
        for a in actions {
            group.add_action(Arc::clone(a));
        }
        group
    }

    #[test]
    fn test_add_is_idempotent_and_moves() {
        let (a, b) = (action("A"), action("B"));
        let mut group = group_of("G", &[&a, &b]);
        group.add_action(a.clone());
        assert_eq!(group.item_labels(), vec!["B", "A"]);

        group.add_action_at(a.clone(), 0);
        assert_eq!(group.item_labels(), vec!["A", "B"]);
        assert_eq!(group.len(), 2);

        group.add_action_at(action("C"), 99);
        assert_eq!(group.item_labels(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_identity_not_text() {
        let first = action("Same");
        let second = action("Same");
        let mut group = group_of("G", &[&first, &second]);
        assert_eq!(group.len(), 2);
        group.remove_action(&first);
        assert!(!group.contains_action(&first));
        assert!(group.contains_action(&second));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut group = group_of("G", &[&action("A")]);
        group.remove_action(&action("Other"));
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_add_actions_run() {
        let collection = ActionCollection::non_exclusive();
        collection.add_action(action("X"));
        collection.add_action(action("Y"));

        let mut group = group_of("G", &[&action("A"), &action("B")]);
        group.add_actions(&collection, Some(1));
        assert_eq!(group.item_labels(), vec!["A", "X", "Y", "B"]);

        group.remove_actions(&collection);
        assert_eq!(group.item_labels(), vec!["A", "B"]);
    }

    #[test]
    fn test_merge_point_splicing() {
        let (a, b, c, d) = (action("a"), action("b"), action("c"), action("d"));
        let mut group = group_of("G", &[&a, &b]);
        group.set_merge_point();
        group.add_action(c);
        group.add_action(d);

        let foreign = group_of("G", &[&action("x"), &action("y")]);
        group.merge_group(&foreign);
        assert_eq!(group.item_labels(), vec!["a", "b", "x", "y", "c", "d"]);
    }

    #[test]
    fn test_merge_without_point_appends() {
        let mut group = group_of("G", &[&action("a")]);
        let foreign = group_of("G", &[&action("x"), &action("y")]);
        group.merge_group(&foreign);
        assert_eq!(group.item_labels(), vec!["a", "x", "y"]);
        assert_eq!(foreign.len(), 2);
    }

    #[test]
    fn test_merge_unmerge_inverse() {
        let mut group = group_of("G", &[&action("a"), &action("b")]);
        group.set_merge_point();
        group.add_action(action("c"));
        let before = group.item_labels();

        let foreign = group_of("G", &[&action("x"), &action("y")]);
        group.merge_group(&foreign);
        group.unmerge_group(&foreign);
        assert_eq!(group.item_labels(), before);
        assert!(!group.is_merged(&foreign));
    }

    #[test]
    fn test_set_merge_point_overwrites() {
        let mut group = group_of("G", &[&action("a")]);
        group.set_merge_point();
        group.add_action(action("b"));
        group.set_merge_point();
        assert_eq!(group.merge_point(), Some(2));

        group.clear_merge_point();
        assert_eq!(group.merge_point(), None);
    }

    #[test]
    fn test_merge_point_includes_merged_groups() {
        let mut host = group_of("G", &[&action("a")]);
        host.set_merge_point();

        let mut plugin = group_of("G", &[&action("p1"), &action("p2"), &action("p3")]);
        plugin.set_merge_point();
        host.merge_group(&plugin);
        assert_eq!(host.merge_point(), Some(3));

        host.unmerge_group(&plugin);
        assert_eq!(host.merge_point(), Some(1));
    }

    #[test]
    fn test_break_after_follows_merged_groups() {
        let mut host = ActionGroup::new("Tools");
        let client = ActionGroup::new("Tools").with_break_after(true);
        assert!(!host.break_after());

        host.merge_group(&client);
        assert!(host.break_after());
        host.unmerge_group(&client);
        assert!(!host.break_after());
    }

    #[test]
    fn test_merge_shows_and_unmerge_hides_widgets() {
        let widget = Arc::new(EmbeddedWidget::new("search"));
        widget.hide();
        let mut foreign = ActionGroup::new("Search");
        foreign.add_widget(widget.clone(), None);

        let mut host = ActionGroup::new("Search");
        host.merge_group(&foreign);
        assert!(widget.is_visible());
        assert_eq!(host.item_labels(), vec!["[search]"]);

        host.unmerge_group(&foreign);
        assert!(!widget.is_visible());
        assert!(host.is_empty());
    }

    #[test]
    fn test_update_menu() {
        let empty = ActionGroup::new("&Empty");
        assert!(empty.update_menu(Some(Menu::with_title("stale"))).is_none());

        let recent = Menu::with_title("&Recent").into_shared();
        let mut group = ActionGroup::new("&File");
        group.add_action(action("&Open"));
        group.add_menu(recent, None);
        group.add_separator();
        group.add_widget(Arc::new(EmbeddedWidget::new("combo")), None);
        group.add_action(action("&Quit"));

        let menu = group.update_menu(Some(Menu::with_title("old"))).unwrap();
        assert_eq!(menu.title(), "&File");
        assert_eq!(menu.item_labels(), vec!["Open", "Recent >", "-", "Quit"]);
        assert!(matches!(menu.items()[1], MenuItem::Submenu(_)));
    }

    #[test]
    fn test_update_tool_bar() {
        let mut group = ActionGroup::new("Main");
        group.add_action(action("New"));
        group.add_menu(Menu::with_title("Sub").into_shared(), None);
        group.add_widget(Arc::new(EmbeddedWidget::new("zoom")), None);

        let mut toolbar = ToolBar::new("placeholder");
        group.update_tool_bar(&mut toolbar);
        assert_eq!(toolbar.title(), "Main");
        assert_eq!(toolbar.item_labels(), vec!["New", "[zoom]"]);
        assert!(toolbar.is_visible());

        // Realizing again with unchanged contents gives the same toolbar.
        group.update_tool_bar(&mut toolbar);
        assert_eq!(toolbar.item_labels(), vec!["New", "[zoom]"]);

        group.clear();
        group.update_tool_bar(&mut toolbar);
        assert!(toolbar.is_empty());
        assert!(!toolbar.is_visible());
    }
}
