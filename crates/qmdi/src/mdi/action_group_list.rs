//! Named collections of action groups.
//!
//! An [`ActionGroupList`] describes a whole menu bar or a whole toolbar set:
//! one [`ActionGroup`] per menu or toolbar, keyed by name, kept in the order
//! the names were first used. Looking up an unknown name creates an empty
//! group.

use std::sync::Arc;

use qmdi_core::logging::targets;

use super::action_group::ActionGroup;
use crate::widget::widgets::{
    Action, Menu, MenuBar, ToolBar, ToolBarArea, ToolBarHost, ToolBarList,
};

/// An insertion-ordered, name-unique list of [`ActionGroup`]s.
#[derive(Debug, Default)]
pub struct ActionGroupList {
    groups: Vec<ActionGroup>,
}

impl ActionGroupList {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Get the group with this name, creating an empty one at the end of the
    /// list if there is none yet.
    pub fn get_action_group(&mut self, name: &str) -> &mut ActionGroup {
        let index = match self.groups.iter().position(|g| g.name() == name) {
            Some(index) => index,
            None => {
                self.groups.push(ActionGroup::new(name));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    /// Look a group up without creating it.
    pub fn group(&self, name: &str) -> Option<&ActionGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }

    /// Rename the group `old` to `new`.
    ///
    /// Names stay unique: renaming onto a name already in the list, or
    /// renaming a group that does not exist, logs and returns `false`.
    pub fn rename_group(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.group(old).is_some();
        }
        if self.group(new).is_some() {
            tracing::warn!(target: targets::MERGE, old, new, "group name already taken");
            return false;
        }
        match self.groups.iter_mut().find(|g| g.name() == old) {
            Some(group) => {
                group.set_name(new);
                true
            }
            None => {
                tracing::warn!(target: targets::MERGE, old, new, "renaming an unknown group");
                false
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionGroup> {
        self.groups.iter()
    }

    /// Group names in list order.
    pub fn names(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Drop every group.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Every action in every group, in list order.
    pub fn all_actions(&self) -> Vec<Arc<Action>> {
        self.groups.iter().flat_map(ActionGroup::actions).collect()
    }

    // =========================================================================
    // Merge / unmerge
    // =========================================================================

    /// Merge each group of `other` into this list's group of the same name.
    pub fn merge_group_list(&mut self, other: &ActionGroupList) {
        for group in &other.groups {
            self.get_action_group(group.name()).merge_group(group);
        }
    }

    /// Undo [`merge_group_list`](Self::merge_group_list). Groups left empty
    /// stay in the list; they are simply not realized.
    pub fn unmerge_group_list(&mut self, other: &ActionGroupList) {
        for group in &other.groups {
            self.get_action_group(group.name()).unmerge_group(group);
        }
    }

    // =========================================================================
    // Realization
    // =========================================================================

    /// Rebuild a menu bar from this list. Empty groups are skipped.
    pub fn update_menu_bar(&self, menu_bar: &mut MenuBar) {
        menu_bar.clear();
        for menu in self.groups.iter().filter_map(|g| g.update_menu(None)) {
            menu_bar.add_owned_menu(menu);
        }
    }

    /// Build a new menu bar from this list.
    pub fn to_menu_bar(&self) -> MenuBar {
        let mut menu_bar = MenuBar::new();
        self.update_menu_bar(&mut menu_bar);
        menu_bar
    }

    /// Rebuild a popup menu whose entries are this list's groups as
    /// sub-menus. Empty groups are skipped.
    pub fn update_popup_menu(&self, popup: &mut Menu) {
        popup.clear();
        for menu in self.groups.iter().filter_map(|g| g.update_menu(None)) {
            popup.add_submenu(menu.into_shared());
        }
    }

    /// Realize every group as a toolbar docked at the top of `window`.
    ///
    /// See [`update_tool_bars_in`](Self::update_tool_bars_in).
    pub fn update_tool_bars(&self, toolbars: &mut ToolBarList, window: &mut dyn ToolBarHost) {
        self.update_tool_bars_in(toolbars, window, ToolBarArea::Top);
    }

    /// Realize every group as a toolbar.
    ///
    /// For each group the toolbar with the same title is looked up in
    /// `toolbars`. If there is none, one is created, registered, and docked
    /// into `area` of `window`, followed by a toolbar break when the group
    /// asks for one. The group is then realized into the toolbar. Running
    /// this again with unchanged groups creates nothing new.
    pub fn update_tool_bars_in(
        &self,
        toolbars: &mut ToolBarList,
        window: &mut dyn ToolBarHost,
        area: ToolBarArea,
    ) {
        for group in &self.groups {
            let toolbar = match toolbars.find_by_title(group.name()) {
                Some(toolbar) => toolbar,
                None => {
                    let toolbar = ToolBar::new(group.name()).into_shared();
                    toolbars.push(toolbar.clone());
                    window.add_tool_bar(area, toolbar.clone());
                    if group.break_after() {
                        window.add_tool_bar_break(area);
                    }
                    tracing::debug!(
                        target: targets::MERGE,
                        title = %group.name(),
                        ?area,
                        "created toolbar"
                    );
                    toolbar
                }
            };
            group.update_tool_bar(&mut toolbar.write());
        }
    }
}

impl<'a> IntoIterator for &'a ActionGroupList {
    type Item = &'a ActionGroup;
    type IntoIter = std::slice::Iter<'a, ActionGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
