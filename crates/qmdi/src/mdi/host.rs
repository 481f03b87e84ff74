//! The host: the window whose menus and toolbars clients merge into.
//!
//! An [`MdiHost`] owns the baseline menu and toolbar definitions of the
//! application. Servers merge the active client's lists into them and ask
//! the host to realize the result with [`MdiHost::update_gui`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use qmdi::prelude::*;
//!
//! let mut host = MdiHost::new();
//! host.menus
//!     .get_action_group("&File")
//!     .add_action(Arc::new(Action::new("&Open")));
//! host.update_gui();
//!
//! let window = host.window().unwrap();
//! assert_eq!(window.menu_bar().menu_labels("File"), Some(vec!["Open".to_string()]));
//! ```
//!
//! A host can also realize into a window the application keeps, see
//! [`MdiHost::with_shared_window`].

use std::sync::Arc;

use qmdi_core::PerfSpan;
use qmdi_core::logging::{span_names, targets};

use super::action_group_list::ActionGroupList;
use super::client::MdiClient;
use crate::config::MdiConfig;
use crate::widget::widgets::{Action, MainWindow, SharedToolBarHost, ToolBarHost, ToolBarList};

/// Where a host realizes its chrome.
enum Target {
    Owned(MainWindow),
    Shared(SharedToolBarHost),
    Detached,
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Owned(window) => f.debug_tuple("Owned").field(window).finish(),
            Target::Shared(_) => f.write_str("Shared"),
            Target::Detached => f.write_str("Detached"),
        }
    }
}

/// Baseline chrome plus the window it is realized into.
#[derive(Debug)]
pub struct MdiHost {
    /// The application's own menus. The active client's menus merge in here.
    pub menus: ActionGroupList,
    /// The application's own toolbars.
    pub toolbars: ActionGroupList,
    tool_bar_list: ToolBarList,
    target: Target,
    config: MdiConfig,
}

impl MdiHost {
    /// Create a host realizing into a fresh [`MainWindow`].
    pub fn new() -> Self {
        Self::with_window(MainWindow::new())
    }

    /// Create a host that owns `window`.
    pub fn with_window(window: MainWindow) -> Self {
        Self::with_target(Target::Owned(window))
    }

    /// Create a host realizing into a window the application owns.
    ///
    /// Every realization pass, including the ones servers trigger on
    /// activation, locks and updates `window`.
    pub fn with_shared_window(window: SharedToolBarHost) -> Self {
        Self::with_target(Target::Shared(window))
    }

    /// Create a host with no window. Realization passes only log a warning.
    pub fn without_window() -> Self {
        Self::with_target(Target::Detached)
    }

    fn with_target(target: Target) -> Self {
        Self {
            menus: ActionGroupList::new(),
            toolbars: ActionGroupList::new(),
            tool_bar_list: ToolBarList::new(),
            target,
            config: MdiConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MdiConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &MdiConfig {
        &self.config
    }

    /// The window this host owns, if any.
    pub fn window(&self) -> Option<&MainWindow> {
        match &self.target {
            Target::Owned(window) => Some(window),
            _ => None,
        }
    }

    pub fn window_mut(&mut self) -> Option<&mut MainWindow> {
        match &mut self.target {
            Target::Owned(window) => Some(window),
            _ => None,
        }
    }

    /// The application-owned window this host realizes into, if any.
    pub fn shared_window(&self) -> Option<&SharedToolBarHost> {
        match &self.target {
            Target::Shared(window) => Some(window),
            _ => None,
        }
    }

    /// Toolbars created by realization so far.
    pub fn tool_bar_list(&self) -> &ToolBarList {
        &self.tool_bar_list
    }

    // =========================================================================
    // Merging
    // =========================================================================

    /// Whether client lists are merged and realized at all.
    pub fn update_menus_and_toolbars(&self) -> bool {
        self.config.update_menus_and_toolbars
    }

    pub fn set_update_menus_and_toolbars(&mut self, update: bool) {
        self.config.update_menus_and_toolbars = update;
    }

    /// Merge a client's menus and toolbars into this host.
    ///
    /// The client's actions are also attached to its widget, which is marked
    /// focused, so their shortcuts keep working. Realization is left to the
    /// caller.
    pub fn merge_client(&mut self, client: &mut dyn MdiClient) {
        if self.config.update_menus_and_toolbars {
            self.menus.merge_group_list(client.menus());
            self.toolbars.merge_group_list(client.toolbars());
        }
        client.on_client_merged(self);

        let actions = client_actions(client);
        if let Some(widget_actions) = client.widget_actions_mut() {
            widget_actions.add_actions(actions);
            widget_actions.set_focused(true);
        }
        tracing::debug!(target: targets::HOST, client = %client.mdi_client_name(), "merged client");
    }

    /// Undo [`merge_client`](Self::merge_client).
    pub fn unmerge_client(&mut self, client: &mut dyn MdiClient) {
        if self.config.update_menus_and_toolbars {
            self.menus.unmerge_group_list(client.menus());
            self.toolbars.unmerge_group_list(client.toolbars());
        }
        client.on_client_unmerged(self);

        let actions = client_actions(client);
        if let Some(widget_actions) = client.widget_actions_mut() {
            widget_actions.remove_actions(&actions);
            widget_actions.set_focused(false);
        }
        tracing::debug!(
            target: targets::HOST,
            client = %client.mdi_client_name(),
            "unmerged client"
        );
    }

    // =========================================================================
    // Realization
    // =========================================================================

    /// Realize the current menus and toolbars into this host's window.
    ///
    /// Toolbars are realized first, then the menu bar, with window updates
    /// suspended in between. Does nothing when merging is switched off. A
    /// host without a window logs a warning.
    pub fn update_gui(&mut self) {
        let Self {
            menus,
            toolbars,
            tool_bar_list,
            target,
            config,
        } = self;
        match target {
            Target::Owned(window) => realize(menus, toolbars, tool_bar_list, config, window),
            Target::Shared(window) => {
                realize(menus, toolbars, tool_bar_list, config, &mut *window.write());
            }
            Target::Detached => {
                tracing::warn!(
                    target: targets::HOST,
                    "update_gui called on a host without a window"
                );
            }
        }
    }
}

impl Default for MdiHost {
    fn default() -> Self {
        Self::new()
    }
}

fn client_actions(client: &dyn MdiClient) -> Vec<Arc<Action>> {
    let mut actions = client.menus().all_actions();
    actions.extend(client.toolbars().all_actions());
    actions
}

fn realize(
    menus: &ActionGroupList,
    toolbars: &ActionGroupList,
    tool_bar_list: &mut ToolBarList,
    config: &MdiConfig,
    window: &mut dyn ToolBarHost,
) {
    if !config.update_menus_and_toolbars {
        return;
    }
    let _span = PerfSpan::new(span_names::UPDATE_GUI);

    window.set_updates_enabled(false);
    toolbars.update_tool_bars_in(tool_bar_list, window, config.tool_bar_area);
    menus.update_menu_bar(window.menu_bar_mut());
    window.set_updates_enabled(true);

    tracing::trace!(
        target: targets::HOST,
        menus = menus.len(),
        toolbars = tool_bar_list.len(),
        "realized chrome"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::RwLock;

    use crate::mdi::ClientBase;
    use crate::widget::widgets::ToolBarArea;

    struct Editor {
        base: ClientBase,
        merged: u32,
        unmerged: u32,
    }

    impl Editor {
        fn new() -> Self {
            let mut base = ClientBase::new("editor");
            base.menus
                .get_action_group("&File")
                .add_action(Arc::new(Action::new("&Save")));
            base.toolbars
                .get_action_group("Edit")
                .add_action(Arc::new(Action::new("Cut")));
            Self {
                base,
                merged: 0,
                unmerged: 0,
            }
        }
    }

    impl MdiClient for Editor {
        fn client_base(&self) -> &ClientBase {
            &self.base
        }

        fn client_base_mut(&mut self) -> &mut ClientBase {
            &mut self.base
        }

        fn on_client_merged(&mut self, _host: &MdiHost) {
            self.merged += 1;
        }

        fn on_client_unmerged(&mut self, _host: &MdiHost) {
            self.unmerged += 1;
        }
    }

    fn host() -> MdiHost {
        let mut host = MdiHost::new();
        host.menus
            .get_action_group("&File")
            .add_action(Arc::new(Action::new("&Open")));
        host
    }

    #[test]
    fn test_merge_and_realize() {
        let mut host = host();
        let mut editor = Editor::new();

        host.merge_client(&mut editor);
        host.update_gui();
        let window = host.window().unwrap();
        assert_eq!(
            window.menu_bar().menu_labels("File"),
            Some(vec!["Open".to_string(), "Save".to_string()])
        );
        assert_eq!(window.tool_bar_rows(ToolBarArea::Top), vec![vec!["Edit".to_string()]]);
        assert_eq!(window.repaint_count(), 1);
        assert_eq!(editor.merged, 1);
        assert_eq!(editor.base.widget_actions().len(), 2);

        host.unmerge_client(&mut editor);
        host.update_gui();
        assert_eq!(
            host.window().unwrap().menu_bar().menu_labels("File"),
            Some(vec!["Open".to_string()])
        );
        assert!(host.tool_bar_list().visible_titles().is_empty());
        assert_eq!(editor.unmerged, 1);
        assert!(editor.base.widget_actions().is_empty());
    }

    #[test]
    fn test_disabled_merging_still_runs_hooks() {
        let mut host = host().with_config(MdiConfig {
            update_menus_and_toolbars: false,
            ..MdiConfig::default()
        });
        let mut editor = Editor::new();

        host.merge_client(&mut editor);
        host.update_gui();
        assert_eq!(host.menus.group("&File").map(|g| g.len()), Some(1));
        assert!(host.window().unwrap().menu_bar().is_empty());
        assert_eq!(editor.merged, 1);
        assert_eq!(editor.base.widget_actions().len(), 2);

        host.set_update_menus_and_toolbars(true);
        host.update_gui();
        assert_eq!(host.window().unwrap().menu_bar().titles(), vec!["File"]);
    }

    #[test]
    fn test_toolbar_area_from_config() {
        let mut host = MdiHost::new().with_config(MdiConfig {
            tool_bar_area: ToolBarArea::Right,
            ..MdiConfig::default()
        });
        host.toolbars
            .get_action_group("Tools")
            .add_action(Arc::new(Action::new("Run")));
        host.update_gui();
        host.update_gui();
        assert_eq!(
            host.window().unwrap().tool_bar_rows(ToolBarArea::Right),
            vec![vec!["Tools".to_string()]]
        );
    }

    #[test]
    fn test_without_window() {
        let mut host = MdiHost::without_window();
        host.menus
            .get_action_group("&Help")
            .add_action(Arc::new(Action::new("&About")));
        host.update_gui();
        assert!(host.window().is_none());
        assert!(host.shared_window().is_none());
    }

    #[test]
    fn test_shared_window_follows_merges() {
        let window = Arc::new(RwLock::new(MainWindow::new()));
        let mut host = MdiHost::with_shared_window(window.clone());
        host.menus
            .get_action_group("&File")
            .add_action(Arc::new(Action::new("&Open")));
        host.update_gui();
        assert!(host.window().is_none());
        assert_eq!(window.read().menu_bar().titles(), vec!["File"]);

        let mut editor = Editor::new();
        host.merge_client(&mut editor);
        host.update_gui();
        let labels = window.read().menu_bar().menu_labels("File");
        assert_eq!(labels, Some(vec!["Open".to_string(), "Save".to_string()]));
        assert_eq!(window.read().tool_bar_rows(ToolBarArea::Top), vec![vec!["Edit".to_string()]]);
        assert_eq!(window.read().repaint_count(), 2);
    }

    #[test]
    fn test_merge_marks_widget_focused() {
        let mut host = host();
        let mut editor = Editor::new();
        host.merge_client(&mut editor);
        assert!(editor.base.widget_actions().has_focus());
        host.unmerge_client(&mut editor);
        assert!(!editor.base.widget_actions().has_focus());
    }
}
