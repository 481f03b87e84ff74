//! The client side of the MDI contract.
//!
//! A client is a document view (an editor tab, a help browser, ...) that
//! contributes its own menus and toolbars while it is active. Implementors
//! embed a [`ClientBase`] and implement [`MdiClient`]; the defaults of every
//! other method read from it.
//!
//! Servers hold [`MdiWidget`]s. Whether a widget is a client is a capability
//! query, [`MdiWidget::as_client`], not a type test.

use std::sync::Arc;

use qmdi_core::{Object, ObjectBase, ObjectId};
use slotmap::new_key_type;

use super::action_group_list::ActionGroupList;
use super::host::MdiHost;
use crate::widget::widgets::Action;
use crate::widget::{Key, KeyboardModifiers, KeySequence};

new_key_type! {
    /// A weak handle to a widget held by a server.
    ///
    /// Ids of removed widgets stay distinguishable from live ones: looking
    /// one up yields nothing instead of another widget.
    pub struct ClientId;
}

// ============================================================================
// WidgetActions
// ============================================================================

/// Actions attached to a client widget for shortcut dispatch.
///
/// While a client is merged its menu and toolbar actions are attached here,
/// so their shortcuts work while the client has focus even when the action
/// is not shown anywhere. Actions whose
/// [`ShortcutContext`](crate::widget::widgets::ShortcutContext) requires focus
/// only fire while the registry is marked focused.
#[derive(Debug, Default)]
pub struct WidgetActions {
    actions: Vec<Arc<Action>>,
    focused: bool,
}

impl WidgetActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an action. Already attached actions are skipped.
    pub fn add_action(&mut self, action: Arc<Action>) {
        if !self.contains(&action) {
            self.actions.push(action);
        }
    }

    pub fn add_actions(&mut self, actions: impl IntoIterator<Item = Arc<Action>>) {
        for action in actions {
            self.add_action(action);
        }
    }

    pub fn remove_action(&mut self, action: &Action) {
        self.actions.retain(|a| a.object_id() != action.object_id());
    }

    pub fn remove_actions<'a>(&mut self, actions: impl IntoIterator<Item = &'a Arc<Action>>) {
        for action in actions {
            self.remove_action(action);
        }
    }

    pub fn contains(&self, action: &Action) -> bool {
        self.actions.iter().any(|a| a.object_id() == action.object_id())
    }

    pub fn actions(&self) -> &[Arc<Action>] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Whether the widget owning these actions has keyboard focus.
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn can_fire(&self, action: &Action) -> bool {
        action.is_enabled() && (self.focused || !action.shortcut_context().requires_focus())
    }

    /// Trigger the first action that can fire whose shortcut is `sequence`.
    pub fn dispatch_shortcut(&self, sequence: &KeySequence) -> bool {
        let found = self.actions.iter().find(|action| {
            self.can_fire(action) && action.shortcut().as_ref() == Some(sequence)
        });
        match found {
            Some(action) => {
                action.trigger();
                true
            }
            None => false,
        }
    }

    /// Trigger the first action that can fire bound to a single pressed chord.
    pub fn dispatch_key(&self, key: Key, modifiers: KeyboardModifiers) -> bool {
        let found = self.actions.iter().find(|action| {
            self.can_fire(action)
                && action
                    .shortcut()
                    .is_some_and(|shortcut| shortcut.matches(key, modifiers))
        });
        match found {
            Some(action) => {
                action.trigger();
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// ClientBase
// ============================================================================

/// State every client carries.
#[derive(Debug)]
pub struct ClientBase {
    object_base: ObjectBase,
    name: String,
    file_name: Option<String>,
    /// Menus contributed while this client is active.
    pub menus: ActionGroupList,
    /// Toolbars contributed while this client is active.
    pub toolbars: ActionGroupList,
    widget_actions: WidgetActions,
}

impl ClientBase {
    /// Create the state for a client with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            object_base: ObjectBase::with_name(name.clone()),
            name,
            file_name: None,
            menus: ActionGroupList::new(),
            toolbars: ActionGroupList::new(),
            widget_actions: WidgetActions::new(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn id(&self) -> ObjectId {
        self.object_base.id()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.object_base.set_name(self.name.clone());
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, file_name: Option<String>) {
        self.file_name = file_name;
    }

    pub fn widget_actions(&self) -> &WidgetActions {
        &self.widget_actions
    }

    pub fn widget_actions_mut(&mut self) -> &mut WidgetActions {
        &mut self.widget_actions
    }
}

// ============================================================================
// MdiClient
// ============================================================================

/// A document view that contributes menus and toolbars while active.
pub trait MdiClient {
    fn client_base(&self) -> &ClientBase;

    fn client_base_mut(&mut self) -> &mut ClientBase;

    fn menus(&self) -> &ActionGroupList {
        &self.client_base().menus
    }

    fn toolbars(&self) -> &ActionGroupList {
        &self.client_base().toolbars
    }

    /// Name shown on the client's tab.
    fn mdi_client_name(&self) -> String {
        self.client_base().name().to_string()
    }

    /// File backing this client, if any. Shown as the tab tooltip.
    fn mdi_client_file_name(&self) -> Option<String> {
        self.client_base().file_name().map(str::to_string)
    }

    /// Asked before the client is closed. Returning `false` refuses the
    /// close, e.g. while the user still has unsaved changes.
    fn can_close_client(&mut self) -> bool {
        true
    }

    /// Called after this client's lists were merged into `host`.
    fn on_client_merged(&mut self, _host: &MdiHost) {}

    /// Called after this client's lists were unmerged from `host`.
    fn on_client_unmerged(&mut self, _host: &MdiHost) {}

    /// The registry actions are attached to while merged. Clients that are
    /// not widgets return `None`.
    fn widget_actions_mut(&mut self) -> Option<&mut WidgetActions> {
        Some(self.client_base_mut().widget_actions_mut())
    }
}

// ============================================================================
// MdiWidget
// ============================================================================

/// Anything a server can hold.
pub trait MdiWidget: Object {
    /// The client capability of this widget, if it has one.
    fn as_client(&self) -> Option<&dyn MdiClient> {
        None
    }

    fn as_client_mut(&mut self) -> Option<&mut dyn MdiClient> {
        None
    }

    /// Label for a tab holding this widget.
    fn title(&self) -> String {
        match self.as_client() {
            Some(client) => client.mdi_client_name(),
            None => self.object_name(),
        }
    }

    /// Called when the widget becomes the current page.
    fn set_focus(&mut self) {}
}
