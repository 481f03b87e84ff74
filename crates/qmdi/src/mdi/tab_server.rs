//! A tab-based server.
//!
//! [`MdiTabServer`] keeps one tab per widget. The current tab's client is the
//! active client; switching tabs switches the merged chrome.
//!
//! Widgets live in a [`SlotMap`] keyed by [`ClientId`], so ids handed out for
//! removed widgets never resolve to a newer widget.
//!
//! # Example
//!
//! ```
//! use qmdi::mdi::{ClientBase, MdiClient, MdiHost, MdiServer, MdiTabServer, MdiWidget};
//! use qmdi_core::{Object, ObjectId};
//!
//! struct Page {
//!     base: ClientBase,
//! }
//!
//! impl MdiClient for Page {
//!     fn client_base(&self) -> &ClientBase { &self.base }
//!     fn client_base_mut(&mut self) -> &mut ClientBase { &mut self.base }
//! }
//!
//! impl Object for Page {
//!     fn object_id(&self) -> ObjectId { self.base.id() }
//! }
//!
//! impl MdiWidget for Page {
//!     fn as_client(&self) -> Option<&dyn MdiClient> { Some(self) }
//!     fn as_client_mut(&mut self) -> Option<&mut dyn MdiClient> { Some(self) }
//! }
//!
//! let mut host = MdiHost::new();
//! let mut tabs = MdiTabServer::new();
//! let id = tabs.add_client(&mut host, Box::new(Page { base: ClientBase::new("a.txt") }));
//!
//! assert_eq!(tabs.active_client(), Some(id));
//! assert_eq!(tabs.tab_text(0), Some("a.txt"));
//! assert!(!tabs.is_tab_bar_visible());
//! ```

use qmdi_core::logging::{span_names, targets};
use qmdi_core::Signal;
use slotmap::SlotMap;

use super::client::{ClientId, MdiClient, MdiWidget};
use super::host::MdiHost;
use super::server::{ClientMenu, MdiServer};
use crate::config::MdiConfig;
use crate::error::{MdiError, Result};

/// Mouse buttons a tab reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
}

#[derive(Debug, Clone)]
struct Tab {
    id: ClientId,
    text: String,
    tooltip: Option<String>,
}

/// A server presenting its widgets as tabs.
///
/// # Signals
///
/// - `current_changed(Option<usize>)`: Emitted when the current tab changes
/// - `client_removed(ClientId)`: Emitted after a widget was removed
pub struct MdiTabServer {
    widgets: SlotMap<ClientId, Box<dyn MdiWidget>>,
    tabs: Vec<Tab>,
    current: Option<usize>,
    active: Option<ClientId>,
    config: MdiConfig,

    /// Signal emitted when the current tab changes.
    pub current_changed: Signal<Option<usize>>,

    /// Signal emitted after a widget has been removed.
    pub client_removed: Signal<ClientId>,
}

impl MdiTabServer {
    pub fn new() -> Self {
        Self {
            widgets: SlotMap::with_key(),
            tabs: Vec::new(),
            current: None,
            active: None,
            config: MdiConfig::default(),
            current_changed: Signal::new(),
            client_removed: Signal::new(),
        }
    }

    pub fn with_config(mut self, config: MdiConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &MdiConfig {
        &self.config
    }

    // =========================================================================
    // Tab Management
    // =========================================================================

    /// Add a widget as a new tab and make it current.
    ///
    /// The tab is labelled with the widget's title; a client's file name
    /// becomes the tooltip.
    pub fn add_client(&mut self, host: &mut MdiHost, widget: Box<dyn MdiWidget>) -> ClientId {
        let text = widget.title();
        let tooltip = widget.as_client().and_then(|c| c.mdi_client_file_name());
        let id = self.widgets.insert(widget);
        self.tabs.push(Tab { id, text, tooltip });

        tracing::debug!(target: targets::SERVER, ?id, tabs = self.tabs.len(), "tab inserted");
        self.set_current_index(host, self.tabs.len() - 1);
        if let Some(widget) = self.widgets.get_mut(id) {
            widget.set_focus();
        }
        id
    }

    /// Remove the tab at `index` and hand its widget back.
    ///
    /// The server is told the client is going away before the widget leaves
    /// the server, so the active client's chrome is unmerged first. The
    /// neighbouring tab then becomes current.
    pub fn remove_tab(&mut self, host: &mut MdiHost, index: usize) -> Option<Box<dyn MdiWidget>> {
        let id = self.tabs.get(index)?.id;
        self.client_deleted(host, id);

        self.tabs.remove(index);
        let widget = self.widgets.remove(id);
        tracing::debug!(target: targets::SERVER, ?id, tabs = self.tabs.len(), "tab removed");
        self.client_removed.emit(id);

        if self.tabs.is_empty() {
            self.current = None;
            self.active = None;
            self.current_changed.emit(None);
            host.update_gui();
            return widget;
        }

        let new_current = match self.current {
            Some(current) if current > index => current - 1,
            Some(current) if current == index => index.min(self.tabs.len() - 1),
            Some(current) => current,
            None => 0,
        };
        if self.active.is_none() {
            self.set_current_index(host, new_current);
        } else if self.current != Some(new_current) {
            self.current = Some(new_current);
            self.current_changed.emit(self.current);
        }
        widget
    }

    /// Make the tab at `index` current and activate its widget.
    pub fn set_current_index(&mut self, host: &mut MdiHost, index: usize) {
        let Some(tab) = self.tabs.get(index) else {
            tracing::warn!(
                target: targets::SERVER,
                index,
                tabs = self.tabs.len(),
                "no tab at index"
            );
            return;
        };
        let id = tab.id;
        if self.current != Some(index) {
            self.current = Some(index);
            self.current_changed.emit(self.current);
        }
        self.activate(host, Some(id));
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn count(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn contains(&self, id: ClientId) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn widget(&self, id: ClientId) -> Option<&dyn MdiWidget> {
        self.widgets.get(id).map(|w| w.as_ref())
    }

    pub fn widget_mut(&mut self, id: ClientId) -> Option<&mut dyn MdiWidget> {
        self.widgets.get_mut(id).map(|w| w.as_mut())
    }

    // =========================================================================
    // Tab Properties
    // =========================================================================

    pub fn tab_text(&self, index: usize) -> Option<&str> {
        self.tabs.get(index).map(|tab| tab.text.as_str())
    }

    pub fn tab_tooltip(&self, index: usize) -> Option<&str> {
        self.tabs.get(index).and_then(|tab| tab.tooltip.as_deref())
    }

    /// Re-read a tab's label and tooltip from its widget, e.g. after a save
    /// under a new name.
    pub fn refresh_tab(&mut self, index: usize) {
        let Some(tab) = self.tabs.get_mut(index) else {
            return;
        };
        if let Some(widget) = self.widgets.get(tab.id) {
            tab.text = widget.title();
            tab.tooltip = widget.as_client().and_then(|c| c.mdi_client_file_name());
        }
    }

    /// With auto-hide on, the tab bar only shows while more than one tab is
    /// open.
    pub fn is_tab_bar_visible(&self) -> bool {
        !self.config.auto_hide_tab_bar || self.tabs.len() > 1
    }

    /// Position of a client's tab.
    pub fn index_of_client(&self, id: ClientId) -> Result<usize> {
        self.tabs
            .iter()
            .position(|tab| tab.id == id)
            .ok_or(MdiError::UnknownClient(id))
    }

    /// Look up a client, failing for stale ids and for widgets that are not
    /// clients.
    pub fn client_checked(&self, id: ClientId) -> Result<&dyn MdiClient> {
        self.client(id).ok_or(MdiError::UnknownClient(id))
    }

    // =========================================================================
    // Mouse handling
    // =========================================================================

    /// React to a mouse press on the tab at `index`.
    ///
    /// Left selects the tab, middle tries to close its client, right returns
    /// the client menu for the caller to show; pass the chosen entry to
    /// [`exec_client_menu`](MdiServer::exec_client_menu).
    pub fn handle_tab_mouse_press(
        &mut self,
        host: &mut MdiHost,
        index: usize,
        button: MouseButton,
    ) -> Option<ClientMenu> {
        if index >= self.tabs.len() {
            return None;
        }
        match button {
            MouseButton::Left => {
                self.set_current_index(host, index);
                None
            }
            MouseButton::Middle => {
                if self.config.close_tab_on_middle_click {
                    self.try_close_client(host, index);
                }
                None
            }
            MouseButton::Right => Some(self.client_menu()),
        }
    }

    fn merge(&mut self, host: &mut MdiHost, id: ClientId) {
        if let Some(client) = self.client_mut(id) {
            host.merge_client(client);
        }
    }

    fn unmerge(&mut self, host: &mut MdiHost, id: ClientId) {
        if let Some(client) = self.client_mut(id) {
            host.unmerge_client(client);
        }
    }
}

impl MdiServer for MdiTabServer {
    fn client_count(&self) -> usize {
        self.tabs.len()
    }

    fn client_id_at(&self, index: usize) -> Option<ClientId> {
        self.tabs.get(index).map(|tab| tab.id)
    }

    fn client(&self, id: ClientId) -> Option<&dyn MdiClient> {
        self.widgets.get(id).and_then(|w| w.as_client())
    }

    fn client_mut(&mut self, id: ClientId) -> Option<&mut dyn MdiClient> {
        self.widgets.get_mut(id).and_then(|w| w.as_client_mut())
    }

    fn active_client(&self) -> Option<ClientId> {
        self.active.filter(|&id| self.client(id).is_some())
    }

    fn activate(&mut self, host: &mut MdiHost, client: Option<ClientId>) {
        if client == self.active {
            return;
        }
        if let Some(id) = client {
            if !self.widgets.contains_key(id) {
                tracing::warn!(
                    target: targets::SERVER,
                    ?id,
                    "activate called with an unknown client"
                );
                return;
            }
        }
        let _span =
            tracing::debug_span!(target: targets::SERVER, span_names::ACTIVATE, ?client).entered();

        if let Some(old) = self.active {
            self.unmerge(host, old);
        }
        self.active = client;
        if let Some(new) = client {
            self.merge(host, new);
            if let Ok(index) = self.index_of_client(new) {
                if self.current != Some(index) {
                    self.current = Some(index);
                    self.current_changed.emit(self.current);
                }
            }
        }
        host.update_gui();
    }

    fn client_deleted(&mut self, host: &mut MdiHost, client: ClientId) {
        if !self.widgets.contains_key(client) {
            tracing::warn!(
                target: targets::SERVER,
                id = ?client,
                "client_deleted called for an unknown client"
            );
            return;
        }
        if self.active != Some(client) {
            return;
        }
        self.unmerge(host, client);
        self.active = None;
        host.update_gui();
        tracing::debug!(target: targets::SERVER, id = ?client, "active client deleted");
    }

    fn close_client(&mut self, host: &mut MdiHost, client: ClientId) -> bool {
        let Some(c) = self.client_mut(client) else {
            tracing::warn!(
                target: targets::SERVER,
                id = ?client,
                "close requested for an unknown client"
            );
            return false;
        };
        if !c.can_close_client() {
            tracing::debug!(target: targets::SERVER, id = ?client, "client refused to close");
            return false;
        }
        match self.index_of_client(client) {
            Ok(index) => self.remove_tab(host, index).is_some(),
            Err(_) => false,
        }
    }

    fn client_menu(&self) -> ClientMenu {
        ClientMenu::new(&self.config.local_actions)
    }
}

impl Default for MdiTabServer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MdiTabServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MdiTabServer")
            .field("tabs", &self.tabs)
            .field("current", &self.current)
            .field("active", &self.active)
            .finish()
    }
}
