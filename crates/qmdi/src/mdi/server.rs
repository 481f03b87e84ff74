//! The server side of the MDI contract.
//!
//! A server holds client widgets and decides which one is active. Switching
//! the active client unmerges the old client's chrome from the host, merges
//! the new one's, and realizes the result.
//!
//! The close helpers are provided methods built on the required ones, and are
//! not atomic: every client is asked on its own and may refuse.

use std::sync::Arc;

use qmdi_core::Object;

use super::client::{ClientId, MdiClient};
use super::host::MdiHost;
use crate::config::LocalActionLabels;
use crate::widget::widgets::{Action, Menu};

// ============================================================================
// Local actions menu
// ============================================================================

/// Entries of the per-client context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalAction {
    CloseThis,
    CloseOthers,
    CloseAll,
}

/// The context menu offered for a client, usually on a right click.
pub struct ClientMenu {
    menu: Menu,
    close_this: Arc<Action>,
    close_others: Arc<Action>,
    close_all: Arc<Action>,
}

impl ClientMenu {
    pub fn new(labels: &LocalActionLabels) -> Self {
        let close_this = Arc::new(Action::new(labels.close_this.clone()));
        let close_others = Arc::new(Action::new(labels.close_others.clone()));
        let close_all = Arc::new(Action::new(labels.close_all.clone()));

        let mut menu = Menu::with_title(labels.title.clone());
        menu.add_action(close_this.clone());
        menu.add_action(close_others.clone());
        menu.add_action(close_all.clone());

        Self {
            menu,
            close_this,
            close_others,
            close_all,
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn action(&self, local: LocalAction) -> &Arc<Action> {
        match local {
            LocalAction::CloseThis => &self.close_this,
            LocalAction::CloseOthers => &self.close_others,
            LocalAction::CloseAll => &self.close_all,
        }
    }

    /// Map a chosen action back to its meaning.
    pub fn local_action(&self, chosen: &Action) -> Option<LocalAction> {
        [
            LocalAction::CloseThis,
            LocalAction::CloseOthers,
            LocalAction::CloseAll,
        ]
        .into_iter()
        .find(|&local| self.action(local).object_id() == chosen.object_id())
    }
}

impl std::fmt::Debug for ClientMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientMenu")
            .field("menu", &self.menu)
            .finish()
    }
}

// ============================================================================
// MdiServer
// ============================================================================

/// A container of client widgets with at most one active client.
///
/// State machine: `Idle` (no active client) and `Active(client)`.
/// [`activate`](Self::activate) moves between them, and
/// [`client_deleted`](Self::client_deleted) drops back to `Idle` when the
/// active client goes away.
pub trait MdiServer {
    /// Number of widgets held, clients or not.
    fn client_count(&self) -> usize;

    /// Id of the widget at `index`.
    fn client_id_at(&self, index: usize) -> Option<ClientId>;

    /// The client capability of a held widget.
    fn client(&self, id: ClientId) -> Option<&dyn MdiClient>;

    fn client_mut(&mut self, id: ClientId) -> Option<&mut dyn MdiClient>;

    /// The client whose chrome is currently merged into the host.
    fn active_client(&self) -> Option<ClientId>;

    /// Make `client` the active client, or none.
    ///
    /// Activating the current client does nothing. Otherwise the old client
    /// is unmerged, the new one merged, and the host realized.
    fn activate(&mut self, host: &mut MdiHost, client: Option<ClientId>);

    /// Told synchronously by a client's teardown, before the client is
    /// dropped. If it is the active client its chrome is unmerged and the
    /// host realized. Calling it again for the same client does nothing.
    fn client_deleted(&mut self, host: &mut MdiHost, client: ClientId);

    /// Ask a client to close. Returns `false` when the client refused or is
    /// not a client of this server.
    fn close_client(&mut self, host: &mut MdiHost, client: ClientId) -> bool;

    /// Try to close the client at `index`.
    fn try_close_client(&mut self, host: &mut MdiHost, index: usize) -> bool {
        match self.client_id_at(index) {
            Some(id) if self.client(id).is_some() => self.close_client(host, id),
            _ => false,
        }
    }

    /// Try to close every client except the one at `index`. Returns how
    /// many closed.
    fn try_close_all_but_client(&mut self, host: &mut MdiHost, index: usize) -> usize {
        let keep = self.client_id_at(index);
        let ids: Vec<ClientId> = (0..self.client_count())
            .filter_map(|i| self.client_id_at(i))
            .filter(|&id| Some(id) != keep && self.client(id).is_some())
            .collect();
        ids.into_iter()
            .filter(|&id| self.close_client(host, id))
            .count()
    }

    /// Try to close every client. Returns how many closed.
    fn try_close_all_clients(&mut self, host: &mut MdiHost) -> usize {
        let ids: Vec<ClientId> = (0..self.client_count())
            .filter_map(|i| self.client_id_at(i))
            .filter(|&id| self.client(id).is_some())
            .collect();
        ids.into_iter()
            .filter(|&id| self.close_client(host, id))
            .count()
    }

    /// The per-client context menu.
    fn client_menu(&self) -> ClientMenu {
        ClientMenu::new(&LocalActionLabels::default())
    }

    /// Carry out the entry chosen from the client menu opened on `index`.
    /// `None` means the menu was dismissed.
    fn exec_client_menu(&mut self, host: &mut MdiHost, index: usize, chosen: Option<LocalAction>) {
        match chosen {
            Some(LocalAction::CloseThis) => {
                self.try_close_client(host, index);
            }
            Some(LocalAction::CloseOthers) => {
                self.try_close_all_but_client(host, index);
            }
            Some(LocalAction::CloseAll) => {
                self.try_close_all_clients(host);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_menu_labels() {
        let menu = ClientMenu::new(&LocalActionLabels::default());
        assert_eq!(menu.menu().title(), "Local actions");
        assert_eq!(
            menu.menu().item_labels(),
            vec!["Close this window", "Close other windows", "Close all windows"]
        );
    }

    #[test]
    fn test_local_action_lookup() {
        let menu = ClientMenu::new(&LocalActionLabels::default());
        let chosen = menu.menu().find_action("Close other windows").unwrap();
        assert_eq!(menu.local_action(&chosen), Some(LocalAction::CloseOthers));
        assert_eq!(menu.local_action(&Action::new("Close this window")), None);
    }
}
