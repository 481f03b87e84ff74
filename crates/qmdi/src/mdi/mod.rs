//! The MDI merge engine.
//!
//! - [`ActionGroup`] / [`ActionGroupList`]: mergeable menu and toolbar
//!   definitions
//! - [`MdiClient`]: a document view contributing chrome while active
//! - [`MdiHost`]: the window clients merge into
//! - [`MdiServer`] / [`MdiTabServer`]: track the active client and drive
//!   merging when it changes
//!
//! # Lifecycle
//!
//! ```text
//!            activate(Some(b))
//!   Idle  ------------------->  Active(b)
//!    ^                            |   |
//!    |   activate(None) or        |   | activate(Some(c)):
//!    |   client_deleted(b)        |   | unmerge b, merge c
//!    +----------------------------+   v
//!                                 Active(c)
//! ```
//!
//! Every transition ends with a realization pass on the host.

mod action_group;
mod action_group_list;
mod client;
mod host;
mod server;
mod tab_server;

pub use action_group::{ActionGroup, GroupItem};
pub use action_group_list::ActionGroupList;
pub use client::{ClientBase, ClientId, MdiClient, MdiWidget, WidgetActions};
pub use host::MdiHost;
pub use server::{ClientMenu, LocalAction, MdiServer};
pub use tab_server::{MdiTabServer, MouseButton};
