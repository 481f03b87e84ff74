//! qmdi - menu and toolbar merging for multi-document editors.
//!
//! An editor window (the [host](mdi::MdiHost)) defines its own menus and
//! toolbars as [action group lists](mdi::ActionGroupList). Each open document
//! (a [client](mdi::MdiClient)) defines its own as well. Whenever the active
//! document changes, a [server](mdi::MdiServer) unmerges the previous
//! document's groups from the host, merges the new one's, and realizes the
//! result into the window's [menu bar](widget::widgets::MenuBar) and
//! [toolbars](widget::widgets::ToolBar).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use qmdi::prelude::*;
//!
//! let mut host = MdiHost::new();
//! let file = host.menus.get_action_group("&File");
//! file.add_action(Arc::new(Action::new("&Open")));
//! file.set_merge_point();
//! file.add_action(Arc::new(Action::new("&Quit")));
//! host.update_gui();
//!
//! let menu_bar = host.window().unwrap().menu_bar();
//! assert_eq!(menu_bar.menu_labels("File"), Some(vec!["Open".into(), "Quit".into()]));
//! ```

pub use qmdi_core::*;

pub mod config;
mod error;
pub mod mdi;
pub mod prelude;
pub mod widget;

pub use config::{LocalActionLabels, MdiConfig};
pub use error::{MdiError, Result};
