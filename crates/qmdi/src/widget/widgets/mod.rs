//! Realized chrome for qmdi.
//!
//! The merge engine realizes action groups into these toolkit-neutral
//! models, which a rendering backend mirrors:
//!
//! - [`Action`]: a command shown in menus and toolbars
//! - [`ActionCollection`]: a set of related, optionally exclusive actions
//! - [`Menu`] and [`MenuBar`]: realized menus
//! - [`ToolBar`] and [`ToolBarList`]: realized toolbars
//! - [`MainWindow`]: the window menus and toolbars land in

mod action;
mod main_window;
mod menu;
mod menu_bar;
mod tool_bar;

pub use action::{Action, ActionCollection, ShortcutContext};
pub use main_window::{MainWindow, SharedToolBarHost, ToolBarHost};
pub use menu::{Menu, MenuItem, SharedMenu};
pub use menu_bar::MenuBar;
pub use tool_bar::{
    EmbeddedWidget, SharedToolBar, ToolBar, ToolBarArea, ToolBarItem, ToolBarList,
};
