//! Prelude module for qmdi.
//!
//! ```
//! use qmdi::prelude::*;
//! ```
//!
//! This provides access to:
//! - Object identity and signals (`Object`, `ObjectId`, `Signal`)
//! - Actions, menus and toolbars
//! - The merge engine (`ActionGroup`, `ActionGroupList`)
//! - Client, host and server contracts

// ============================================================================
// Object System and Signals
// ============================================================================

pub use crate::{Object, ObjectBase, ObjectId, Signal};

// ============================================================================
// Chrome
// ============================================================================

pub use crate::widget::widgets::{
    Action, ActionCollection, EmbeddedWidget, MainWindow, Menu, MenuBar, SharedToolBarHost,
    ToolBar, ToolBarArea, ToolBarHost, ToolBarList,
};
pub use crate::widget::{Key, KeySequence, KeyboardModifiers};

// ============================================================================
// Merge Engine
// ============================================================================

pub use crate::mdi::{
    ActionGroup, ActionGroupList, ClientBase, ClientId, LocalAction, MdiClient, MdiHost,
    MdiServer, MdiTabServer, MdiWidget, MouseButton,
};

// ============================================================================
// Configuration and Errors
// ============================================================================

pub use crate::{MdiConfig, MdiError};
