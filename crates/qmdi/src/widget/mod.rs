//! Toolkit-neutral chrome for qmdi.
//!
//! This module holds everything the merge engine realizes into:
//!
//! - [`KeySequence`] and mnemonics: shortcut and `&` accelerator handling
//! - [`widgets`]: actions, menus, toolbars and the main window
//!
//! Nothing here paints. A rendering backend mirrors these models, or
//! implements [`ToolBarHost`](widgets::ToolBarHost) for its own window type.

mod shortcut;
pub mod widgets;

pub use shortcut::{
    Key, KeyCombination, KeySequence, KeySequenceParseError, KeyboardModifiers, MnemonicText,
    MAX_KEY_SEQUENCE_LENGTH, parse_mnemonic, strip_mnemonic,
};
