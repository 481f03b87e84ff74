//! Core systems for qmdi.
//!
//! This crate provides the foundational pieces the qmdi merge engine is built
//! on:
//!
//! - **Object identity**: process-unique [`ObjectId`]s for actions, menus and
//!   embedded widgets
//! - **Signal/Slot System**: synchronous, type-safe notifications
//! - **Logging**: `tracing` targets and helper macros
//!
//! # Signal/Slot Example
//!
//! ```
//! use qmdi_core::Signal;
//!
//! let triggered = Signal::<bool>::new();
//!
//! let conn_id = triggered.connect(|checked| {
//!     println!("Triggered, checked = {}", checked);
//! });
//!
//! triggered.emit(false);
//! triggered.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod object;
pub mod signal;

pub use error::SignalError;
pub use logging::PerfSpan;
pub use object::{Object, ObjectBase, ObjectId, object_cast, object_cast_mut};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
