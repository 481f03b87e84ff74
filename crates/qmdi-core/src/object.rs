//! Object identity for qmdi.
//!
//! Actions, menus and embedded widgets are compared by identity, never by
//! their text. Every such value carries an [`ObjectBase`] which hands out a
//! process-unique [`ObjectId`] on construction.
//!
//! There is no global object tree: ownership is plain Rust ownership and
//! back-references between hosts, servers and clients use typed keys owned by
//! whoever holds the objects.
//!
//! # Example
//!
//! ```
//! use qmdi_core::{Object, ObjectBase, ObjectId};
//!
//! struct Thing {
//!     base: ObjectBase,
//! }
//!
//! impl Object for Thing {
//!     fn object_id(&self) -> ObjectId {
//!         self.base.id()
//!     }
//! }
//!
//! let a = Thing { base: ObjectBase::new() };
//! let b = Thing { base: ObjectBase::new() };
//! assert_ne!(a.object_id(), b.object_id());
//! ```

use std::any::Any;
use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// A unique identifier for an object.
///
/// IDs are never reused within a process, so an ID held after its object has
/// been dropped simply stops matching anything.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(NonZeroU64);

impl ObjectId {
    /// Allocate a fresh identifier.
    pub fn next() -> Self {
        let raw = NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed);
        // The counter starts at 1 and would need 2^64 allocations to wrap.
        Self(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN))
    }

    /// Convert the ObjectId to a raw u64 value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        self.0.get()
    }

    /// Create an ObjectId from a raw u64 value.
    ///
    /// Returns `None` for zero, which is never handed out.
    #[inline]
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The base trait for identity-bearing objects.
pub trait Object: Any + Send + Sync {
    /// Get this object's unique identifier.
    fn object_id(&self) -> ObjectId;

    /// Get the object's name, if any.
    fn object_name(&self) -> String {
        String::new()
    }
}

/// Helper for implementing the [`Object`] trait.
///
/// Holds the object's ID and its (mutable) object name.
pub struct ObjectBase {
    id: ObjectId,
    name: RwLock<String>,
}

impl ObjectBase {
    /// Create a new ObjectBase with a fresh ID and an empty name.
    pub fn new() -> Self {
        Self {
            id: ObjectId::next(),
            name: RwLock::new(String::new()),
        }
    }

    /// Create a new ObjectBase with the given object name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::next(),
            name: RwLock::new(name.into()),
        }
    }

    /// Get the object's ID.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Get the object's name.
    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    /// Set the object's name.
    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.write() = name.into();
    }
}

impl Default for ObjectBase {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBase")
            .field("id", &self.id)
            .field("name", &*self.name.read())
            .finish()
    }
}

/// Safe downcast function for [`Object`] trait objects.
pub fn object_cast<T: Object + 'static>(obj: &dyn Object) -> Option<&T> {
    (obj as &dyn Any).downcast_ref::<T>()
}

/// Safe mutable downcast function for [`Object`] trait objects.
pub fn object_cast_mut<T: Object + 'static>(obj: &mut dyn Object) -> Option<&mut T> {
    (obj as &mut dyn Any).downcast_mut::<T>()
}
