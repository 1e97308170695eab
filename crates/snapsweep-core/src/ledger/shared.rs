//! Shared handle to the process-wide ledger.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use super::store::DeletionLedger;

/// Cloneable handle to one [`DeletionLedger`].
///
/// All clones observe and mutate the same ledger. The handle is
/// single-threaded: the host's event loop serializes every call, so a
/// borrow never outlives the operation that took it.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger(Rc<RefCell<DeletionLedger>>);

impl SharedLedger {
    /// Create a handle to a new, empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the ledger for reading.
    ///
    /// # Panics
    ///
    /// Panics if a [`SharedLedger::write`] borrow is still alive.
    #[must_use]
    pub fn read(&self) -> Ref<'_, DeletionLedger> {
        self.0.borrow()
    }

    /// Borrow the ledger for mutation.
    ///
    /// # Panics
    ///
    /// Panics if any other borrow is still alive.
    #[must_use]
    pub fn write(&self) -> RefMut<'_, DeletionLedger> {
        self.0.borrow_mut()
    }

    /// Whether two handles point at the same ledger.
    #[must_use]
    pub fn same_ledger(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<DeletionLedger> for SharedLedger {
    fn from(ledger: DeletionLedger) -> Self {
        Self(Rc::new(RefCell::new(ledger)))
    }
}
