//! The key registry.

use core::ptr;

use crate::driver::KeyDriver;
use crate::key::{Bindings, Key};
use crate::logging::debug;
use crate::store::{KeyId, KeyStore};

/// Owns the pin driver and every registered key, and drives the poll tick.
///
/// `S` picks the storage regime: [`crate::Slots`] for a fixed pool,
/// [`crate::Arena`] for allocator-backed growth.  Structural operations
/// (`add`, `remove`, `set_enabled`) belong in thread context at setup time;
/// `poll` belongs in the caller's periodic timer interrupt, every 20 to
/// 50 ms.  If the two can preempt each other on your platform, wrap the set
/// in [`crate::IrqKeySet`] rather than calling this directly.
pub struct KeySet<D: KeyDriver, S> {
    driver: D,
    keys: S,
}

impl<D, S, B, A> KeySet<D, S>
where
    D: KeyDriver,
    B: Bindings<D, A>,
    S: KeyStore<Item = Key<D, B, A>>,
{
    /// Install the pin driver.  Nothing touches hardware until `add`.
    pub fn new(driver: D) -> Self
    where
        S: Default,
    {
        KeySet {
            driver,
            keys: S::default(),
        }
    }

    /// Like [`KeySet::new`] with caller-built storage.
    pub fn with_store(driver: D, keys: S) -> Self {
        KeySet { driver, keys }
    }

    /// Register a key.
    ///
    /// The key starts over as idle and unsuppressed regardless of its
    /// history, and its pin is initialized through the driver.  In the
    /// bounded regime a full pool hands the key back untouched, with the pin
    /// left uninitialized; the caller may retry after removing another key.
    pub fn add(&mut self, mut key: Key<D, B, A>) -> Result<KeyId, Key<D, B, A>> {
        key.reset();
        let config = key.config();
        let id = self.keys.insert(key)?;
        self.driver.init_pin(config);
        debug!("key {} added", id.index());
        Ok(id)
    }

    /// Unregister a key, de-initializing its pin, and hand it back.
    /// Unknown or stale ids return `None` with no side effects.
    pub fn remove(&mut self, id: KeyId) -> Option<Key<D, B, A>> {
        let key = self.keys.take(id)?;
        self.driver.deinit_pin(key.config());
        debug!("key {} removed", id.index());
        Some(key)
    }

    /// First live key registered on exactly this config reference.
    pub fn find(&self, config: &D::Pin) -> Option<KeyId> {
        self.keys.find(|key| ptr::eq(key.config(), config))
    }

    pub fn key(&self, id: KeyId) -> Option<&Key<D, B, A>> {
        self.keys.get(id)
    }

    pub fn key_mut(&mut self, id: KeyId) -> Option<&mut Key<D, B, A>> {
        self.keys.get_mut(id)
    }

    /// Toggle dispatch for a key without removing it.  Returns whether the
    /// id was live.  Disabling neither resets the key's state nor its
    /// suppression flag.
    pub fn set_enabled(&mut self, id: KeyId, enabled: bool) -> bool {
        match self.keys.get_mut(id) {
            Some(key) => {
                key.set_enabled(enabled);
                true
            }
            None => false,
        }
    }

    pub fn is_enabled(&self, id: KeyId) -> bool {
        self.keys.get(id).is_some_and(Key::is_enabled)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// One poll tick: sample, classify, and dispatch every live key.
    ///
    /// Visits each key exactly once per call, in slot order, and runs to
    /// completion without blocking.  An empty registry is a no-op.
    pub fn poll(&mut self) {
        let KeySet { driver, keys } = self;
        keys.for_each(|_, key| {
            let level = driver.read_pin(key.config());
            key.tick(level);
        });
    }
}
