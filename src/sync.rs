//! Sharing a key set between thread context and the poll interrupt.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::driver::KeyDriver;
use crate::key::{Bindings, Key};
use crate::set::KeySet;
use crate::store::KeyStore;

/// A [`KeySet`] behind a critical section.
///
/// On preemptive targets, an `add` or `remove` racing the timer interrupt's
/// `poll` would tear the registry.  This wrapper serializes both sides
/// through `critical_section`, so each one sees the registry either before
/// or after a structural change, never mid-splice.  Keep the closures
/// short: the interrupt is masked while they run.
pub struct IrqKeySet<D: KeyDriver, S> {
    inner: Mutex<RefCell<KeySet<D, S>>>,
}

impl<D, S, B, A> IrqKeySet<D, S>
where
    D: KeyDriver,
    B: Bindings<D, A>,
    S: KeyStore<Item = Key<D, B, A>>,
{
    pub fn new(set: KeySet<D, S>) -> Self {
        IrqKeySet {
            inner: Mutex::new(RefCell::new(set)),
        }
    }

    /// Run `f` on the registry with the poll interrupt held off.
    pub fn with<R>(&self, f: impl FnOnce(&mut KeySet<D, S>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// The periodic entry point, callable straight from the timer ISR.
    pub fn poll(&self) {
        self.with(|set| set.poll());
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::IrqKeySet;
    use crate::driver::DriverTable;
    use crate::key::{HandleStatus, Key, PerState};
    use crate::set::KeySet;
    use crate::store::Slots;

    type Drv = DriverTable<Cell<bool>>;
    type TestKey = Key<Drv, PerState<Drv, usize>, usize>;

    fn driver() -> Drv {
        DriverTable {
            init_pin: |_| {},
            read_pin: Cell::get,
            deinit_pin: None,
        }
    }

    #[test]
    fn mutate_then_poll_under_lock() {
        let pin: &'static Cell<bool> = Box::leak(Box::new(Cell::new(true)));
        let shared: IrqKeySet<Drv, Slots<TestKey, 2>> =
            IrqKeySet::new(KeySet::new(driver()));

        let id = shared.with(|set| {
            let mut key = TestKey::new(pin).with_args(0);
            key.on_pressed(|key, _| {
                *key.args_mut().unwrap() += 1;
                HandleStatus::Handled
            });
            set.add(key).ok().unwrap()
        });

        pin.set(false);
        shared.poll();
        shared.poll();
        assert_eq!(shared.with(|set| *set.key(id).unwrap().args().unwrap()), 1);

        shared.with(|set| set.remove(id)).unwrap();
        assert!(shared.with(|set| set.is_empty()));
    }
}
