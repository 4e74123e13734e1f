//! Key storage regimes.
//!
//! The registry is generic over where keys live.  [`Slots`] is the bounded
//! regime: a fixed array of slots, no pointers, no allocator.  [`Arena`] is
//! the unbounded regime: a growable arena of indexed slots with a free list,
//! so removal never dangles and never moves other keys.  Both hand out
//! [`KeyId`]s, which are plain slot indexes; an id whose slot has been freed
//! or reused simply answers not-found.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
#[cfg(feature = "alloc")]
use core::mem;

/// Handle to a stored key.  Valid until the key is removed.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyId(pub(crate) usize);

impl KeyId {
    /// The underlying slot index, mostly useful for logging.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Storage regime for the key registry.
///
/// `insert` reports capacity exhaustion by handing the item back; every
/// other miss is an `Option`.  `for_each` visits every live item exactly
/// once, in slot order.
pub trait KeyStore {
    type Item;

    fn insert(&mut self, item: Self::Item) -> Result<KeyId, Self::Item>;
    fn take(&mut self, id: KeyId) -> Option<Self::Item>;
    fn get(&self, id: KeyId) -> Option<&Self::Item>;
    fn get_mut(&mut self, id: KeyId) -> Option<&mut Self::Item>;
    fn len(&self) -> usize;
    fn find(&self, pred: impl FnMut(&Self::Item) -> bool) -> Option<KeyId>;
    fn for_each(&mut self, f: impl FnMut(KeyId, &mut Self::Item));

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bounded storage: `N` statically allocated slots, scanned linearly.
pub struct Slots<T, const N: usize> {
    slots: [Option<T>; N],
    live: usize,
}

impl<T, const N: usize> Slots<T, N> {
    pub fn new() -> Self {
        Slots {
            slots: core::array::from_fn(|_| None),
            live: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<T, const N: usize> Default for Slots<T, N> {
    fn default() -> Self {
        Slots::new()
    }
}

impl<T, const N: usize> KeyStore for Slots<T, N> {
    type Item = T;

    fn insert(&mut self, item: T) -> Result<KeyId, T> {
        match self.slots.iter().position(Option::is_none) {
            Some(index) => {
                self.slots[index] = Some(item);
                self.live += 1;
                Ok(KeyId(index))
            }
            None => Err(item),
        }
    }

    fn take(&mut self, id: KeyId) -> Option<T> {
        let item = self.slots.get_mut(id.0)?.take();
        if item.is_some() {
            self.live -= 1;
        }
        item
    }

    fn get(&self, id: KeyId) -> Option<&T> {
        self.slots.get(id.0)?.as_ref()
    }

    fn get_mut(&mut self, id: KeyId) -> Option<&mut T> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    fn len(&self) -> usize {
        self.live
    }

    fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<KeyId> {
        self.slots.iter().enumerate().find_map(|(index, slot)| {
            match slot {
                Some(item) if pred(item) => Some(KeyId(index)),
                _ => None,
            }
        })
    }

    fn for_each(&mut self, mut f: impl FnMut(KeyId, &mut T)) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Some(item) = slot {
                f(KeyId(index), item);
            }
        }
    }
}

#[cfg(feature = "alloc")]
enum Entry<T> {
    Free { next: Option<usize> },
    Live(T),
}

/// Unbounded storage: an arena of slots threaded with a free list.
///
/// Insert pops the free list or grows the arena, so it is O(1) amortized
/// and never fails.  Removal pushes the slot back on the free list without
/// disturbing any other slot.
#[cfg(feature = "alloc")]
pub struct Arena<T> {
    entries: Vec<Entry<T>>,
    free: Option<usize>,
    live: usize,
}

#[cfg(feature = "alloc")]
impl<T> Arena<T> {
    pub const fn new() -> Self {
        Arena {
            entries: Vec::new(),
            free: None,
            live: 0,
        }
    }
}

#[cfg(feature = "alloc")]
impl<T> Default for Arena<T> {
    fn default() -> Self {
        Arena::new()
    }
}

#[cfg(feature = "alloc")]
impl<T> KeyStore for Arena<T> {
    type Item = T;

    fn insert(&mut self, item: T) -> Result<KeyId, T> {
        self.live += 1;
        match self.free.take() {
            Some(index) => {
                if let Entry::Free { next } = self.entries[index] {
                    self.free = next;
                }
                self.entries[index] = Entry::Live(item);
                Ok(KeyId(index))
            }
            None => {
                self.entries.push(Entry::Live(item));
                Ok(KeyId(self.entries.len() - 1))
            }
        }
    }

    fn take(&mut self, id: KeyId) -> Option<T> {
        let entry = self.entries.get_mut(id.0)?;
        match entry {
            Entry::Live(_) => {
                let old = mem::replace(entry, Entry::Free { next: self.free });
                self.free = Some(id.0);
                self.live -= 1;
                match old {
                    Entry::Live(item) => Some(item),
                    Entry::Free { .. } => None,
                }
            }
            Entry::Free { .. } => None,
        }
    }

    fn get(&self, id: KeyId) -> Option<&T> {
        match self.entries.get(id.0)? {
            Entry::Live(item) => Some(item),
            Entry::Free { .. } => None,
        }
    }

    fn get_mut(&mut self, id: KeyId) -> Option<&mut T> {
        match self.entries.get_mut(id.0)? {
            Entry::Live(item) => Some(item),
            Entry::Free { .. } => None,
        }
    }

    fn len(&self) -> usize {
        self.live
    }

    fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<KeyId> {
        self.entries.iter().enumerate().find_map(|(index, entry)| {
            match entry {
                Entry::Live(item) if pred(item) => Some(KeyId(index)),
                _ => None,
            }
        })
    }

    fn for_each(&mut self, mut f: impl FnMut(KeyId, &mut T)) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if let Entry::Live(item) = entry {
                f(KeyId(index), item);
            }
        }
    }
}
