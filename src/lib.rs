//! Debounce and dispatch for keys, buttons, and other digital inputs
//! sampled from a periodic timer interrupt.
//!
//! Raw pin levels are noisy; this crate folds each key's two most recent
//! samples into a four-way state (pressed edge, steady hold, released edge,
//! steady idle) and fires the key's callback once per state entry rather
//! than once per tick.  The hot path is a handful of loads and a shift per
//! key, cheap enough to run inside an interrupt handler every 20 to 50 ms,
//! and nothing here allocates unless the `alloc` storage regime is chosen.
//!
//! The caller owns the cadence: hook [`KeySet::poll`] to a periodic timer.
//! Hardware access goes through the [`KeyDriver`] trait; see [`DriverTable`]
//! for the bare-metal function-table form and [`HalPins`] for `embedded-hal`
//! pins.
//!
//! ```
//! use keywatch::{DriverTable, HandleStatus, Key, KeySet, KeyState, PerState, Slots};
//!
//! type Driver = DriverTable<u8>;
//! type Button = Key<Driver, PerState<Driver>>;
//!
//! static USER_BUTTON: u8 = 3;
//!
//! fn init_pin(_pin: &u8) {}
//! fn read_pin(_pin: &u8) -> bool {
//!     false // active low: reads asserted
//! }
//!
//! fn pressed(_key: &mut Button, _state: KeyState) -> HandleStatus {
//!     HandleStatus::Handled
//! }
//!
//! let driver = DriverTable { init_pin, read_pin, deinit_pin: None };
//! let mut keys: KeySet<Driver, Slots<Button, 4>> = KeySet::new(driver);
//!
//! let mut button = Button::new(&USER_BUTTON);
//! button.on_pressed(pressed);
//! let id = keys.add(button).ok().unwrap();
//!
//! // From here, the timer interrupt calls keys.poll() every 20..50 ms.
//! keys.poll();
//! assert_eq!(keys.key(id).unwrap().state(), KeyState::Pressed);
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod driver;
mod hal;
mod key;
mod logging;
mod set;
mod state;
mod store;
mod sync;

pub use driver::{DriverTable, KeyDriver, PortPin};
pub use hal::HalPins;
pub use key::{Bindings, Callback, HandleStatus, Key, OnChange, PerState};
pub use set::KeySet;
pub use state::{KeyState, Polarity};
#[cfg(feature = "alloc")]
pub use store::Arena;
pub use store::{KeyId, KeyStore, Slots};
pub use sync::IrqKeySet;
