//! Pin driver interface.
//!
//! The core never touches hardware registers.  Everything it needs from the
//! platform is behind [`KeyDriver`]: configure a pin for input when a key is
//! added, read its level on every poll tick, and optionally tear it down
//! when the key is removed.  All three must be non-blocking and safe to call
//! from interrupt context.

/// Platform capability for driving key pins.
///
/// `Pin` is whatever the platform uses to address one input line; keys hold
/// a `&'static` reference to it and the registry looks keys up by that
/// reference's identity, so the type itself must not borrow anything
/// shorter-lived.
pub trait KeyDriver {
    type Pin: 'static;

    /// Configure the pin for digital input, including any pull resistor
    /// matching the key's wiring.  Called once per successful add.
    fn init_pin(&mut self, pin: &Self::Pin);

    /// Raw digital level of the pin, uninterpreted.  Called once per live
    /// key per poll tick.
    fn read_pin(&mut self, pin: &Self::Pin) -> bool;

    /// Return the pin to its reset state.  Called once per successful
    /// remove.  Platforms that never release pins can keep the default
    /// no-op.
    fn deinit_pin(&mut self, pin: &Self::Pin) {
        let _ = pin;
    }
}

/// A [`KeyDriver`] built from plain function pointers.
///
/// The capability-table form: bare-metal ports that expose pin access as
/// free functions plug them in here without writing a driver type.  The
/// deinit slot is optional; leave it `None` on platforms that never release
/// pins.
pub struct DriverTable<P> {
    pub init_pin: fn(&P),
    pub read_pin: fn(&P) -> bool,
    pub deinit_pin: Option<fn(&P)>,
}

impl<P: 'static> KeyDriver for DriverTable<P> {
    type Pin = P;

    fn init_pin(&mut self, pin: &P) {
        (self.init_pin)(pin)
    }

    fn read_pin(&mut self, pin: &P) -> bool {
        (self.read_pin)(pin)
    }

    fn deinit_pin(&mut self, pin: &P) {
        if let Some(deinit) = self.deinit_pin {
            deinit(pin)
        }
    }
}

/// Pin addressed as a port handle plus a pin index within it.
///
/// Matches how register-level ports describe a line (a GPIO block and a bit
/// within it).  `IO` stays opaque to the core; only the platform's driver
/// functions interpret it.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct PortPin<IO> {
    pub io: IO,
    pub pin: u8,
}

#[cfg(test)]
mod tests {
    use super::{DriverTable, KeyDriver, PortPin};

    fn init_noop(_pin: &PortPin<usize>) {}

    fn read_low_nibble(pin: &PortPin<usize>) -> bool {
        (pin.io >> pin.pin) & 1 != 0
    }

    #[test]
    fn table_dispatches() {
        let mut driver = DriverTable {
            init_pin: init_noop,
            read_pin: read_low_nibble,
            deinit_pin: None,
        };
        let pin = PortPin { io: 0b0100usize, pin: 2 };
        driver.init_pin(&pin);
        assert!(driver.read_pin(&pin));
        assert!(!driver.read_pin(&PortPin { io: 0b0100, pin: 0 }));
        // Missing deinit slot is a no-op, not an error.
        driver.deinit_pin(&pin);
    }
}
