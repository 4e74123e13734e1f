//! Driving keys from `embedded-hal` input pins.

use core::marker::PhantomData;

use embedded_hal::digital::v2::InputPin;

use crate::driver::KeyDriver;

/// [`KeyDriver`] over any `embedded-hal` 0.2 [`InputPin`] used directly as
/// the pin config.
///
/// HAL pins arrive already configured for input with their pull set up, so
/// init and deinit are no-ops here.  A pin that fails to read reports a
/// high raw level for that tick, the deasserted level under the default
/// active-low wiring, so read errors can never synthesize a press there;
/// active-high keys on a fallible pin should expect the opposite.  The
/// classifier absorbs a single bad sample the same way it absorbs bounce.
pub struct HalPins<P> {
    _pins: PhantomData<fn() -> P>,
}

impl<P> HalPins<P> {
    pub const fn new() -> Self {
        HalPins { _pins: PhantomData }
    }
}

impl<P> Default for HalPins<P> {
    fn default() -> Self {
        HalPins::new()
    }
}

impl<P: InputPin + 'static> KeyDriver for HalPins<P> {
    type Pin = P;

    fn init_pin(&mut self, _pin: &P) {}

    fn read_pin(&mut self, pin: &P) -> bool {
        pin.is_high().unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use core::convert::Infallible;

    use embedded_hal::digital::v2::InputPin;

    use super::HalPins;
    use crate::key::{HandleStatus, Key, OnChange, PerState};
    use crate::set::KeySet;
    use crate::state::{KeyState, Polarity};
    use crate::store::Slots;

    struct FakePin(Cell<bool>);

    impl InputPin for FakePin {
        type Error = Infallible;

        fn is_high(&self) -> Result<bool, Infallible> {
            Ok(self.0.get())
        }

        fn is_low(&self) -> Result<bool, Infallible> {
            Ok(!self.0.get())
        }
    }

    type HalKey = Key<HalPins<FakePin>, OnChange<HalPins<FakePin>, Vec<KeyState>>, Vec<KeyState>>;

    #[test]
    fn polls_through_hal_pin() {
        let pin: &'static FakePin = Box::leak(Box::new(FakePin(Cell::new(false))));
        let mut key = HalKey::new(pin)
            .with_polarity(Polarity::ActiveHigh)
            .with_args(Vec::new());
        key.on_change(|key, state| {
            key.args_mut().unwrap().push(state);
            HandleStatus::NotHandled
        });

        let mut set: KeySet<_, Slots<HalKey, 1>> = KeySet::new(HalPins::new());
        let id = set.add(key).ok().unwrap();

        for level in [true, true, false, false] {
            pin.0.set(level);
            set.poll();
        }
        assert_eq!(
            set.key(id).unwrap().args().unwrap().as_slice(),
            [KeyState::Pressed, KeyState::Hold, KeyState::Released]
        );
    }

    struct FailingPin;

    impl InputPin for FailingPin {
        type Error = ();

        fn is_high(&self) -> Result<bool, ()> {
            Err(())
        }

        fn is_low(&self) -> Result<bool, ()> {
            Err(())
        }
    }

    #[test]
    fn read_errors_never_press_an_active_low_key() {
        static BROKEN: FailingPin = FailingPin;
        type BrokenKey = Key<HalPins<FailingPin>, PerState<HalPins<FailingPin>, usize>, usize>;

        let mut key = BrokenKey::new(&BROKEN).with_args(0);
        key.on_pressed(|key, _| {
            *key.args_mut().unwrap() += 1;
            HandleStatus::Handled
        });

        let mut set: KeySet<_, Slots<BrokenKey, 1>> = KeySet::new(HalPins::new());
        let id = set.add(key).ok().unwrap();

        // Errors read as the deasserted level: the key must sit idle.
        set.poll();
        set.poll();
        assert_eq!(set.key(id).unwrap().state(), KeyState::Idle);
        assert_eq!(*set.key(id).unwrap().args().unwrap(), 0);
    }
}
