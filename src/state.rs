//! Per-key debounce state.
//!
//! Each key carries a 2-bit state that is the fold of its two most recent
//! samples.  A transition is therefore only reported one poll tick after it
//! is observed, which is the whole of the debounce contract: a glitch that
//! does not survive into the next sample never produces an edge.

/// Classifier output for one key on one poll tick.
///
/// The discriminants are load bearing: the state is the last two normalized
/// samples, newest in bit 0, and a 0 bit means "asserted on that sample".
///
/// ```text
///          _____                __(Idle)__
/// (Pressed)   <-|____(Hold)____|-> (Released)
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum KeyState {
    /// Asserted on both of the last two samples.  Steady pressed.
    Hold = 0b00,
    /// Was asserted, now is not.  Falling edge of the press.
    Released = 0b01,
    /// Was not asserted, now is.  Rising edge of the press.
    Pressed = 0b10,
    /// Not asserted on either of the last two samples.  Steady idle.
    Idle = 0b11,
}

impl KeyState {
    /// Fold one normalized sample into the state.
    ///
    /// `bit` is the raw pin level XORed with the key's polarity bit, so a
    /// `false` bit means the key was asserted on this sample.
    pub const fn step(self, bit: bool) -> KeyState {
        Self::from_bits((self as u8) << 1 | bit as u8)
    }

    /// Steady idle, the only state that re-arms callback suppression.
    pub const fn is_idle(self) -> bool {
        matches!(self, KeyState::Idle)
    }

    pub const fn bits(self) -> u8 {
        self as u8
    }

    const fn from_bits(bits: u8) -> KeyState {
        match bits & 0b11 {
            0b00 => KeyState::Hold,
            0b01 => KeyState::Released,
            0b10 => KeyState::Pressed,
            _ => KeyState::Idle,
        }
    }
}

/// Which electrical level counts as "asserted" for a key.
///
/// Active low is the default, matching the usual pull-up wiring where a
/// pressed key shorts the pin to ground.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    #[default]
    ActiveLow,
    ActiveHigh,
}

impl Polarity {
    /// The XOR mask applied to raw levels before folding.
    pub(crate) const fn bit(self) -> bool {
        matches!(self, Polarity::ActiveHigh)
    }

    /// Normalize a raw pin level so that `false` means asserted.
    pub(crate) const fn normalize(self, level: bool) -> bool {
        level ^ self.bit()
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyState, Polarity};

    const ALL: [KeyState; 4] = [
        KeyState::Hold,
        KeyState::Released,
        KeyState::Pressed,
        KeyState::Idle,
    ];

    #[test]
    fn press_release_cycle() {
        // asserted, asserted, deasserted, deasserted
        let mut state = KeyState::Idle;
        let mut seen = Vec::new();
        for bit in [false, false, true, true] {
            state = state.step(bit);
            seen.push(state);
        }
        assert_eq!(
            seen,
            [
                KeyState::Pressed,
                KeyState::Hold,
                KeyState::Released,
                KeyState::Idle
            ]
        );
    }

    #[test]
    fn no_history_beyond_two_bits() {
        // Whatever state a sample history reaches, two further samples fully
        // determine the result.
        for s0 in ALL {
            for b1 in [false, true] {
                for b2 in [false, true] {
                    let chained = s0.step(b1).step(b2);
                    let direct =
                        KeyState::from_bits((b1 as u8) << 1 | b2 as u8);
                    assert_eq!(chained, direct);
                }
            }
        }
    }

    #[test]
    fn first_sample_never_holds() {
        assert_eq!(KeyState::Idle.step(true), KeyState::Idle);
        assert_eq!(KeyState::Idle.step(false), KeyState::Pressed);
    }

    #[test]
    fn polarity_normalizes_to_asserted_low() {
        // Active-low pin pulled low and active-high pin driven high both
        // normalize to the asserted bit.
        assert_eq!(Polarity::ActiveLow.normalize(false), false);
        assert_eq!(Polarity::ActiveHigh.normalize(true), false);
        assert_eq!(Polarity::ActiveLow.normalize(true), true);
        assert_eq!(Polarity::ActiveHigh.normalize(false), true);
    }

    #[test]
    fn encoding_is_stable() {
        for state in ALL {
            assert_eq!(KeyState::from_bits(state.bits()), state);
        }
        assert_eq!(KeyState::Hold.bits(), 0b00);
        assert_eq!(KeyState::Idle.bits(), 0b11);
    }
}
