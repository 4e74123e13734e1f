//! Key records, callback bindings, and the per-key tick.

use crate::driver::KeyDriver;
use crate::state::{KeyState, Polarity};

/// Callback verdict, doubling as the per-key suppression flag.
///
/// Returning `Handled` suppresses further callbacks for this key until it
/// passes back through [`KeyState::Idle`]; returning `NotHandled` keeps the
/// callbacks firing on every tick.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandleStatus {
    #[default]
    NotHandled,
    Handled,
}

/// A key callback.
///
/// Plain function pointers, not closures: callbacks run inside the caller's
/// timer interrupt and must not capture an environment.  Per-key context
/// goes through the key's user args instead.
pub type Callback<D, B, A = ()> = fn(&mut Key<D, B, A>, KeyState) -> HandleStatus;

/// Callback binding strategy for a key, chosen as a type parameter.
///
/// The two strategies are [`PerState`] (one slot per state) and
/// [`OnChange`] (a single combined slot).  `lookup` answers which callback,
/// if any, fires for a freshly classified state; an unset slot means the
/// state is silent.
pub trait Bindings<D: KeyDriver, A = ()>: Sized {
    fn lookup(&self, state: KeyState) -> Option<Callback<D, Self, A>>;
}

/// One callback slot per state.
///
/// The `on_idle` slot exists for applications that want a periodic tick
/// while the key rests; leaving it unset (the default) keeps idle silent.
/// Note the literal suppression rule for idle: a `Handled` return from
/// `on_idle` is cleared on the next idle tick, so a persistently handled
/// idle key hears the callback on alternating ticks.
pub struct PerState<D: KeyDriver, A = ()> {
    pub on_hold: Option<Callback<D, PerState<D, A>, A>>,
    pub on_released: Option<Callback<D, PerState<D, A>, A>>,
    pub on_pressed: Option<Callback<D, PerState<D, A>, A>>,
    pub on_idle: Option<Callback<D, PerState<D, A>, A>>,
}

impl<D: KeyDriver, A> Default for PerState<D, A> {
    fn default() -> Self {
        PerState {
            on_hold: None,
            on_released: None,
            on_pressed: None,
            on_idle: None,
        }
    }
}

impl<D: KeyDriver, A> Bindings<D, A> for PerState<D, A> {
    fn lookup(&self, state: KeyState) -> Option<Callback<D, Self, A>> {
        match state {
            KeyState::Hold => self.on_hold,
            KeyState::Released => self.on_released,
            KeyState::Pressed => self.on_pressed,
            KeyState::Idle => self.on_idle,
        }
    }
}

/// A single combined callback, fired for every non-idle state with the
/// state passed as argument.  Idle never fires.
pub struct OnChange<D: KeyDriver, A = ()> {
    pub on_change: Option<Callback<D, OnChange<D, A>, A>>,
}

impl<D: KeyDriver, A> Default for OnChange<D, A> {
    fn default() -> Self {
        OnChange { on_change: None }
    }
}

impl<D: KeyDriver, A> Bindings<D, A> for OnChange<D, A> {
    fn lookup(&self, state: KeyState) -> Option<Callback<D, Self, A>> {
        if state.is_idle() {
            None
        } else {
            self.on_change
        }
    }
}

/// One registered key.
///
/// `D` is the pin driver, `B` the callback binding strategy, `A` optional
/// per-key user data reachable from callbacks.  The pin config is only
/// referenced, never copied: the application owns it, and its address is
/// the key's identity for [`crate::KeySet::find`].
pub struct Key<D: KeyDriver, B, A = ()> {
    state: KeyState,
    handled: HandleStatus,
    polarity: Polarity,
    enabled: bool,
    config: &'static D::Pin,
    bindings: B,
    args: Option<A>,
}

impl<D: KeyDriver, B: Bindings<D, A>, A> Key<D, B, A> {
    /// A fresh key on `config`: idle, unsuppressed, enabled, active low.
    pub fn new(config: &'static D::Pin) -> Self
    where
        B: Default,
    {
        Key {
            state: KeyState::Idle,
            handled: HandleStatus::NotHandled,
            polarity: Polarity::ActiveLow,
            enabled: true,
            config,
            bindings: B::default(),
            args: None,
        }
    }

    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn with_args(mut self, args: A) -> Self {
        self.args = Some(args);
        self
    }

    pub fn config(&self) -> &'static D::Pin {
        self.config
    }

    /// Point the key at a different pin config.  The caller is responsible
    /// for the pin being initialized; the registry only inits on add.
    pub fn set_config(&mut self, config: &'static D::Pin) {
        self.config = config;
    }

    /// State as of the last poll tick.
    pub fn state(&self) -> KeyState {
        self.state
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn set_polarity(&mut self, polarity: Polarity) {
        self.polarity = polarity;
    }

    /// Whether `poll` dispatches callbacks for this key.  A disabled key
    /// still has its state folded every tick, so re-enabling sees the pin's
    /// current condition rather than a stale one.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn args(&self) -> Option<&A> {
        self.args.as_ref()
    }

    pub fn args_mut(&mut self) -> Option<&mut A> {
        self.args.as_mut()
    }

    pub fn set_args(&mut self, args: A) {
        self.args = Some(args);
    }

    pub fn take_args(&mut self) -> Option<A> {
        self.args.take()
    }

    pub fn bindings(&self) -> &B {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut B {
        &mut self.bindings
    }

    /// Back to the freshly-added condition.  Run by the registry on add so
    /// the first real sample can never report a spurious hold.
    pub(crate) fn reset(&mut self) {
        self.state = KeyState::Idle;
        self.handled = HandleStatus::NotHandled;
    }

    /// One poll tick for this key: fold the raw level, then dispatch.
    ///
    /// Suppression rule: a callback fires only while the flag is
    /// `NotHandled`; whatever it returns becomes the new flag, and only an
    /// idle tick resets a `Handled` flag.  So a callback that answers
    /// `Handled` hears about each press once, not on every tick the key
    /// stays down.
    pub(crate) fn tick(&mut self, level: bool) {
        let state = self.state.step(self.polarity.normalize(level));
        self.state = state;
        if !self.enabled {
            return;
        }
        if self.handled == HandleStatus::NotHandled {
            if let Some(callback) = self.bindings.lookup(state) {
                self.handled = callback(self, state);
            }
        } else if state.is_idle() {
            self.handled = HandleStatus::NotHandled;
        }
    }
}

impl<D: KeyDriver, A> Key<D, PerState<D, A>, A> {
    pub fn on_hold(&mut self, callback: Callback<D, PerState<D, A>, A>) {
        self.bindings.on_hold = Some(callback);
    }

    pub fn on_released(&mut self, callback: Callback<D, PerState<D, A>, A>) {
        self.bindings.on_released = Some(callback);
    }

    pub fn on_pressed(&mut self, callback: Callback<D, PerState<D, A>, A>) {
        self.bindings.on_pressed = Some(callback);
    }

    pub fn on_idle(&mut self, callback: Callback<D, PerState<D, A>, A>) {
        self.bindings.on_idle = Some(callback);
    }
}

impl<D: KeyDriver, A> Key<D, OnChange<D, A>, A> {
    pub fn on_change(&mut self, callback: Callback<D, OnChange<D, A>, A>) {
        self.bindings.on_change = Some(callback);
    }
}
