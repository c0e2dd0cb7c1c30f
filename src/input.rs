//! Sharing the debouncer between a timer interrupt and the main loop.
//!
//! The sampler runs from a periodic timer interrupt while the control state
//! machine polls it from the main loop. [`SharedInput`] wraps a
//! [`Debouncer`] in a critical-section mutex so every query observes either
//! the state before a tick or after it, never a half-applied one.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::debounce::{ButtonPins, Debouncer};
use crate::types::{Button, ButtonCondition};

/// Trait for reading debounced button conditions and the flash counter.
///
/// This is the seam between the input layer and the control state machine.
/// Queries take `&self`; implementations provide their own interior
/// mutability for the read-and-clear semantics of
/// [`ButtonCondition::JustPressed`].
pub trait ButtonSource {
    /// Queries a button condition (consuming it if `JustPressed`).
    fn condition(&self, button: Button, condition: ButtonCondition) -> bool;

    /// Current value of the free-running tick counter.
    fn flash(&self) -> u8;
}

/// A [`Debouncer`] shared between a tick interrupt and the main loop.
///
/// Construction is `const`, so the usual home for this type is a `static`:
///
/// ```
/// use click_counter::{Debouncer, SharedInput, DEFAULT_DEBOUNCE_TICKS};
///
/// static INPUT: SharedInput = SharedInput::new(Debouncer::new(DEFAULT_DEBOUNCE_TICKS));
/// ```
///
/// The timer interrupt handler calls [`tick`](Self::tick) (or
/// [`tick_with`](Self::tick_with) to sample the pins itself); the main loop
/// reads through the [`ButtonSource`] impl. Every access runs inside its own
/// critical section.
pub struct SharedInput {
    inner: Mutex<RefCell<Debouncer>>,
}

impl SharedInput {
    /// Wraps a debouncer for shared access.
    pub const fn new(debouncer: Debouncer) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(debouncer)),
        }
    }

    /// Runs one debounce tick over the given raw levels (active-low).
    ///
    /// Call this from the periodic timer interrupt handler.
    pub fn tick(&self, raw_levels: u8) {
        critical_section::with(|cs| {
            self.inner.borrow_ref_mut(cs).tick(raw_levels);
        });
    }

    /// Samples the pins and runs one debounce tick.
    pub fn tick_with<P: ButtonPins>(&self, pins: &mut P) {
        self.tick(pins.sample_raw_levels());
    }
}

impl ButtonSource for SharedInput {
    fn condition(&self, button: Button, condition: ButtonCondition) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).condition(button, condition))
    }

    fn flash(&self) -> u8 {
        critical_section::with(|cs| self.inner.borrow_ref(cs).flash())
    }
}
