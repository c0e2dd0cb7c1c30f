//! Interrupt-driven button debouncing.
//!
//! [`Debouncer`] turns noisy raw pin levels into clean press and hold
//! conditions by requiring a run of consecutive "down" samples before
//! accepting a press. It is pure bookkeeping with no hardware access; feed it
//! one raw level byte per timer tick. For sharing between a tick interrupt
//! and a main loop, wrap it in [`SharedInput`](crate::input::SharedInput).

use crate::types::{Button, ButtonCondition};

/// Debounce threshold of the shipped hardware: 12 consecutive down samples.
pub const DEFAULT_DEBOUNCE_TICKS: u8 = 12;

/// Trait for abstracting the raw button port.
///
/// Implement this for your GPIO bank. Buttons are wired active-low through
/// pull-ups: a cleared bit means the button is physically pressed. Bit
/// positions follow [`Button::index`].
pub trait ButtonPins {
    /// Reads the raw, unfiltered level of every button line.
    fn sample_raw_levels(&mut self) -> u8;
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct Flags {
    just_pressed: bool,
    held: bool,
}

const IDLE: Flags = Flags {
    just_pressed: false,
    held: false,
};

/// Periodic sampler and per-button event store.
///
/// Call [`tick`](Self::tick) once per timer tick (tens of times per second).
/// A button whose line stays low for the configured threshold `T` of
/// consecutive ticks raises `just_pressed` and `held` on exactly the tick the
/// streak reaches `T`. `held` stays up for the rest of the streak;
/// `just_pressed` stays up until consumed through
/// [`condition`](Self::condition) or until the button is released, whichever
/// comes first, so a stale press can never leak into a later press cycle.
///
/// The sampler also advances a free-running wrapping tick counter,
/// [`flash`](Self::flash), which the display logic divides down into blink
/// and dim cycles.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    threshold: u8,
    counters: [u8; Button::COUNT],
    flags: [Flags; Button::COUNT],
    flash: u8,
}

impl Debouncer {
    /// Creates a sampler requiring `threshold` consecutive down samples.
    ///
    /// A zero threshold would press every button at rest; it is raised to 1.
    pub const fn new(threshold: u8) -> Self {
        Self {
            threshold: if threshold == 0 { 1 } else { threshold },
            counters: [0; Button::COUNT],
            flags: [IDLE; Button::COUNT],
            flash: 0,
        }
    }

    /// Processes one tick worth of raw levels (active-low).
    ///
    /// Counters saturate one past the threshold so arbitrarily long holds
    /// cannot overflow them.
    pub fn tick(&mut self, raw_levels: u8) {
        self.flash = self.flash.wrapping_add(1);

        let ceiling = self.threshold.saturating_add(1);
        for button in Button::ALL {
            let i = button.index();
            let down = raw_levels & button.bit() == 0;

            if down {
                if self.counters[i] < ceiling {
                    self.counters[i] += 1;
                }
            } else {
                self.counters[i] = 0;
            }

            if self.counters[i] == 0 {
                self.flags[i] = IDLE;
            } else if self.counters[i] >= self.threshold {
                // The held latch makes the press fire exactly once per
                // streak: only the tick the streak first reaches the
                // threshold finds it down.
                if !self.flags[i].held {
                    self.flags[i].just_pressed = true;
                }
                self.flags[i].held = true;
            }
        }
    }

    /// Queries a button condition.
    ///
    /// [`ButtonCondition::JustPressed`] is delivered at most once per press:
    /// a true result clears the flag. [`ButtonCondition::Held`] is a plain
    /// level read and never mutates.
    pub fn condition(&mut self, button: Button, condition: ButtonCondition) -> bool {
        let flags = &mut self.flags[button.index()];
        match condition {
            ButtonCondition::JustPressed => {
                let pressed = flags.just_pressed;
                flags.just_pressed = false;
                pressed
            }
            ButtonCondition::Held => flags.held,
        }
    }

    /// Current value of the free-running tick counter.
    #[inline]
    pub fn flash(&self) -> u8 {
        self.flash
    }

    /// The configured debounce threshold.
    #[inline]
    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_TICKS)
    }
}
