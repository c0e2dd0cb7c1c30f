//! The turn-counter control state machine.
//!
//! Provides [`ClickCounter`] which consumes debounced button conditions and
//! the jumper-derived [`Config`], owns the displayed click values, and drives
//! the LED bank. Also defines the [`LedDisplay`] trait for hardware
//! abstraction.

use crate::DISPLAY_OFF;
use crate::config::{Config, Direction, WrapPolicy};
use crate::input::ButtonSource;
use crate::pattern::ClickPattern;
use crate::types::{Button, ButtonCondition, ModeState};

/// Trait for abstracting the LED bank.
///
/// Implement this for your LED hardware (a GPIO port, a shift register,
/// etc.). One bit per LED, set meaning lit. Handle any hardware errors
/// internally - this method cannot fail.
pub trait LedDisplay {
    /// Drives the LED bank to the given pattern.
    fn set_display(&mut self, pattern: u8);
}

/// Progress of the one-time startup calibration.
///
/// After power-on the counter shows the reset value flashing and lets the
/// players dial in the clicks-per-turn. The first hold and release of the
/// MODE button ends calibration and starts the first turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupPhase {
    /// Waiting for the MODE button to be held for the first time.
    WaitHold,

    /// MODE observed held; waiting for its release.
    WaitRelease,

    /// Calibration finished; mode now tracks the MODE button level.
    Running,
}

/// What the caller should do after a service pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceHint {
    /// Keep polling; call [`ClickCounter::service`] again promptly.
    Poll,

    /// Nothing will change until the scheduled wake fires.
    ///
    /// Returned in the auto-start variant once the turn's clicks are spent.
    /// Schedule a timer and call [`ClickCounter::wake`] when it fires, then
    /// resume servicing.
    SleepUntilWake,
}

/// The counter control state machine.
///
/// Runs the whole gadget behavior: the startup calibration, the
/// permanent-adjust vs play mode split, click shifting with the configured
/// wrap policies, the flash-gated rollover countdown, and the blink/dim LED
/// rendering. [`service`](Self::service) executes one pass of the unbounded
/// main loop and never blocks.
///
/// # Type Parameters
/// * `'i` - Lifetime of the button source reference
/// * `S` - Button source implementation type
/// * `D` - LED display implementation type
pub struct ClickCounter<'i, S: ButtonSource, D: LedDisplay> {
    input: &'i S,
    display: D,
    config: Config,
    setup: SetupPhase,
    mode: ModeState,
    value: ClickPattern,
    reset: ClickPattern,
    rollover: u8,
    rollover_stepped: bool,
    wake_pending: bool,
    last_pattern: u8,
}

impl<'i, S: ButtonSource, D: LedDisplay> ClickCounter<'i, S, D> {
    /// Creates a counter in the calibration phase with the LED bank dark.
    pub fn new(input: &'i S, mut display: D, config: Config) -> Self {
        display.set_display(DISPLAY_OFF);

        Self {
            input,
            display,
            config,
            setup: SetupPhase::WaitHold,
            mode: ModeState::Permanent,
            value: config.initial_reset,
            reset: config.initial_reset,
            rollover: 0,
            rollover_stepped: false,
            wake_pending: false,
            last_pattern: DISPLAY_OFF,
        }
    }

    /// Runs one pass of the control loop.
    ///
    /// The steps run in a fixed priority order: calibration/mode tracking,
    /// then increment, then decrement, then the rollover countdown, then
    /// rendering. The display is driven exactly once per pass.
    pub fn service(&mut self) -> ServiceHint {
        let flash = self.input.flash();

        self.advance_setup();

        let increment = self
            .input
            .condition(Button::Increment, ButtonCondition::JustPressed);
        let wake = core::mem::take(&mut self.wake_pending);
        let decrement = self
            .input
            .condition(Button::Decrement, ButtonCondition::JustPressed)
            || wake;

        if increment {
            self.shift_more();
            self.rollover = 0;
        }
        if decrement {
            self.shift_fewer();
            self.rollover = 0;
        }

        self.run_rollover(flash);

        self.last_pattern = self.render(flash);
        self.display.set_display(self.last_pattern);

        if self.sleep_ready() {
            ServiceHint::SleepUntilWake
        } else {
            ServiceHint::Poll
        }
    }

    /// Delivers the scheduled wake.
    ///
    /// The next [`service`](Self::service) pass consumes this as a single
    /// synthetic DECREMENT press, which in count-down play wraps the spent
    /// turn back to the reset value. Call it from the timer scheduled after
    /// [`ServiceHint::SleepUntilWake`].
    pub fn wake(&mut self) {
        self.wake_pending = true;
    }

    fn advance_setup(&mut self) {
        match self.setup {
            SetupPhase::WaitHold => {
                self.mode = ModeState::Permanent;
                if self.input.condition(Button::Mode, ButtonCondition::Held) {
                    self.setup = SetupPhase::WaitRelease;
                }
            }
            SetupPhase::WaitRelease => {
                if !self.input.condition(Button::Mode, ButtonCondition::Held) {
                    // Calibration is over; load the first turn. Mode keeps its
                    // forced Permanent level for the rest of this pass and
                    // starts tracking the button on the next one.
                    self.setup = SetupPhase::Running;
                    self.value = match self.config.direction {
                        Direction::CountDown => self.reset,
                        Direction::CountUp => ClickPattern::EMPTY,
                    };
                }
            }
            SetupPhase::Running => {
                self.mode = if self.input.condition(Button::Mode, ButtonCondition::Held) {
                    ModeState::Permanent
                } else {
                    ModeState::Normal
                };
            }
        }
    }

    fn shift_more(&mut self) {
        match self.mode {
            ModeState::Permanent => {
                // The permanent value saturates at the wired LEDs.
                self.reset = self.reset.more(self.config.led_mask, self.config.led_mask);
            }
            ModeState::Normal => {
                let wrap = self.wrap_pattern(self.config.overflow, self.config.led_mask);
                self.value = self.value.more(self.config.led_mask, wrap);
            }
        }
    }

    fn shift_fewer(&mut self) {
        match self.mode {
            ModeState::Permanent => {
                // The permanent value clamps at the floor; a turn of zero
                // clicks cannot be configured.
                self.reset = self
                    .reset
                    .fewer(self.config.reset_floor, self.config.reset_floor);
            }
            ModeState::Normal => {
                let wrap = self.wrap_pattern(self.config.underflow, ClickPattern::EMPTY);
                self.value = self.value.fewer(ClickPattern::EMPTY, wrap);
            }
        }
    }

    fn wrap_pattern(&self, policy: WrapPolicy, bound: ClickPattern) -> ClickPattern {
        match policy {
            WrapPolicy::Saturate => bound,
            WrapPolicy::ToReset => self.reset,
            WrapPolicy::ToEmpty => ClickPattern::EMPTY,
        }
    }

    /// Advances the end-of-turn countdown.
    ///
    /// The countdown steps at most once per high phase of the flash gate
    /// bit; on expiry the play value reloads from the reset value. It arms
    /// when a count-down turn has spent all clicks, and any manual press
    /// cancels it (handled in [`service`](Self::service)).
    fn run_rollover(&mut self, flash: u8) {
        let gate_high = self.gate_high(flash);
        if !gate_high {
            self.rollover_stepped = false;
        }

        if self.rollover > 0 {
            if gate_high && !self.rollover_stepped {
                self.rollover -= 1;
                self.rollover_stepped = true;
                if self.rollover == 0 {
                    self.value = self.reset;
                }
            }
        } else if self.config.auto_rollover
            && self.config.direction == Direction::CountDown
            && self.setup == SetupPhase::Running
            && self.value.is_empty()
        {
            self.rollover = self.config.rollover_cycles;
        }
    }

    fn render(&self, flash: u8) -> u8 {
        match self.mode {
            // Adjusting: the reset value blinks at the flash rate.
            ModeState::Permanent => {
                if self.gate_high(flash) {
                    self.reset.bits()
                } else {
                    DISPLAY_OFF
                }
            }
            // Playing: the live count, with the reset value glimmering
            // behind it on a sparse subset of ticks when configured.
            ModeState::Normal => {
                let mut pattern = self.value.bits();
                if self.config.dim_indicator && flash & self.config.dim_mask == 0 {
                    pattern |= self.reset.bits();
                }
                pattern
            }
        }
    }

    fn gate_high(&self, flash: u8) -> bool {
        flash >> self.config.flash_rate & 0x01 == 1
    }

    fn sleep_ready(&self) -> bool {
        self.config.auto_start
            && self.config.direction == Direction::CountDown
            && self.setup == SetupPhase::Running
            && self.mode == ModeState::Normal
            && self.value.is_empty()
            && self.rollover == 0
    }

    /// Returns the live play value.
    pub fn value(&self) -> ClickPattern {
        self.value
    }

    /// Returns the calibrated reset value.
    pub fn reset_value(&self) -> ClickPattern {
        self.reset
    }

    /// Returns the current mode.
    pub fn mode(&self) -> ModeState {
        self.mode
    }

    /// Returns the calibration progress.
    pub fn setup_phase(&self) -> SetupPhase {
        self.setup
    }

    /// Returns the remaining rollover countdown cycles (0 when idle).
    pub fn rollover_remaining(&self) -> u8 {
        self.rollover
    }

    /// Returns the pattern last written to the display.
    pub fn last_pattern(&self) -> u8 {
        self.last_pattern
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a reference to the owned display.
    pub fn display(&self) -> &D {
        &self.display
    }
}
