//! Static configuration, read from hardware jumpers once at startup.

use crate::pattern::ClickPattern;

/// The configuration jumpers on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Jumper {
    /// Bridged selects count-up play; open selects count-down.
    Direction,

    /// Bridged disables the automatic end-of-turn rollover.
    ///
    /// The jumper pin sits behind a pull-up, so the factory-open state
    /// leaves rollover enabled.
    Rollover,

    /// Bridged enables the auto-start wake after the count reaches zero.
    AutoStart,

    /// Bridged shows the reset value dimly behind the live count.
    Dim,
}

/// Trait for reading the configuration jumpers.
///
/// Implement this for your GPIO bank. `true` means physically bridged.
/// Jumpers are only read during [`Config::from_jumpers`]; nothing queries
/// them afterwards.
pub trait Jumpers {
    /// Reads one jumper.
    fn read(&self, jumper: Jumper) -> bool;
}

/// Which way a turn's click count moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Each turn starts at the reset value and clicks are spent toward empty.
    CountDown,

    /// Each turn starts empty and clicks accumulate toward the reset value.
    CountUp,
}

/// What happens when a shift runs into a bound of the play value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WrapPolicy {
    /// Stay at the bound.
    Saturate,

    /// Reload the reset value (a fresh turn).
    ToReset,

    /// Clear to no clicks.
    ToEmpty,
}

/// Errors detected while validating a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The LED mask has no bits set; nothing could ever be displayed.
    EmptyLedMask,

    /// The reset floor has no bits set; the permanent value could reach
    /// zero clicks.
    ZeroResetFloor,

    /// The reset floor lights LEDs outside the configured mask.
    FloorOutsideMask,

    /// The initial reset value lights LEDs outside the configured mask.
    ResetOutsideMask,

    /// The initial reset value is below the reset floor.
    ResetBelowFloor,

    /// A zero-cycle rollover countdown would expire before it starts.
    ZeroRolloverCycles,

    /// The flash rate must address a bit of the 8-bit flash counter.
    FlashRateOutOfRange,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptyLedMask => write!(f, "LED mask has no bits set"),
            ConfigError::ZeroResetFloor => write!(f, "reset floor has no bits set"),
            ConfigError::FloorOutsideMask => {
                write!(f, "reset floor extends outside the LED mask")
            }
            ConfigError::ResetOutsideMask => {
                write!(f, "initial reset value extends outside the LED mask")
            }
            ConfigError::ResetBelowFloor => {
                write!(f, "initial reset value is below the reset floor")
            }
            ConfigError::ZeroRolloverCycles => {
                write!(f, "rollover countdown must run for at least one cycle")
            }
            ConfigError::FlashRateOutOfRange => {
                write!(f, "flash rate must be a bit index below 8")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Static configuration of the counter.
///
/// The defaults reproduce the shipped hardware: eight LEDs, four starting
/// clicks, count-down play with wrap-to-reset at zero, a one-click floor on
/// the permanent value, blink gate on bit 6 of the flash counter, and a
/// three-cycle rollover countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Count-down or count-up play.
    pub direction: Direction,

    /// Which LEDs are physically wired; the maximum displayable pattern.
    pub led_mask: ClickPattern,

    /// The reset value before any calibration.
    pub initial_reset: ClickPattern,

    /// Lowest pattern the permanent value may be adjusted down to.
    pub reset_floor: ClickPattern,

    /// Play-mode policy when incrementing at the LED mask.
    pub overflow: WrapPolicy,

    /// Play-mode policy when decrementing at empty.
    pub underflow: WrapPolicy,

    /// Bit of the flash counter gating blink and rollover cycles.
    pub flash_rate: u8,

    /// Flash-counter mask selecting the sparse ticks that light the dim
    /// indicator.
    pub dim_mask: u8,

    /// Show the reset value dimly behind the live count in play mode.
    pub dim_indicator: bool,

    /// Automatically reload the reset value a few cycles after the count
    /// reaches zero.
    pub auto_rollover: bool,

    /// Ask the caller to sleep once the count reaches zero and wake with a
    /// synthetic click.
    pub auto_start: bool,

    /// Length of the rollover countdown, in flash cycles.
    pub rollover_cycles: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            direction: Direction::CountDown,
            led_mask: ClickPattern::FULL,
            initial_reset: ClickPattern::from_clicks(4),
            reset_floor: ClickPattern::from_clicks(1),
            overflow: WrapPolicy::Saturate,
            underflow: WrapPolicy::ToReset,
            flash_rate: 6,
            dim_mask: 0x07,
            dim_indicator: false,
            auto_rollover: false,
            auto_start: false,
            rollover_cycles: 3,
        }
    }
}

impl Config {
    /// Creates a configuration builder seeded with the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Builds the configuration selected by the hardware jumpers.
    ///
    /// This is the one-time startup read. Count-up play switches the
    /// underflow policy to saturating, since an empty bar is its natural
    /// starting point rather than an exhausted turn.
    pub fn from_jumpers<J: Jumpers>(jumpers: &J) -> Self {
        let direction = if jumpers.read(Jumper::Direction) {
            Direction::CountUp
        } else {
            Direction::CountDown
        };

        Self {
            direction,
            underflow: match direction {
                Direction::CountDown => WrapPolicy::ToReset,
                Direction::CountUp => WrapPolicy::Saturate,
            },
            auto_rollover: !jumpers.read(Jumper::Rollover),
            auto_start: jumpers.read(Jumper::AutoStart),
            dim_indicator: jumpers.read(Jumper::Dim),
            ..Self::default()
        }
    }
}

/// Builder for validated configurations.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a builder seeded with [`Config::default`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Sets the play direction.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.config.direction = direction;
        self
    }

    /// Sets the wired-LED mask.
    pub fn led_mask(mut self, mask: ClickPattern) -> Self {
        self.config.led_mask = mask;
        self
    }

    /// Sets the pre-calibration reset value.
    pub fn initial_reset(mut self, reset: ClickPattern) -> Self {
        self.config.initial_reset = reset;
        self
    }

    /// Sets the floor of the permanent value.
    pub fn reset_floor(mut self, floor: ClickPattern) -> Self {
        self.config.reset_floor = floor;
        self
    }

    /// Sets the play-mode overflow policy.
    pub fn overflow(mut self, policy: WrapPolicy) -> Self {
        self.config.overflow = policy;
        self
    }

    /// Sets the play-mode underflow policy.
    pub fn underflow(mut self, policy: WrapPolicy) -> Self {
        self.config.underflow = policy;
        self
    }

    /// Sets the flash-counter bit gating blink and rollover cycles.
    pub fn flash_rate(mut self, bit: u8) -> Self {
        self.config.flash_rate = bit;
        self
    }

    /// Sets the flash-counter mask for the dim indicator.
    pub fn dim_mask(mut self, mask: u8) -> Self {
        self.config.dim_mask = mask;
        self
    }

    /// Enables or disables the dim reset indicator.
    pub fn dim_indicator(mut self, enabled: bool) -> Self {
        self.config.dim_indicator = enabled;
        self
    }

    /// Enables or disables the automatic end-of-turn rollover.
    pub fn auto_rollover(mut self, enabled: bool) -> Self {
        self.config.auto_rollover = enabled;
        self
    }

    /// Enables or disables the auto-start sleep/wake cycle.
    pub fn auto_start(mut self, enabled: bool) -> Self {
        self.config.auto_start = enabled;
        self
    }

    /// Sets the rollover countdown length in flash cycles.
    pub fn rollover_cycles(mut self, cycles: u8) -> Self {
        self.config.rollover_cycles = cycles;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] naming the first inconsistency found.
    pub fn build(self) -> Result<Config, ConfigError> {
        let config = self.config;

        if config.led_mask.is_empty() {
            return Err(ConfigError::EmptyLedMask);
        }
        if config.reset_floor.is_empty() {
            return Err(ConfigError::ZeroResetFloor);
        }
        if !config.led_mask.covers(config.reset_floor) {
            return Err(ConfigError::FloorOutsideMask);
        }
        if !config.led_mask.covers(config.initial_reset) {
            return Err(ConfigError::ResetOutsideMask);
        }
        if !config.initial_reset.covers(config.reset_floor) {
            return Err(ConfigError::ResetBelowFloor);
        }
        if config.rollover_cycles == 0 {
            return Err(ConfigError::ZeroRolloverCycles);
        }
        if config.flash_rate >= 8 {
            return Err(ConfigError::FlashRateOutOfRange);
        }

        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
