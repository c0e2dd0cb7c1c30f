#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Debouncer`**: Converts noisy raw pin levels into clean press/hold conditions on a fixed timebase
//! - **`SharedInput`**: Critical-section wrapper sharing the debouncer between a timer interrupt and the main loop
//! - **`ClickPattern`**: The thermometer-coded click count shown on the LED bank
//! - **`Config`**: Static behavior options, normally derived from the hardware jumpers at startup
//! - **`ClickCounter`**: The control state machine consuming button conditions and driving the display
//! - **`ButtonPins`**: Trait to implement for your raw button port
//! - **`Jumpers`**: Trait to implement for your configuration jumpers
//! - **`LedDisplay`**: Trait to implement for your LED bank
//! - **`ButtonSource`**: Trait connecting an input layer to the state machine
//!
//! All display output is a plain `u8` bit pattern, one bit per LED. When
//! implementing [`LedDisplay`] for your hardware, write the pattern to your
//! port or shift register as-is.

pub mod config;
pub mod counter;
pub mod debounce;
pub mod input;
pub mod pattern;
pub mod types;

pub use config::{Config, ConfigBuilder, ConfigError, Direction, Jumper, Jumpers, WrapPolicy};
pub use counter::{ClickCounter, LedDisplay, ServiceHint, SetupPhase};
pub use debounce::{ButtonPins, DEFAULT_DEBOUNCE_TICKS, Debouncer};
pub use input::{ButtonSource, SharedInput};
pub use pattern::ClickPattern;
pub use types::{Button, ButtonCondition, ModeState};

/// Pattern with every LED dark.
pub const DISPLAY_OFF: u8 = 0x00;
