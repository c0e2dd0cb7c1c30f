//! Integration tests for configuration building and the jumper read

mod common;

use click_counter::{ClickPattern, Config, ConfigError, Direction, Jumper, WrapPolicy};
use common::TestJumpers;

#[test]
fn defaults_match_the_shipped_hardware() {
    let config = Config::default();
    assert_eq!(config.direction, Direction::CountDown);
    assert_eq!(config.led_mask, ClickPattern::FULL);
    assert_eq!(config.initial_reset, ClickPattern::from_clicks(4));
    assert_eq!(config.reset_floor, ClickPattern::from_clicks(1));
    assert_eq!(config.underflow, WrapPolicy::ToReset);
    assert_eq!(config.flash_rate, 6);
    assert_eq!(config.rollover_cycles, 3);
    assert!(!config.auto_rollover);
    assert!(!config.auto_start);
    assert!(!config.dim_indicator);
}

#[test]
fn default_builder_validates() {
    assert!(Config::builder().build().is_ok());
}

#[test]
fn empty_led_mask_is_rejected() {
    let result = Config::builder()
        .led_mask(ClickPattern::EMPTY)
        .initial_reset(ClickPattern::EMPTY)
        .reset_floor(ClickPattern::EMPTY)
        .build();
    assert_eq!(result, Err(ConfigError::EmptyLedMask));
}

#[test]
fn zero_reset_floor_is_rejected() {
    let result = Config::builder().reset_floor(ClickPattern::EMPTY).build();
    assert_eq!(result, Err(ConfigError::ZeroResetFloor));
}

#[test]
fn floor_outside_the_mask_is_rejected() {
    let result = Config::builder()
        .led_mask(ClickPattern::new(0b0000_1110))
        .reset_floor(ClickPattern::new(0b0000_0001))
        .build();
    assert_eq!(result, Err(ConfigError::FloorOutsideMask));
}

#[test]
fn reset_outside_the_mask_is_rejected() {
    let result = Config::builder()
        .led_mask(ClickPattern::new(0b0000_0111))
        .initial_reset(ClickPattern::from_clicks(4))
        .build();
    assert_eq!(result, Err(ConfigError::ResetOutsideMask));
}

#[test]
fn reset_below_the_floor_is_rejected() {
    let result = Config::builder()
        .initial_reset(ClickPattern::from_clicks(1))
        .reset_floor(ClickPattern::from_clicks(2))
        .build();
    assert_eq!(result, Err(ConfigError::ResetBelowFloor));
}

#[test]
fn zero_rollover_cycles_are_rejected() {
    let result = Config::builder().rollover_cycles(0).build();
    assert_eq!(result, Err(ConfigError::ZeroRolloverCycles));
}

#[test]
fn flash_rate_must_address_a_counter_bit() {
    let result = Config::builder().flash_rate(8).build();
    assert_eq!(result, Err(ConfigError::FlashRateOutOfRange));
    assert!(Config::builder().flash_rate(7).build().is_ok());
}

#[test]
fn open_jumpers_select_the_default_count_down_variant() {
    let config = Config::from_jumpers(&TestJumpers::open());
    assert_eq!(config.direction, Direction::CountDown);
    assert_eq!(config.underflow, WrapPolicy::ToReset);
    // The rollover jumper sits behind a pull-up: open means enabled.
    assert!(config.auto_rollover);
    assert!(!config.auto_start);
    assert!(!config.dim_indicator);
}

#[test]
fn bridging_the_rollover_jumper_disables_auto_rollover() {
    let config = Config::from_jumpers(&TestJumpers::open().bridge(Jumper::Rollover));
    assert!(!config.auto_rollover);
}

#[test]
fn bridging_the_direction_jumper_selects_count_up() {
    let config = Config::from_jumpers(&TestJumpers::open().bridge(Jumper::Direction));
    assert_eq!(config.direction, Direction::CountUp);
    // An empty bar is count-up's natural start, not an exhausted turn.
    assert_eq!(config.underflow, WrapPolicy::Saturate);
}

#[test]
fn auto_start_and_dim_jumpers_map_directly() {
    let config = Config::from_jumpers(
        &TestJumpers::open()
            .bridge(Jumper::AutoStart)
            .bridge(Jumper::Dim),
    );
    assert!(config.auto_start);
    assert!(config.dim_indicator);
}

#[test]
fn error_messages_format_correctly_for_display() {
    let message = std::format!("{}", ConfigError::ZeroResetFloor);
    assert!(message.contains("floor"));

    let message = std::format!("{}", ConfigError::EmptyLedMask);
    assert!(message.contains("mask"));
}
