//! Shared test infrastructure for click-counter integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;

use click_counter::{
    Button, ButtonCondition, ButtonPins, ButtonSource, ClickCounter, Jumper, Jumpers, LedDisplay,
};

// ============================================================================
// Mock Button Port
// ============================================================================

/// Mock raw button port with directly settable levels (active-low)
pub struct TestPins {
    levels: u8,
}

impl TestPins {
    pub fn new() -> Self {
        Self { levels: 0xff }
    }

    /// Presses or releases a button at the raw pin level
    pub fn set_down(&mut self, button: Button, down: bool) {
        if down {
            self.levels &= !button.bit();
        } else {
            self.levels |= button.bit();
        }
    }

    pub fn release_all(&mut self) {
        self.levels = 0xff;
    }
}

impl ButtonPins for TestPins {
    fn sample_raw_levels(&mut self) -> u8 {
        self.levels
    }
}

// ============================================================================
// Mock Button Source
// ============================================================================

/// Scriptable button source bypassing the debouncer.
///
/// Presses and holds are injected directly, and the flash counter is under
/// test control, so display-timing scenarios are deterministic.
pub struct TestInput {
    just: Cell<u8>,
    held: Cell<u8>,
    flash: Cell<u8>,
}

impl TestInput {
    pub fn new() -> Self {
        Self {
            just: Cell::new(0),
            held: Cell::new(0),
            flash: Cell::new(0),
        }
    }

    /// Queues a single just-pressed delivery for the button
    pub fn press(&self, button: Button) {
        self.just.set(self.just.get() | button.bit());
    }

    pub fn hold(&self, button: Button, held: bool) {
        if held {
            self.held.set(self.held.get() | button.bit());
        } else {
            self.held.set(self.held.get() & !button.bit());
        }
    }

    pub fn set_flash(&self, value: u8) {
        self.flash.set(value);
    }
}

impl ButtonSource for TestInput {
    fn condition(&self, button: Button, condition: ButtonCondition) -> bool {
        match condition {
            ButtonCondition::JustPressed => {
                let mask = self.just.get();
                self.just.set(mask & !button.bit());
                mask & button.bit() != 0
            }
            ButtonCondition::Held => self.held.get() & button.bit() != 0,
        }
    }

    fn flash(&self) -> u8 {
        self.flash.get()
    }
}

// ============================================================================
// Mock LED Display
// ============================================================================

/// Mock display that records every pattern written for testing
pub struct TestDisplay {
    last: u8,
    history: heapless::Vec<u8, 128>,
}

impl TestDisplay {
    pub fn new() -> Self {
        Self {
            last: 0,
            history: heapless::Vec::new(),
        }
    }

    pub fn last(&self) -> u8 {
        self.last
    }

    pub fn history(&self) -> &[u8] {
        &self.history
    }
}

impl LedDisplay for TestDisplay {
    fn set_display(&mut self, pattern: u8) {
        self.last = pattern;
        let _ = self.history.push(pattern);
    }
}

// ============================================================================
// Mock Jumpers
// ============================================================================

/// Mock jumper block; bridge the jumpers the scenario needs
pub struct TestJumpers {
    bridged: [bool; 4],
}

impl TestJumpers {
    pub fn open() -> Self {
        Self { bridged: [false; 4] }
    }

    pub fn bridge(mut self, jumper: Jumper) -> Self {
        self.bridged[Self::index(jumper)] = true;
        self
    }

    fn index(jumper: Jumper) -> usize {
        match jumper {
            Jumper::Direction => 0,
            Jumper::Rollover => 1,
            Jumper::AutoStart => 2,
            Jumper::Dim => 3,
        }
    }
}

impl Jumpers for TestJumpers {
    fn read(&self, jumper: Jumper) -> bool {
        self.bridged[Self::index(jumper)]
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Drives the startup calibration to completion: hold MODE, release it, and
/// service once more so mode tracking has taken over.
pub fn finish_setup<D: LedDisplay>(input: &TestInput, counter: &mut ClickCounter<TestInput, D>) {
    input.hold(Button::Mode, true);
    counter.service();
    input.hold(Button::Mode, false);
    counter.service();
    counter.service();
}
