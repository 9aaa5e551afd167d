//! Capture configuration.
//!
//! All parameters are fixed at [`init`](crate::capture::MicCapture::init)
//! time and immutable afterwards. The word-select pin is not configurable:
//! the sequencer program drives WS on the pin immediately above the bit
//! clock, so it is derived from `clock_pin` and the adjacency requirement
//! cannot be violated.

use crate::constants::{BITS_PER_FRAME, DEFAULT_BUFFER_WORDS, DEFAULT_SAMPLE_FREQUENCY};

/// Immutable configuration for one capture session.
///
/// ```
/// use pio_mic::config::Config;
///
/// let config = Config::new(0, 22, 20)
///     .with_sample_frequency(16_000)
///     .with_samples_per_buffer(1024);
/// assert_eq!(config.word_select_pin(), 21);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Index of the sequencer unit (PIO block) to use.
    pub unit: u8,
    /// GPIO pin carrying the microphone serial data.
    pub data_pin: u8,
    /// GPIO pin carrying the generated bit clock. Word select is driven on
    /// `clock_pin + 1`.
    pub clock_pin: u8,
    /// Target sample frequency in Hz.
    pub sample_frequency: u32,
    /// Number of 32-bit words per capture buffer.
    pub samples_per_buffer: usize,
}

impl Config {
    /// Create a configuration with the default sample frequency and buffer
    /// size.
    pub const fn new(unit: u8, data_pin: u8, clock_pin: u8) -> Self {
        Config {
            unit,
            data_pin,
            clock_pin,
            sample_frequency: DEFAULT_SAMPLE_FREQUENCY,
            samples_per_buffer: DEFAULT_BUFFER_WORDS,
        }
    }

    /// Set the target sample frequency in Hz.
    pub const fn with_sample_frequency(mut self, hz: u32) -> Self {
        self.sample_frequency = hz;
        self
    }

    /// Set the number of words per capture buffer.
    pub const fn with_samples_per_buffer(mut self, words: usize) -> Self {
        self.samples_per_buffer = words;
        self
    }

    /// The word-select (LRCLK) pin, always the pin above the bit clock.
    pub const fn word_select_pin(&self) -> u8 {
        self.clock_pin + 1
    }

    /// Bit-clock frequency in Hz for the configured sample frequency
    /// (two 32-bit channel slots per frame).
    pub const fn bit_clock_hz(&self) -> u32 {
        self.sample_frequency * BITS_PER_FRAME
    }
}
