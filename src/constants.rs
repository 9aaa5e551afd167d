/// Default sample frequency in Hz. MEMS microphone sensitivity is usable up
/// to roughly 10 kHz, so the default samples at about twice that.
pub const DEFAULT_SAMPLE_FREQUENCY: u32 = 24_000;

/// Default number of 32-bit words per capture buffer.
pub const DEFAULT_BUFFER_WORDS: usize = 2048;

/// Bit position of the 16-bit sample window within a captured word.
/// The sequencer shifts serial data in so that bits [15..31] of each
/// pushed word hold the signed sample.
pub const SAMPLE_SHIFT: u32 = 15;

/// Bit-clock cycles per stereo frame: two 32-bit channel slots.
pub const BITS_PER_FRAME: u32 = 64;
