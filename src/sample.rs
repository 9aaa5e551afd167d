//! Sample word decoding and channel extraction.
//!
//! The sequencer pushes one 32-bit word per channel slot. Bits [15..31]
//! of each word hold the signed 16-bit sample; consecutive words alternate
//! channels (left first). Extracting one channel therefore takes every
//! other word at half the word rate.

use crate::constants::SAMPLE_SHIFT;

/// One 32-bit unit as pushed by the sequencer's receive queue.
pub type SampleWord = u32;

/// Stereo channel selector.
///
/// Selects the word parity within a capture buffer: left samples occupy
/// even indices, right samples odd indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Left,
    Right,
}

impl Channel {
    /// Index of the first word belonging to this channel.
    pub const fn first_word(self) -> usize {
        match self {
            Channel::Left => 0,
            Channel::Right => 1,
        }
    }
}

/// Decode the signed 16-bit sample from a captured word.
pub fn decode(word: SampleWord) -> i16 {
    ((word >> SAMPLE_SHIFT) & 0xffff) as u16 as i16
}

/// Iterate over the decoded samples of one channel.
///
/// Yields `words.len() / 2` samples (one per stereo frame; an odd trailing
/// word contributes a left sample only).
pub fn channel_samples(
    words: &[SampleWord],
    channel: Channel,
) -> impl Iterator<Item = i16> + '_ {
    words
        .iter()
        .skip(channel.first_word())
        .step_by(2)
        .map(|&w| decode(w))
}

/// Decode one channel into a caller-provided slice.
///
/// # Panics
///
/// Debug-asserts that `out` holds one sample per stereo frame.
pub fn extract_channel(words: &[SampleWord], channel: Channel, out: &mut [i16]) {
    debug_assert_eq!(out.len(), words.len() / 2);

    for (dst, sample) in out.iter_mut().zip(channel_samples(words, channel)) {
        *dst = sample;
    }
}
