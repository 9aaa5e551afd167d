//! Hardware seams for the capture pipeline.
//!
//! The acquisition core never touches registers directly. It drives two
//! traits that map one-to-one onto the peripherals of a PIO/DMA capture
//! setup:
//!
//! - [`SampleSource`] — the programmable sequencer generating the bit
//!   clock and word select and shifting serial data into a receive queue
//!   (a PIO state machine on RP2040-class parts).
//! - [`TransferEngine`] — the autonomous engine copying words from that
//!   receive queue into memory and raising a completion interrupt after a
//!   fixed word count (a DMA channel).
//!
//! All methods take `&self`: implementations are register writes or
//! atomics, so the completion path can run in interrupt context while the
//! application holds the same session by reference.
//!
//! ## Implementing for real hardware
//!
//! ```ignore
//! struct PioMic { pio: PIO, sm: u8 }
//!
//! impl SampleSource for PioMic {
//!     fn configure(&self, config: &Config) {
//!         // load the capture program, claim a state machine, set the
//!         // data/clock/word-select pins, derive the clock divider from
//!         // config.bit_clock_hz()
//!     }
//!     fn restart(&self) {
//!         // drain the RX FIFO and reset the state machine
//!     }
//!     fn set_enabled(&self, enabled: bool) {
//!         // state-machine enable bit
//!     }
//!     fn read_blocking(&self) -> SampleWord {
//!         // busy-wait pull from the RX FIFO
//!     }
//! }
//!
//! struct MicDma { channel: u8 }
//!
//! impl TransferEngine for MicDma {
//!     fn arm(&self, dest: *mut SampleWord, words: usize) {
//!         // 32-bit transfers, fixed read address (the RX FIFO),
//!         // incrementing write address, paced by the sequencer's
//!         // data-ready signal; then trigger
//!     }
//!     fn retarget(&self, dest: *mut SampleWord) {
//!         // write-address-with-retrigger register alias
//!     }
//!     fn abort(&self) { /* channel abort */ }
//!     fn acknowledge(&self) { /* clear this channel's interrupt flag */ }
//! }
//! ```

use crate::config::Config;
use crate::sample::SampleWord;

/// The clocked serial front-end feeding the capture pipeline.
pub trait SampleSource {
    /// Program the sequencer with the session's pins and sample frequency.
    /// Called once from `init`.
    fn configure(&self, config: &Config);

    /// Drain the receive queue and reset the sequencer to the start of its
    /// program. Does not change the enabled state.
    fn restart(&self);

    /// Enable or disable the sequencer. While disabled no words are
    /// produced and the clock lines are idle.
    fn set_enabled(&self, enabled: bool);

    /// Busy-wait for the next word from the receive queue and pop it.
    /// Only meaningful while no transfer engine is draining the queue.
    fn read_blocking(&self) -> SampleWord;
}

/// The autonomous queue-to-memory copy engine.
///
/// A transfer writes exactly the armed word count, one word per
/// data-ready signal from the source, then raises the completion
/// interrupt. [`retarget`](TransferEngine::retarget) reuses the armed
/// word count, so a retargeted transfer is the same length as the armed
/// one.
pub trait TransferEngine {
    /// Fully configure the engine to write `words` words starting at
    /// `dest`, then trigger it. The transfer is paced by the source, so
    /// triggering before the source is enabled is safe.
    fn arm(&self, dest: *mut SampleWord, words: usize);

    /// Point the engine's write address at `dest` and retrigger it for
    /// another armed-length transfer. This is the interrupt-context path
    /// and must be a single cheap operation.
    fn retarget(&self, dest: *mut SampleWord);

    /// Abort the in-flight transfer.
    fn abort(&self);

    /// Acknowledge the completion event so the interrupt does not
    /// re-fire. Interrupt-context path.
    fn acknowledge(&self);
}

#[cfg(test)]
pub(crate) mod mock {
    //! Software stand-ins for the sequencer and the transfer engine.
    //!
    //! Both mocks share their state behind an `Arc` so a test can keep a
    //! handle while the capture session owns the other, mirroring how the
    //! real peripherals are visible both to the driver and to the test
    //! bench.

    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use core::ptr;
    use core::sync::atomic::{AtomicBool, AtomicPtr, AtomicUsize, Ordering};

    use super::{Config, SampleSource, SampleWord, TransferEngine};

    #[derive(Default)]
    struct SourceState {
        script: Vec<SampleWord>,
        next_word: AtomicUsize,
        configures: AtomicUsize,
        restarts: AtomicUsize,
        enabled: AtomicBool,
        enables: AtomicUsize,
        disables: AtomicUsize,
    }

    /// Scripted sequencer: `read_blocking` replays a fixed word stream.
    #[derive(Clone)]
    pub(crate) struct MockSource {
        state: Arc<SourceState>,
    }

    impl MockSource {
        pub(crate) fn new() -> Self {
            Self::scripted(Vec::new())
        }

        /// A source whose receive queue yields `script` in order, then
        /// zeros.
        pub(crate) fn scripted(script: Vec<SampleWord>) -> Self {
            MockSource {
                state: Arc::new(SourceState {
                    script,
                    ..SourceState::default()
                }),
            }
        }

        pub(crate) fn configures(&self) -> usize {
            self.state.configures.load(Ordering::Relaxed)
        }

        pub(crate) fn restarts(&self) -> usize {
            self.state.restarts.load(Ordering::Relaxed)
        }

        pub(crate) fn is_enabled(&self) -> bool {
            self.state.enabled.load(Ordering::Relaxed)
        }

        pub(crate) fn enables(&self) -> usize {
            self.state.enables.load(Ordering::Relaxed)
        }

        pub(crate) fn disables(&self) -> usize {
            self.state.disables.load(Ordering::Relaxed)
        }

        pub(crate) fn words_read(&self) -> usize {
            self.state.next_word.load(Ordering::Relaxed)
        }
    }

    impl SampleSource for MockSource {
        fn configure(&self, _config: &Config) {
            self.state.configures.fetch_add(1, Ordering::Relaxed);
        }

        fn restart(&self) {
            self.state.restarts.fetch_add(1, Ordering::Relaxed);
        }

        fn set_enabled(&self, enabled: bool) {
            self.state.enabled.store(enabled, Ordering::Relaxed);
            if enabled {
                self.state.enables.fetch_add(1, Ordering::Relaxed);
            } else {
                self.state.disables.fetch_add(1, Ordering::Relaxed);
            }
        }

        fn read_blocking(&self) -> SampleWord {
            let i = self.state.next_word.fetch_add(1, Ordering::Relaxed);
            self.state.script.get(i).copied().unwrap_or(0)
        }
    }

    struct EngineState {
        target: AtomicPtr<SampleWord>,
        armed_words: AtomicUsize,
        arms: AtomicUsize,
        retargets: AtomicUsize,
        aborts: AtomicUsize,
        acks: AtomicUsize,
    }

    /// Recording transfer engine: tests "complete" a transfer by writing
    /// a known word pattern through the current target pointer with
    /// [`fill`](MockEngine::fill), then invoking the session's completion
    /// path.
    #[derive(Clone)]
    pub(crate) struct MockEngine {
        state: Arc<EngineState>,
    }

    impl MockEngine {
        pub(crate) fn new() -> Self {
            MockEngine {
                state: Arc::new(EngineState {
                    target: AtomicPtr::new(ptr::null_mut()),
                    armed_words: AtomicUsize::new(0),
                    arms: AtomicUsize::new(0),
                    retargets: AtomicUsize::new(0),
                    aborts: AtomicUsize::new(0),
                    acks: AtomicUsize::new(0),
                }),
            }
        }

        /// Simulate the engine finishing a transfer: write `words` through
        /// the currently armed target.
        ///
        /// # Panics
        ///
        /// Panics if the engine is not armed or `words` exceeds the armed
        /// transfer length.
        pub(crate) fn fill(&self, words: &[SampleWord]) {
            let dest = self.state.target.load(Ordering::Acquire);
            assert!(!dest.is_null(), "transfer engine is not armed");
            assert!(
                words.len() <= self.state.armed_words.load(Ordering::Relaxed),
                "write exceeds armed transfer length"
            );
            for (i, &word) in words.iter().enumerate() {
                // SAFETY: the capture session armed `dest` at one of its
                // buffers and guarantees it holds at least `armed_words`
                // words; the ping-pong protocol makes this buffer ours to
                // write until the completion path retargets us.
                unsafe { dest.add(i).write_volatile(word) };
            }
        }

        pub(crate) fn armed_words(&self) -> usize {
            self.state.armed_words.load(Ordering::Relaxed)
        }

        pub(crate) fn target(&self) -> *mut SampleWord {
            self.state.target.load(Ordering::Acquire)
        }

        pub(crate) fn arms(&self) -> usize {
            self.state.arms.load(Ordering::Relaxed)
        }

        pub(crate) fn retargets(&self) -> usize {
            self.state.retargets.load(Ordering::Relaxed)
        }

        pub(crate) fn aborts(&self) -> usize {
            self.state.aborts.load(Ordering::Relaxed)
        }

        pub(crate) fn acks(&self) -> usize {
            self.state.acks.load(Ordering::Relaxed)
        }
    }

    impl TransferEngine for MockEngine {
        fn arm(&self, dest: *mut SampleWord, words: usize) {
            self.state.armed_words.store(words, Ordering::Relaxed);
            self.state.target.store(dest, Ordering::Release);
            self.state.arms.fetch_add(1, Ordering::Relaxed);
        }

        fn retarget(&self, dest: *mut SampleWord) {
            self.state.target.store(dest, Ordering::Release);
            self.state.retargets.fetch_add(1, Ordering::Relaxed);
        }

        fn abort(&self) {
            self.state.target.store(ptr::null_mut(), Ordering::Release);
            self.state.aborts.fetch_add(1, Ordering::Relaxed);
        }

        fn acknowledge(&self) {
            self.state.acks.fetch_add(1, Ordering::Relaxed);
        }
    }
}
