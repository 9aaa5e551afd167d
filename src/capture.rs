//! Double-buffered microphone capture session.
//!
//! [`MicCapture`] owns the whole acquisition pipeline: the clocked serial
//! front-end ([`SampleSource`]), the queue-to-memory copy engine
//! ([`TransferEngine`]) and the two-buffer ping-pong arena. In the steady
//! state the CPU is not involved in the data path at all — the sequencer
//! pushes words, the engine writes them to the active buffer, and the
//! completion interrupt swaps buffers and re-arms the engine.
//!
//! ```text
//! mic ──► SampleSource ──► rx queue ──► TransferEngine ──► buffers[active]
//!                                            │
//!                              completion ───┘ on_transfer_complete():
//!                              interrupt       flip active, retarget, ack
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! // At init: build the hardware bindings, then the session.
//! let config = Config::new(0, MIC_DATA_PIN, MIC_SCK_PIN)
//!     .with_sample_frequency(24_000)
//!     .with_samples_per_buffer(2048);
//! let mic = MicCapture::init(pio_mic, mic_dma, config)?;
//! // Install the completion ISR as the *exclusive* handler for the
//! // engine's interrupt line, at maximum priority, and have it call
//! // `mic.on_transfer_complete()` and nothing else.
//!
//! mic.start()?;
//! loop {
//!     let words = mic.sample_buffer(true); // waits for the next buffer
//!     for s in sample::channel_samples(words, Channel::Left) {
//!         // copy or process; the buffer is overwritten two fills later
//!     }
//! }
//! ```
//!
//! ## Resource contract
//!
//! One session claims, exclusively: one sequencer slot, one transfer
//! engine channel, and the engine's completion interrupt line. It does
//! not coexist with other users of that interrupt line.
//!
//! ## Overrun behavior
//!
//! If the consumer does not keep up, a stable buffer is silently
//! overwritten on the second completion after it was filled — same as the
//! reference hardware behavior. Starvation is observable through
//! [`unread_completions`](MicCapture::unread_completions): any value
//! above 1 between reads means buffers were lost.

use crate::buffer::BufferPair;
use crate::config::Config;
use crate::error::Error;
use crate::hw::{SampleSource, TransferEngine};
use crate::sample::SampleWord;

/// A configured capture session. See the [module docs](self).
pub struct MicCapture<S, E> {
    source: S,
    engine: E,
    buffers: BufferPair,
    config: Config,
    running: bool,
}

impl<S: SampleSource, E: TransferEngine> MicCapture<S, E> {
    /// Allocate both capture buffers (zero-filled) and program the
    /// sequencer. Nothing runs until [`start`](Self::start) or
    /// [`record_blocking`](Self::record_blocking).
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`] if `config.samples_per_buffer` is zero.
    /// - [`Error::OutOfMemory`] if a buffer allocation fails. No partial
    ///   allocation is retained.
    pub fn init(source: S, engine: E, config: Config) -> Result<Self, Error> {
        if config.samples_per_buffer == 0 {
            return Err(Error::InvalidConfig);
        }
        let buffers = BufferPair::allocate(config.samples_per_buffer)?;
        source.configure(&config);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "mic capture: unit {=u8}, {=u32} Hz, 2x{=usize} words",
            config.unit,
            config.sample_frequency,
            config.samples_per_buffer
        );

        Ok(MicCapture {
            source,
            engine,
            buffers,
            config,
            running: false,
        })
    }

    /// Begin continuous, interrupt-driven capture into the ping-pong
    /// buffers, starting with buffer 0.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyActive`] if a session is already running.
    pub fn start(&mut self) -> Result<(), Error> {
        if self.running {
            return Err(Error::AlreadyActive);
        }

        self.buffers.reset();
        // Trigger the engine first; it is paced by the sequencer's
        // data-ready signal so nothing moves until the source is enabled.
        self.engine
            .arm(self.buffers.write_ptr(0), self.config.samples_per_buffer);
        self.source.restart();
        self.source.set_enabled(true);
        self.running = true;

        #[cfg(feature = "defmt")]
        defmt::debug!("mic capture started");
        Ok(())
    }

    /// Stop the sequencer and abort the in-flight transfer.
    ///
    /// # Errors
    ///
    /// [`Error::NotActive`] if no session is running.
    pub fn stop(&mut self) -> Result<(), Error> {
        if !self.running {
            return Err(Error::NotActive);
        }

        self.source.set_enabled(false);
        self.engine.abort();
        self.running = false;

        #[cfg(feature = "defmt")]
        defmt::debug!("mic capture stopped");
        Ok(())
    }

    /// Completion-interrupt entry point. Call this, and nothing else, from
    /// the transfer engine's completion ISR while a session is active.
    ///
    /// Swaps the active buffer (publishing the previous one as stable),
    /// retargets the engine at the new buffer, and acknowledges the
    /// interrupt. Lock-free; never allocates, blocks or writes sample
    /// data.
    pub fn on_transfer_complete(&self) {
        let next = self.buffers.flip();
        self.engine.retarget(self.buffers.write_ptr(next));
        self.engine.acknowledge();
    }

    /// Get one buffer's worth of samples.
    ///
    /// With `block == true`, spin-waits until the buffer that was filling
    /// at call time completes, then returns it — the returned buffer is
    /// guaranteed fully written and stays stable until the completion
    /// after next. Must only be used while a session is active.
    ///
    /// With `block == false`, returns the currently inactive buffer
    /// immediately. No completion guarantee: the buffer may be mid-swap
    /// and can start being overwritten at the next completion. Before the
    /// first transfer ever completes this is buffer 0 in its zeroed
    /// state.
    ///
    /// Either way the data is eventually overwritten; copy it out before
    /// the next swap. Reading consumes the unread-completion count (see
    /// [`unread_completions`](Self::unread_completions)).
    pub fn sample_buffer(&self, block: bool) -> &[SampleWord] {
        let active = self.buffers.active();
        debug_assert!(
            self.running || !block,
            "blocking read without an active session never completes"
        );

        let stable = if block {
            while self.buffers.active() == active {
                core::hint::spin_loop();
            }
            // The buffer that was filling at call time has just been
            // published as stable.
            active
        } else {
            active ^ 1
        };

        self.buffers.take_unread();
        // SAFETY: `stable` is not the engine's write target: the flip
        // publishing it as stable happens before the engine is retargeted,
        // and the Acquire load above synchronizes with that flip.
        unsafe { self.buffers.read(stable) }
    }

    /// Synchronous one-shot capture into buffer 0, reading the receive
    /// queue one word at a time. Blocks for a full buffer period.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyActive`] if an asynchronous session is running (the
    /// engine would race the per-word reads).
    pub fn record_blocking(&mut self) -> Result<&[SampleWord], Error> {
        if self.running {
            return Err(Error::AlreadyActive);
        }

        self.source.restart();
        self.source.set_enabled(true);
        let dest = self.buffers.write_ptr(0);
        for i in 0..self.config.samples_per_buffer {
            let word = self.source.read_blocking();
            // SAFETY: no transfer is armed (checked above), so buffer 0 is
            // exclusively ours to write.
            unsafe { dest.add(i).write(word) };
        }
        self.source.set_enabled(false);

        // SAFETY: as above; the sequencer is disabled again.
        Ok(unsafe { self.buffers.read(0) })
    }

    /// Whether an asynchronous session is running.
    pub fn is_active(&self) -> bool {
        self.running
    }

    /// The session configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Total transfer completions since the last [`start`](Self::start).
    pub fn completed_transfers(&self) -> u32 {
        self.buffers.completed()
    }

    /// Completions since the last [`sample_buffer`](Self::sample_buffer)
    /// call. A value above 1 means the consumer missed at least one
    /// buffer (it was silently overwritten).
    pub fn unread_completions(&self) -> u32 {
        self.buffers.unread()
    }
}
