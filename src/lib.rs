//! # pio-mic
//!
//! A `no_std` capture driver for digital I2S-style MEMS microphones on
//! microcontrollers with a programmable serial sequencer and a DMA-style
//! transfer engine (designed around the RP2040's PIO + DMA, usable with
//! any part that can implement the two hardware traits). Audio is
//! captured through a double-buffered, interrupt-driven ping-pong: one
//! buffer fills while the previous one is safe to read, with no CPU work
//! in the steady-state data path.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Session | [`capture`] | [`MicCapture`](capture::MicCapture): lifecycle, buffer handoff, completion path |
//! | Hardware | [`hw`] | [`SampleSource`](hw::SampleSource) / [`TransferEngine`](hw::TransferEngine) seams |
//! | Config | [`config`] | immutable per-session configuration |
//! | Decoding | [`sample`] | word → sample extraction, channel selection |
//! | Analysis | [`level`] | peak / RMS meters (feature `analysis`) |
//!
//! ## Quick start
//!
//! ```ignore
//! use pio_mic::capture::MicCapture;
//! use pio_mic::config::Config;
//! use pio_mic::sample::{self, Channel};
//!
//! let config = Config::new(0, MIC_DATA_PIN, MIC_SCK_PIN);
//! let mic = MicCapture::init(pio_source, dma_engine, config)?;
//! // Bind the completion ISR exclusively to `mic.on_transfer_complete()`.
//!
//! mic.start()?;
//! loop {
//!     let words = mic.sample_buffer(true);
//!     for s in sample::channel_samples(words, Channel::Left) {
//!         // ...
//!     }
//! }
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `analysis` | yes | [`level`] meters (pulls in `libm`) |
//! | `defmt` | no | `defmt::Format` on public types, lifecycle debug logs |
//!
//! ## Resource usage
//!
//! One active session claims one sequencer slot, one transfer engine
//! channel, and the engine's completion interrupt line — all exclusively.
//! Buffers are allocated once at [`init`](capture::MicCapture::init);
//! nothing allocates afterwards.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod constants;

pub mod config;
pub mod error;
pub mod hw;
pub mod sample;

mod buffer;
pub mod capture;

#[cfg(feature = "analysis")]
pub mod level;
