//! The two-buffer capture arena.
//!
//! Exactly two fixed-length word buffers exist per session, allocated once
//! at init and never resized. At any instant one buffer is *active* (the
//! transfer engine's write target, contents partial) and the other is
//! *stable* (fully written, safe to read). The completion path is the only
//! writer of the active index; application code only reads it.
//!
//! # Safety protocol
//!
//! `BufferPair` is shared between interrupt context and the application,
//! so it is `Sync` by hand. The justification:
//!
//! - buffer words are only written by the transfer engine (through the
//!   raw pointer handed out by [`write_ptr`](BufferPair::write_ptr)) or,
//!   for blocking one-shot capture, by the session while no engine is
//!   armed — never by two parties at once;
//! - which buffer is the write target is decided solely by the completion
//!   path, published through `active` with `Release` and observed with
//!   `Acquire`, so a reader that saw the index change also sees every
//!   word the engine wrote to the now-stable buffer.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use crate::error::Error;
use crate::sample::SampleWord;

pub(crate) struct BufferPair {
    /// Heap storage so buffer addresses stay stable while the session
    /// moves.
    storage: [Box<[UnsafeCell<SampleWord>]>; 2],
    /// Index of the buffer currently being written. Written only by
    /// [`flip`](Self::flip) (and the lifecycle reset).
    active: AtomicUsize,
    /// Total completions since the last `reset`.
    completed: AtomicU32,
    /// Completions not yet observed through `take_unread`.
    unread: AtomicU32,
}

// SAFETY: see the module-level safety protocol. All shared mutation goes
// through atomics or through the single-writer buffer discipline.
unsafe impl Sync for BufferPair {}

impl BufferPair {
    /// Allocate both buffers, zero-filled.
    ///
    /// Fails with [`Error::OutOfMemory`] if either allocation fails; a
    /// first buffer allocated before a failing second one is dropped
    /// before returning.
    ///
    /// The active index starts at 1 so the readable (inactive) buffer
    /// before the first `start` is buffer 0 in its zeroed state.
    pub(crate) fn allocate(words: usize) -> Result<Self, Error> {
        Ok(BufferPair {
            storage: [Self::allocate_one(words)?, Self::allocate_one(words)?],
            active: AtomicUsize::new(1),
            completed: AtomicU32::new(0),
            unread: AtomicU32::new(0),
        })
    }

    fn allocate_one(words: usize) -> Result<Box<[UnsafeCell<SampleWord>]>, Error> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(words).map_err(|_| Error::OutOfMemory)?;
        for _ in 0..words {
            buf.push(UnsafeCell::new(0));
        }
        Ok(buf.into_boxed_slice())
    }

    /// Index of the buffer currently being written.
    pub(crate) fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Reset to the start-of-session state: buffer 0 active, counters
    /// cleared. Must not be called while a transfer is in flight.
    pub(crate) fn reset(&self) {
        self.completed.store(0, Ordering::Relaxed);
        self.unread.store(0, Ordering::Relaxed);
        self.active.store(0, Ordering::Release);
    }

    /// Completion-path state transition: make the other buffer active and
    /// count the completion. Returns the new active index.
    ///
    /// Interrupt context; lock-free, no allocation.
    pub(crate) fn flip(&self) -> usize {
        let next = self.active.load(Ordering::Relaxed) ^ 1;
        self.completed.fetch_add(1, Ordering::Relaxed);
        self.unread.fetch_add(1, Ordering::Relaxed);
        // The previous buffer becomes readable at this store.
        self.active.store(next, Ordering::Release);
        next
    }

    /// Total completions since the last `reset`.
    pub(crate) fn completed(&self) -> u32 {
        self.completed.load(Ordering::Relaxed)
    }

    /// Completions since the last `take_unread` call, without resetting.
    pub(crate) fn unread(&self) -> u32 {
        self.unread.load(Ordering::Relaxed)
    }

    /// Consume the unread-completion count.
    pub(crate) fn take_unread(&self) -> u32 {
        self.unread.swap(0, Ordering::Relaxed)
    }

    /// Raw write pointer to a buffer, for arming the transfer engine.
    pub(crate) fn write_ptr(&self, index: usize) -> *mut SampleWord {
        // UnsafeCell<SampleWord> is repr(transparent) over SampleWord.
        self.storage[index].as_ptr() as *mut SampleWord
    }

    /// Read a buffer's contents.
    ///
    /// # Safety
    ///
    /// The caller must ensure `index` is not the transfer engine's write
    /// target for the lifetime of the returned slice (the ping-pong
    /// protocol: read only the stable buffer).
    pub(crate) unsafe fn read(&self, index: usize) -> &[SampleWord] {
        let buf = &self.storage[index];
        unsafe { core::slice::from_raw_parts(buf.as_ptr() as *const SampleWord, buf.len()) }
    }
}
