//! Display pixel buffer ownership and recovery.
//!
//! Exactly one RGB565 output buffer exists in the system.  It is allocated
//! at startup, survives across frames, and is only torn down and rebuilt by
//! [`FrameBufferManager::reallocate`] when a mid-session allocation fault is
//! being recovered.
//!
//! Allocation goes through the [`BufferAllocator`] trait so host tests can
//! inject deterministic failures; the real heap path uses
//! `Vec::try_reserve_exact` instead of aborting on OOM.

use crate::app::ports::SystemPort;
use crate::error::AllocError;
use crate::video::transform::FRAME_PIXELS;
use log::{info, warn};

/// Number of fresh-allocation attempts a single `reallocate` call makes
/// before reporting failure.
const REALLOC_ATTEMPTS: u8 = 2;

// ---------------------------------------------------------------------------
// Allocator seam
// ---------------------------------------------------------------------------

/// Fallible allocation seam for the pixel buffer.
pub trait BufferAllocator {
    /// Allocate a zeroed buffer of `len` pixels, or `None` on heap exhaustion.
    fn alloc_pixels(&mut self, len: usize) -> Option<Vec<u16>>;
}

/// Real heap allocator.
pub struct HeapAllocator;

impl BufferAllocator for HeapAllocator {
    fn alloc_pixels(&mut self, len: usize) -> Option<Vec<u16>> {
        let mut buf: Vec<u16> = Vec::new();
        buf.try_reserve_exact(len).ok()?;
        buf.resize(len, 0);
        Some(buf)
    }
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// Owns the single display pixel buffer.
///
/// Invariant: the buffer is either absent or exactly [`FRAME_PIXELS`] long.
pub struct FrameBufferManager<A: BufferAllocator = HeapAllocator> {
    buffer: Option<Vec<u16>>,
    alloc: A,
}

impl FrameBufferManager<HeapAllocator> {
    pub fn new() -> Self {
        Self::with_allocator(HeapAllocator)
    }
}

impl<A: BufferAllocator> FrameBufferManager<A> {
    /// Construct with a custom allocator (tests inject failing ones).
    pub fn with_allocator(alloc: A) -> Self {
        Self {
            buffer: None,
            alloc,
        }
    }

    /// Allocate the buffer if it is not already present.  Idempotent.
    pub fn ensure_allocated(&mut self) -> Result<(), AllocError> {
        if self.buffer.is_some() {
            return Ok(());
        }
        match self.alloc.alloc_pixels(FRAME_PIXELS) {
            Some(buf) => {
                self.buffer = Some(buf);
                Ok(())
            }
            None => Err(AllocError::OutOfMemory),
        }
    }

    /// Drop any existing buffer, wait out the heap settle delay, then
    /// allocate fresh.  Retries once; errors after the second failure.
    pub fn reallocate(
        &mut self,
        settle_ms: u32,
        sys: &mut impl SystemPort,
    ) -> Result<(), AllocError> {
        self.buffer = None;

        for attempt in 1..=REALLOC_ATTEMPTS {
            sys.delay_ms(settle_ms);
            if let Some(buf) = self.alloc.alloc_pixels(FRAME_PIXELS) {
                info!("framebuffer: reallocated on attempt {attempt}");
                self.buffer = Some(buf);
                return Ok(());
            }
            warn!("framebuffer: allocation attempt {attempt} failed");
        }
        Err(AllocError::OutOfMemory)
    }

    pub fn is_allocated(&self) -> bool {
        self.buffer.is_some()
    }

    /// Read access to the pixel buffer, if allocated.
    pub fn pixels(&self) -> Option<&[u16]> {
        self.buffer.as_deref()
    }

    /// Write access to the pixel buffer, if allocated.
    pub fn pixels_mut(&mut self) -> Option<&mut [u16]> {
        self.buffer.as_deref_mut()
    }
}
