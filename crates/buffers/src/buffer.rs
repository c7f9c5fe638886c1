//! Size-limited output buffer with a flush callback.

use crate::writer::ByteSink;

/// Widest encoding of any single non-blob item: one tag byte plus an 8-byte
/// payload.
pub const ITEM_SIZE: usize = 9;

/// Headroom every buffer must offer before a new item is started.
pub const MIN_CAPACITY: usize = 2 * ITEM_SIZE;

/// Contiguous output region with a write cursor.
///
/// The region spans `0..capacity()`; bytes `0..len()` have been written and
/// not yet flushed. Positions are plain offsets, so replacing the storage
/// (see [`PackerBuffer::grow`]) never leaves a stale cursor behind.
#[derive(Debug, Clone)]
pub struct PackerBuffer {
    uint8: Vec<u8>,
    x: usize,
}

impl PackerBuffer {
    /// Creates an empty buffer of `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is below [`MIN_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity >= MIN_CAPACITY,
            "packer buffer capacity {capacity} is below the minimum of {MIN_CAPACITY}"
        );
        Self {
            uint8: vec![0u8; capacity],
            x: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.uint8.len()
    }

    /// Number of written, unflushed bytes.
    pub fn len(&self) -> usize {
        self.x
    }

    pub fn is_empty(&self) -> bool {
        self.x == 0
    }

    /// Bytes left between the cursor and the end of the region.
    pub fn remaining(&self) -> usize {
        self.uint8.len() - self.x
    }

    /// The written, unflushed bytes.
    pub fn written(&self) -> &[u8] {
        &self.uint8[..self.x]
    }

    /// Moves the cursor back to the start, discarding the written bytes.
    pub fn reset(&mut self) {
        self.x = 0;
    }

    /// Resizes the region to `new_capacity`, keeping the written bytes.
    ///
    /// # Panics
    ///
    /// Panics if `new_capacity` would cut into the written bytes.
    pub fn grow(&mut self, new_capacity: usize) {
        assert!(
            new_capacity >= self.x,
            "cannot shrink packer buffer below its {} written bytes",
            self.x
        );
        self.uint8.resize(new_capacity, 0);
    }

    /// Consumes the buffer, handing back its allocation cut to the written
    /// range.
    pub fn into_written(mut self) -> Vec<u8> {
        self.uint8.truncate(self.x);
        self.uint8
    }
}

impl ByteSink for PackerBuffer {
    #[inline]
    fn u8(&mut self, val: u8) {
        self.uint8[self.x] = val;
        self.x += 1;
    }

    #[inline]
    fn bytes(&mut self, buf: &[u8]) {
        let length = buf.len();
        self.uint8[self.x..self.x + length].copy_from_slice(buf);
        self.x += length;
    }
}

/// Callback invoked when a [`Packer`] runs low on room.
///
/// An implementation must leave the buffer with at least [`MIN_CAPACITY`]
/// bytes remaining, either by handing off and resetting the written bytes
/// or by growing the region. Any `FnMut(&mut PackerBuffer)` closure is a
/// flusher.
pub trait Flush {
    fn flush(&mut self, buffer: &mut PackerBuffer);
}

impl<T> Flush for T
where
    T: FnMut(&mut PackerBuffer),
{
    fn flush(&mut self, buffer: &mut PackerBuffer) {
        self(buffer)
    }
}

/// A [`PackerBuffer`] paired with the flusher that drains it.
///
/// # Example
///
/// ```
/// use mpack_rpc_buffers::{Packer, PackerBuffer};
///
/// let mut sent = Vec::new();
/// let mut packer = Packer::new(32, |buf: &mut PackerBuffer| {
///     sent.extend_from_slice(buf.written());
///     buf.reset();
/// });
/// packer.raw(&[7u8; 100]);
/// packer.flush();
/// drop(packer);
/// assert_eq!(sent, vec![7u8; 100]);
/// ```
pub struct Packer<F> {
    buffer: PackerBuffer,
    flusher: F,
}

impl<F: Flush> Packer<F> {
    /// Creates a packer over a fresh buffer of `capacity` bytes.
    pub fn new(capacity: usize, flusher: F) -> Self {
        Self::from_buffer(PackerBuffer::with_capacity(capacity), flusher)
    }

    pub fn from_buffer(buffer: PackerBuffer, flusher: F) -> Self {
        Self { buffer, flusher }
    }

    pub fn buffer(&self) -> &PackerBuffer {
        &self.buffer
    }

    pub fn flusher(&self) -> &F {
        &self.flusher
    }

    pub fn flusher_mut(&mut self) -> &mut F {
        &mut self.flusher
    }

    pub fn into_parts(self) -> (PackerBuffer, F) {
        (self.buffer, self.flusher)
    }

    pub fn remaining(&self) -> usize {
        self.buffer.remaining()
    }

    /// Hands the buffer to the flusher.
    ///
    /// # Panics
    ///
    /// Panics if the flusher leaves less than [`MIN_CAPACITY`] bytes of room.
    pub fn flush(&mut self) {
        tracing::trace!(
            written = self.buffer.len(),
            capacity = self.buffer.capacity(),
            "flushing packer buffer"
        );
        self.flusher.flush(&mut self.buffer);
        assert!(
            self.buffer.remaining() >= MIN_CAPACITY,
            "flush left {} bytes of room, at least {MIN_CAPACITY} are required",
            self.buffer.remaining()
        );
    }

    /// Flushes unless at least [`MIN_CAPACITY`] bytes remain.
    ///
    /// Every fixed-size write relies on this having run first.
    #[inline]
    pub fn check_buffer(&mut self) {
        if self.buffer.remaining() < MIN_CAPACITY {
            self.flush();
        }
    }

    /// Copies `data` into the buffer, flushing whenever it fills up.
    ///
    /// Bytes are copied in order in chunks of at most the remaining room.
    /// The buffer is left with [`MIN_CAPACITY`] bytes of headroom, also for
    /// an empty `data`.
    pub fn raw(&mut self, data: &[u8]) {
        let len = data.len();
        let mut pos = 0;
        while pos < len {
            let to_copy = (len - pos).min(self.buffer.remaining());
            self.buffer.bytes(&data[pos..pos + to_copy]);
            pos += to_copy;

            if pos < len {
                self.flush();
            }
        }
        self.check_buffer();
    }
}

impl<F> ByteSink for Packer<F> {
    #[inline]
    fn u8(&mut self, val: u8) {
        self.buffer.u8(val);
    }

    #[inline]
    fn bytes(&mut self, buf: &[u8]) {
        self.buffer.bytes(buf);
    }
}
