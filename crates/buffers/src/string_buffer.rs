//! In-memory packer whose flush grows the buffer instead of sending it.

use crate::buffer::{Flush, Packer, PackerBuffer};

/// Initial allocation of [`Packer::string_buffer`].
pub const STRING_BUFFER_INITIAL_CAPACITY: usize = 64;

/// Flusher that doubles the buffer, keeping everything written so far.
#[derive(Debug, Default, Clone, Copy)]
pub struct Grow;

impl Flush for Grow {
    fn flush(&mut self, buffer: &mut PackerBuffer) {
        let new_capacity = buffer.capacity() * 2;
        tracing::debug!(
            from = buffer.capacity(),
            to = new_capacity,
            "growing in-memory packer buffer"
        );
        buffer.grow(new_capacity);
    }
}

impl Packer<Grow> {
    /// Creates an in-memory packer with a 64-byte initial allocation.
    ///
    /// # Example
    ///
    /// ```
    /// use mpack_rpc_buffers::Packer;
    ///
    /// let mut packer = Packer::string_buffer();
    /// packer.raw(&[0xa5; 200]);
    /// assert_eq!(packer.take_bytes(), vec![0xa5; 200]);
    /// ```
    pub fn string_buffer() -> Self {
        Self::with_capacity(STRING_BUFFER_INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Packer::new(capacity, Grow)
    }

    /// Consumes the packer and returns everything written, reusing the
    /// buffer's allocation.
    pub fn take_bytes(self) -> Vec<u8> {
        let (buffer, _) = self.into_parts();
        buffer.into_written()
    }
}
