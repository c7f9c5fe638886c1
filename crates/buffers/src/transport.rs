//! Flusher that ships filled buffers to an [`io::Write`] transport.

use std::io::{self, Write};

use crate::buffer::{Flush, Packer, PackerBuffer};
use crate::error::BufferError;

/// Writes every flushed range to `W` and resets the buffer.
///
/// A flush cannot fail, so the first transport error is kept and every
/// later flush discards its bytes. [`Packer::finish`] reports the error.
#[derive(Debug)]
pub struct WriteFlush<W> {
    writer: W,
    error: Option<io::Error>,
    sent: u64,
}

impl<W: Write> WriteFlush<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
            sent: 0,
        }
    }

    /// Bytes handed to the transport so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

impl<W: Write> Flush for WriteFlush<W> {
    fn flush(&mut self, buffer: &mut PackerBuffer) {
        if self.error.is_none() {
            match self.writer.write_all(buffer.written()) {
                Ok(()) => self.sent += buffer.len() as u64,
                Err(err) => {
                    tracing::warn!(%err, "transport write failed, dropping packed output");
                    self.error = Some(err);
                }
            }
        }
        buffer.reset();
    }
}

impl<W: Write> Packer<WriteFlush<W>> {
    /// Creates a packer that streams into `writer` through a buffer of
    /// `capacity` bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use mpack_rpc_buffers::Packer;
    ///
    /// let mut packer = Packer::to_writer(Vec::new(), 32);
    /// packer.raw(&[1u8; 100]);
    /// let out = packer.finish().unwrap();
    /// assert_eq!(out, vec![1u8; 100]);
    /// ```
    pub fn to_writer(writer: W, capacity: usize) -> Self {
        Packer::new(capacity, WriteFlush::new(writer))
    }

    /// Sends the tail of the buffer, flushes the transport and returns it.
    pub fn finish(self) -> Result<W, BufferError> {
        let (mut buffer, mut flusher) = self.into_parts();
        flusher.flush(&mut buffer);
        if let Some(err) = flusher.error.take() {
            return Err(err.into());
        }
        flusher.writer.flush()?;
        Ok(flusher.writer)
    }
}
