//! Output buffers for the streaming MessagePack packer.
//!
//! A [`Packer`] owns a size-limited [`PackerBuffer`] and a [`Flush`]
//! callback. Encoders write through [`ByteSink`] after
//! [`Packer::check_buffer`] has guaranteed [`MIN_CAPACITY`] bytes of room;
//! payloads of arbitrary length go through [`Packer::raw`], which flushes
//! mid-copy as needed.
//!
//! Two flushers ship with the crate: [`Grow`], which keeps everything in
//! memory, and [`WriteFlush`], which streams into an [`std::io::Write`].

mod buffer;
mod error;
mod string_buffer;
mod transport;
mod writer;

pub use buffer::{Flush, Packer, PackerBuffer, ITEM_SIZE, MIN_CAPACITY};
pub use error::BufferError;
pub use string_buffer::{Grow, STRING_BUFFER_INITIAL_CAPACITY};
pub use transport::WriteFlush;
pub use writer::{ByteSink, Cursor};
