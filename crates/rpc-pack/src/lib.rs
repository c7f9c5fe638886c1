//! Streaming MessagePack packer for RPC values.
//!
//! [`msgpack::pack_object`] walks a [`Value`] tree without recursion and
//! writes it into a [`mpack_rpc_buffers::Packer`], flushing whenever the
//! buffer runs low. Remote object handles become MessagePack extensions
//! (see [`msgpack::handle`]); callback references are consumed and packed
//! as nil.
//!
//! Packing never fails. Contract violations, such as blobs of 4 GiB or more
//! or negative non-sentinel handles, panic. Those panics are meant to end
//! the process: the workspace release profile sets `panic = "abort"`, and
//! binaries embedding the packer should do the same so that no
//! `catch_unwind` can resume after a half-written message.

mod config;
mod value;

pub mod msgpack;

pub use config::{ConfigError, PackerConfig};
pub use value::{CallbackRef, HandleKind, ObjectType, Value, EXT_OBJECT_TYPE_SHIFT};
