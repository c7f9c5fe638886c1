//! MessagePack packer for RPC values.

pub mod blob;
pub mod constants;
pub mod handle;
pub mod scalar;
pub mod traversal;
pub mod util;

pub use blob::{binary, ext, string};
pub use handle::handle;
pub use traversal::{pack_array, pack_object};
pub use util::{encode, encode_array};
