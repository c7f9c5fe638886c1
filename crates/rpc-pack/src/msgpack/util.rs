//! Convenience helpers packing into a fresh in-memory buffer.

use mpack_rpc_buffers::Packer;

use super::{pack_array, pack_object};
use crate::Value;

/// Packs `value` and returns the bytes.
pub fn encode(value: &mut Value) -> Vec<u8> {
    let mut packer = Packer::string_buffer();
    pack_object(value, &mut packer);
    packer.take_bytes()
}

/// Packs `items` as an array and returns the bytes.
pub fn encode_array(items: &mut [Value]) -> Vec<u8> {
    let mut packer = Packer::string_buffer();
    pack_array(items, &mut packer);
    packer.take_bytes()
}
