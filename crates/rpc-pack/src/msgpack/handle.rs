//! Remote object handles as MessagePack extensions.

use mpack_rpc_buffers::{ByteSink, Cursor, Flush, Packer, ITEM_SIZE};

use super::constants::{EXT8, FIXEXT1};
use super::scalar;
use crate::value::HandleKind;

/// Smallest id that still takes the one-byte fast path. Negative ids in
/// this range are sentinels for "no object".
pub const MIN_INLINE_HANDLE: i64 = -0x1f;
pub const MAX_INLINE_HANDLE: i64 = 0x7f;

/// Packs handle `id` of `kind`.
///
/// Ids in `-0x1f..=0x7f` become a fixext1 whose payload is the id as a
/// signed byte. Larger ids are packed as the shortest MessagePack unsigned
/// integer inside an `ext8`; only ids past `u32::MAX` take the `uint64`
/// form. The fixext4/fixext8 forms are never used for them:
/// peers expect the `ext8` layout, so it has to stay even where a fixed form
/// would be shorter.
///
/// # Panics
///
/// Panics on ids below `-0x1f`.
pub fn handle<F: Flush>(packer: &mut Packer<F>, kind: HandleKind, id: i64) {
    let ext_type = kind.ext_type();
    if (MIN_INLINE_HANDLE..=MAX_INLINE_HANDLE).contains(&id) {
        packer.u8(FIXEXT1);
        packer.i8(ext_type);
        packer.i8(id as i8);
    } else {
        assert!(id >= 0, "{kind:?} handle {id} is negative and not a sentinel");
        let mut scratch = [0u8; ITEM_SIZE];
        let mut cursor = Cursor::new(&mut scratch);
        match u32::try_from(id) {
            Ok(id) => scalar::uint(&mut cursor, id),
            Err(_) => scalar::uint64(&mut cursor, id as u64),
        }
        packer.u8(EXT8);
        packer.u8(cursor.position() as u8);
        packer.i8(ext_type);
        packer.bytes(cursor.written());
    }
}
