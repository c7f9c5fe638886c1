//! Length-prefixed items: strings, binaries and extensions.
//!
//! The tag and length go in directly, the payload through [`Packer::raw`],
//! so a blob may be split across any number of flushes.
//!
//! Payloads of `0xffff_ffff` bytes or more are rejected with a panic. That
//! is a hard limit of the packer, not a recoverable error: the layer building
//! the values is expected to keep blobs well below it.

use mpack_rpc_buffers::{ByteSink, Flush, Packer};

use super::constants::*;

#[cold]
#[inline(never)]
fn oversized(len: usize) -> ! {
    panic!("cannot pack a {len}-byte payload: MessagePack lengths stop below {MAX_BLOB_LEN}")
}

/// String header with the shortest of fixstr, `str8`, `str16` and `str32`.
///
/// fixstr is only used below 20 bytes, and each wider form takes over one
/// byte before its length field would overflow.
pub fn string_header<W: ByteSink + ?Sized>(w: &mut W, len: usize) {
    if len < 20 {
        w.u8(FIXSTR | len as u8);
    } else if len < 0xff {
        w.u8(STR8);
        w.u8(len as u8);
    } else if len < 0xffff {
        w.u8u16(STR16, len as u16);
    } else if len < MAX_BLOB_LEN {
        w.u8u32(STR32, len as u32);
    } else {
        oversized(len);
    }
}

/// Binary header with the shortest of `bin8`, `bin16` and `bin32`.
pub fn binary_header<W: ByteSink + ?Sized>(w: &mut W, len: usize) {
    if len < 0xff {
        w.u8(BIN8);
        w.u8(len as u8);
    } else if len < 0xffff {
        w.u8u16(BIN16, len as u16);
    } else if len < MAX_BLOB_LEN {
        w.u8u32(BIN32, len as u32);
    } else {
        oversized(len);
    }
}

/// Extension header for a `len`-byte payload of type `ext_type`.
///
/// One- and two-byte payloads use fixext1/fixext2; everything else takes
/// `ext8`, `ext16` or `ext32`.
pub fn ext_header<W: ByteSink + ?Sized>(w: &mut W, ext_type: i8, len: usize) {
    if len == 1 {
        w.u8(FIXEXT1);
    } else if len == 2 {
        w.u8(FIXEXT2);
    } else if len <= 0xff {
        w.u8(EXT8);
        w.u8(len as u8);
    } else if len < 0xffff {
        w.u8u16(EXT16, len as u16);
    } else if len < MAX_BLOB_LEN {
        w.u8u32(EXT32, len as u32);
    } else {
        oversized(len);
    }
    w.i8(ext_type);
}

pub fn string<F: Flush>(packer: &mut Packer<F>, data: &[u8]) {
    string_header(packer, data.len());
    packer.raw(data);
}

pub fn binary<F: Flush>(packer: &mut Packer<F>, data: &[u8]) {
    binary_header(packer, data.len());
    packer.raw(data);
}

pub fn ext<F: Flush>(packer: &mut Packer<F>, ext_type: i8, data: &[u8]) {
    ext_header(packer, ext_type, data.len());
    packer.raw(data);
}
