//! Fixed-size MessagePack items: scalars and container headers.
//!
//! Every function here writes at most [`mpack_rpc_buffers::ITEM_SIZE`] bytes
//! and trusts the caller to have made room for them.

use mpack_rpc_buffers::ByteSink;

use super::constants::*;

pub fn nil<W: ByteSink + ?Sized>(w: &mut W) {
    w.u8(NIL);
}

pub fn boolean<W: ByteSink + ?Sized>(w: &mut W, b: bool) {
    w.u8(if b { TRUE } else { FALSE });
}

/// Shortest unsigned form of a 32-bit value.
pub fn uint<W: ByteSink + ?Sized>(w: &mut W, val: u32) {
    if val > 0xffff {
        w.u8u32(UINT32, val);
    } else if val > 0xff {
        w.u8u16(UINT16, val as u16);
    } else if val > POSITIVE_FIXINT_MAX as u32 {
        w.u8(UINT8);
        w.u8(val as u8);
    } else {
        w.u8(val as u8);
    }
}

/// Unsigned 64-bit value.
///
/// Values up to [`UINT64_THRESHOLD`] take the 32-bit-or-smaller path; anything
/// larger is written as a full `uint64`, even when `uint32` would fit.
pub fn uint64<W: ByteSink + ?Sized>(w: &mut W, val: u64) {
    if val > UINT64_THRESHOLD {
        w.u8u64(UINT64, val);
    } else {
        uint(w, val as u32);
    }
}

/// Signed value: non-negative ones go through [`uint64`], negative ones take
/// the smallest of negative fixint, `int8`, `int16`, `int32` and `int64`.
pub fn integer<W: ByteSink + ?Sized>(w: &mut W, val: i64) {
    if val >= 0 {
        uint64(w, val as u64);
    } else if val < -0x8000_0000 {
        w.u8(INT64);
        w.i64(val);
    } else if val < -0x8000 {
        w.u8(INT32);
        w.i32(val as i32);
    } else if val < -0x80 {
        w.u8(INT16);
        w.i16(val as i16);
    } else if val < -0x20 {
        w.u8(INT8);
        w.i8(val as i8);
    } else {
        // negative fixint: 0xe0..=0xff
        w.i8(val as i8);
    }
}

/// Always the 9-byte `float64` form.
pub fn float8<W: ByteSink + ?Sized>(w: &mut W, val: f64) {
    w.u8f64(FLOAT64, val);
}

pub fn array_header<W: ByteSink + ?Sized>(w: &mut W, len: u32) {
    if len < 0x10 {
        w.u8(FIXARRAY | len as u8);
    } else if len < 0x1_0000 {
        w.u8u16(ARRAY16, len as u16);
    } else {
        w.u8u32(ARRAY32, len);
    }
}

pub fn map_header<W: ByteSink + ?Sized>(w: &mut W, len: u32) {
    if len < 0x10 {
        w.u8(FIXMAP | len as u8);
    } else if len < 0x1_0000 {
        w.u8u16(MAP16, len as u16);
    } else {
        w.u8u32(MAP32, len);
    }
}
