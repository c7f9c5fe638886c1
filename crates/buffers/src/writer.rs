//! Fixed-width big-endian byte emitters.

/// Destination for fixed-width big-endian writes.
///
/// Implementors provide [`ByteSink::u8`] and [`ByteSink::bytes`]; every wider
/// writer is expressed through `bytes`. Writers never reserve room: the only
/// check is slice indexing, so running past the end is a panic and callers
/// are expected to have made room beforehand.
///
/// # Example
///
/// ```
/// use mpack_rpc_buffers::{ByteSink, Cursor};
///
/// let mut scratch = [0u8; 4];
/// let mut cursor = Cursor::new(&mut scratch);
/// cursor.u8(0x01);
/// cursor.u16(0x0203);
/// assert_eq!(cursor.written(), [0x01, 0x02, 0x03]);
/// ```
pub trait ByteSink {
    /// Writes an unsigned 8-bit integer.
    fn u8(&mut self, val: u8);

    /// Writes a byte slice verbatim.
    fn bytes(&mut self, buf: &[u8]);

    /// Writes a signed 8-bit integer.
    #[inline]
    fn i8(&mut self, val: i8) {
        self.u8(val as u8);
    }

    /// Writes an unsigned 16-bit integer (big-endian).
    #[inline]
    fn u16(&mut self, val: u16) {
        self.bytes(&val.to_be_bytes());
    }

    /// Writes an unsigned 32-bit integer (big-endian).
    #[inline]
    fn u32(&mut self, val: u32) {
        self.bytes(&val.to_be_bytes());
    }

    /// Writes an unsigned 64-bit integer (big-endian).
    #[inline]
    fn u64(&mut self, val: u64) {
        self.bytes(&val.to_be_bytes());
    }

    /// Writes a signed 16-bit integer (big-endian).
    #[inline]
    fn i16(&mut self, val: i16) {
        self.bytes(&val.to_be_bytes());
    }

    /// Writes a signed 32-bit integer (big-endian).
    #[inline]
    fn i32(&mut self, val: i32) {
        self.bytes(&val.to_be_bytes());
    }

    /// Writes a signed 64-bit integer (big-endian).
    #[inline]
    fn i64(&mut self, val: i64) {
        self.bytes(&val.to_be_bytes());
    }

    /// Writes a 64-bit floating point number (big-endian).
    #[inline]
    fn f64(&mut self, val: f64) {
        self.bytes(&val.to_be_bytes());
    }

    /// Writes a u8 followed by a u16 (big-endian).
    fn u8u16(&mut self, u8_val: u8, u16_val: u16) {
        self.u8(u8_val);
        self.u16(u16_val);
    }

    /// Writes a u8 followed by a u32 (big-endian).
    fn u8u32(&mut self, u8_val: u8, u32_val: u32) {
        self.u8(u8_val);
        self.u32(u32_val);
    }

    /// Writes a u8 followed by a u64 (big-endian).
    fn u8u64(&mut self, u8_val: u8, u64_val: u64) {
        self.u8(u8_val);
        self.u64(u64_val);
    }

    /// Writes a u8 followed by a f64 (big-endian).
    fn u8f64(&mut self, u8_val: u8, f64_val: f64) {
        self.u8(u8_val);
        self.f64(f64_val);
    }
}

/// Write cursor over a caller-owned, fixed-size slice.
///
/// Used for small scratch areas where a value has to be encoded before its
/// encoded width is known.
pub struct Cursor<'a> {
    uint8: &'a mut [u8],
    x: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(uint8: &'a mut [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.x
    }

    /// The bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.uint8[..self.x]
    }
}

impl ByteSink for Cursor<'_> {
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
