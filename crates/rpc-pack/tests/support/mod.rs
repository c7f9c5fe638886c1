//! Minimal MessagePack reader for checking packed output.
//!
//! Understands exactly what the packer emits for a [`Value`]; binaries and
//! foreign extension types are reported as errors.

#![allow(dead_code)]

use mpack_rpc_pack::{HandleKind, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid byte at offset {0}")]
    InvalidByte(usize),
    #[error("map key at offset {0} is not a string")]
    NotStr(usize),
    #[error("unknown extension type {0}")]
    UnknownExt(i8),
    #[error("{0} trailing bytes after the value")]
    TrailingBytes(usize),
}

pub struct Decoder<'a> {
    data: &'a [u8],
    x: usize,
}

/// Decodes exactly one value spanning all of `data`.
pub fn decode(data: &[u8]) -> Result<Value, DecodeError> {
    let mut decoder = Decoder { data, x: 0 };
    let value = decoder.read_any()?;
    if decoder.x != data.len() {
        return Err(DecodeError::TrailingBytes(data.len() - decoder.x));
    }
    Ok(value)
}

impl<'a> Decoder<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.x + n > self.data.len() {
            return Err(DecodeError::UnexpectedEof);
        }
        let slice = &self.data[self.x..self.x + n];
        self.x += n;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.array()?))
    }

    fn u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    fn u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_be_bytes(self.array()?))
    }

    fn str(&mut self, size: usize) -> Result<Value, DecodeError> {
        Ok(Value::String(self.take(size)?.to_vec()))
    }

    pub fn read_any(&mut self) -> Result<Value, DecodeError> {
        let at = self.x;
        let byte = self.u8()?;

        // negative fixint: 0xe0–0xff
        if byte >= 0xe0 {
            return Ok(Value::Integer(byte as i8 as i64));
        }
        // positive fixint: 0x00–0x7f
        if byte <= 0x7f {
            return Ok(Value::Integer(byte as i64));
        }
        // fixmap: 0x80–0x8f
        if (0x80..=0x8f).contains(&byte) {
            return self.read_dict(byte as usize & 0xf);
        }
        // fixarray: 0x90–0x9f
        if (0x90..=0x9f).contains(&byte) {
            return self.read_arr(byte as usize & 0xf);
        }
        // fixstr: 0xa0–0xbf
        if (0xa0..=0xbf).contains(&byte) {
            return self.str(byte as usize & 0x1f);
        }

        match byte {
            0xc0 => Ok(Value::Nil),
            0xc2 => Ok(Value::Boolean(false)),
            0xc3 => Ok(Value::Boolean(true)),
            0xc7 => {
                let n = self.u8()? as usize;
                self.read_handle(n, false)
            }
            0xcb => Ok(Value::Float(f64::from_be_bytes(self.array()?))),
            0xcc => Ok(Value::Integer(self.u8()? as i64)),
            0xcd => Ok(Value::Integer(self.u16()? as i64)),
            0xce => Ok(Value::Integer(self.u32()? as i64)),
            0xcf => Ok(Value::Integer(self.u64()? as i64)),
            0xd0 => Ok(Value::Integer(self.u8()? as i8 as i64)),
            0xd1 => Ok(Value::Integer(self.u16()? as i16 as i64)),
            0xd2 => Ok(Value::Integer(self.u32()? as i32 as i64)),
            0xd3 => Ok(Value::Integer(self.u64()? as i64)),
            0xd4 => self.read_handle(1, true),
            0xd9 => {
                let n = self.u8()? as usize;
                self.str(n)
            }
            0xda => {
                let n = self.u16()? as usize;
                self.str(n)
            }
            0xdb => {
                let n = self.u32()? as usize;
                self.str(n)
            }
            0xdc => {
                let n = self.u16()? as usize;
                self.read_arr(n)
            }
            0xdd => {
                let n = self.u32()? as usize;
                self.read_arr(n)
            }
            0xde => {
                let n = self.u16()? as usize;
                self.read_dict(n)
            }
            0xdf => {
                let n = self.u32()? as usize;
                self.read_dict(n)
            }
            _ => Err(DecodeError::InvalidByte(at)),
        }
    }

    fn read_arr(&mut self, size: usize) -> Result<Value, DecodeError> {
        let mut arr = Vec::with_capacity(size);
        for _ in 0..size {
            arr.push(self.read_any()?);
        }
        Ok(Value::Array(arr))
    }

    fn read_dict(&mut self, size: usize) -> Result<Value, DecodeError> {
        let mut pairs = Vec::with_capacity(size);
        for _ in 0..size {
            let at = self.x;
            let key = match self.read_any()? {
                Value::String(key) => key,
                _ => return Err(DecodeError::NotStr(at)),
            };
            pairs.push((key, self.read_any()?));
        }
        Ok(Value::Dict(pairs))
    }

    /// fixext1 handles carry the id as a signed byte, `ext8` ones as a
    /// packed unsigned integer.
    fn read_handle(&mut self, size: usize, inline: bool) -> Result<Value, DecodeError> {
        let ext_type = self.u8()? as i8;
        let kind = HandleKind::from_ext_type(ext_type).ok_or(DecodeError::UnknownExt(ext_type))?;
        let payload = self.take(size)?;
        let id = if inline {
            payload[0] as i8 as i64
        } else {
            match decode(payload)? {
                Value::Integer(id) => id,
                _ => return Err(DecodeError::InvalidByte(self.x - size)),
            }
        };
        Ok(Value::Handle(kind, id))
    }
}
