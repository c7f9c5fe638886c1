//! Iterative, pre-order packing of nested [`Value`] trees.
//!
//! Nesting depth is bounded by the data, not by the call stack: suspended
//! containers live on an explicit stack of iterator frames.

use std::slice;

use mpack_rpc_buffers::{Flush, Packer};
use smallvec::SmallVec;

use super::{blob, handle::handle, scalar};
use crate::value::Value;

/// A container being walked, positioned at its next child.
enum Frame<'a> {
    Array(slice::IterMut<'a, Value>),
    Dict(slice::IterMut<'a, (Vec<u8>, Value)>),
}

impl Frame<'_> {
    fn is_exhausted(&self) -> bool {
        match self {
            Frame::Array(items) => items.len() == 0,
            Frame::Dict(pairs) => pairs.len() == 0,
        }
    }
}

#[cold]
#[inline(never)]
fn too_many(len: usize) -> ! {
    panic!("cannot pack a container of {len} entries: MessagePack counts are 32-bit")
}

fn container_len(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| too_many(len))
}

/// Packs `value` and everything below it.
///
/// Callback references met on the way are taken out of the tree, released
/// and packed as nil; they are left as [`Value::Nil`] afterwards.
///
/// # Example
///
/// ```
/// use mpack_rpc_buffers::Packer;
/// use mpack_rpc_pack::{msgpack::pack_object, Value};
///
/// let mut value = Value::Array(vec![1.into(), Value::Array(vec![2.into(), 3.into()]), 4.into()]);
/// let mut packer = Packer::string_buffer();
/// pack_object(&mut value, &mut packer);
/// assert_eq!(packer.take_bytes(), [0x93, 0x01, 0x92, 0x02, 0x03, 0x04]);
/// ```
pub fn pack_object<F: Flush>(value: &mut Value, packer: &mut Packer<F>) {
    pack_inner(value, None, packer);
}

/// Packs `items` as an array without wrapping them in a [`Value::Array`].
pub fn pack_array<F: Flush>(items: &mut [Value], packer: &mut Packer<F>) {
    packer.check_buffer();
    scalar::array_header(packer, container_len(items.len()));
    if let Some((first, rest)) = items.split_first_mut() {
        let container = if rest.is_empty() {
            None
        } else {
            Some(Frame::Array(rest.iter_mut()))
        };
        pack_inner(first, container, packer);
    }
}

/// Packs `current`, then keeps pulling values out of `container` and the
/// suspended frames below it until everything has been emitted.
fn pack_inner<'a, F: Flush>(
    mut current: &'a mut Value,
    mut container: Option<Frame<'a>>,
    packer: &mut Packer<F>,
) {
    let mut stack: SmallVec<[Frame<'a>; 2]> = SmallVec::new();

    loop {
        packer.check_buffer();
        let value = current;
        match value {
            Value::Callback(_) => {
                if let Value::Callback(callback) = std::mem::take(value) {
                    callback.release();
                }
                scalar::nil(packer);
            }
            Value::Nil => scalar::nil(packer),
            Value::Boolean(b) => scalar::boolean(packer, *b),
            Value::Integer(i) => scalar::integer(packer, *i),
            Value::Float(f) => scalar::float8(packer, *f),
            Value::String(s) => blob::string(packer, s),
            Value::Handle(kind, id) => handle(packer, *kind, *id),
            Value::Array(items) => {
                scalar::array_header(packer, container_len(items.len()));
                match items.len() {
                    0 => {}
                    1 => {
                        current = &mut items[0];
                        continue;
                    }
                    _ => {
                        if let Some(parent) = container.take() {
                            stack.push(parent);
                        }
                        container = Some(Frame::Array(items.iter_mut()));
                    }
                }
            }
            Value::Dict(pairs) => {
                scalar::map_header(packer, container_len(pairs.len()));
                if !pairs.is_empty() {
                    if let Some(parent) = container.take() {
                        stack.push(parent);
                    }
                    container = Some(Frame::Dict(pairs.iter_mut()));
                }
            }
        }

        let mut frame = match container.take().or_else(|| stack.pop()) {
            Some(frame) => frame,
            None => break,
        };

        current = match &mut frame {
            Frame::Array(items) => match items.next() {
                Some(item) => item,
                None => unreachable!("exhausted frames are never kept"),
            },
            Frame::Dict(pairs) => match pairs.next() {
                Some((key, child)) => {
                    packer.check_buffer();
                    blob::string(packer, key);
                    child
                }
                None => unreachable!("exhausted frames are never kept"),
            },
        };

        if !frame.is_exhausted() {
            container = Some(frame);
        }
    }
}
