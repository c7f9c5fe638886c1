mod support;

use mpack_rpc_buffers::{Packer, MIN_CAPACITY};
use mpack_rpc_pack::msgpack::{encode, pack_object};
use mpack_rpc_pack::{HandleKind, Value};
use proptest::prelude::*;

use support::decode;

fn arb_handle_id() -> impl Strategy<Value = i64> {
    prop_oneof![-0x1fi64..=0x7f, 0i64..=i64::MAX]
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(()).prop_map(|_| Value::Nil),
        any::<bool>().prop_map(Value::Boolean),
        any::<i64>().prop_map(Value::Integer),
        (-1e12f64..1e12).prop_map(Value::Float),
        prop::collection::vec(any::<u8>(), 0..300).prop_map(Value::String),
        (prop::sample::select(HandleKind::ALL.to_vec()), arb_handle_id())
            .prop_map(|(kind, id)| Value::Handle(kind, id)),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(6, 256, 20, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..20).prop_map(Value::Array),
            prop::collection::vec((prop::collection::vec(any::<u8>(), 0..40), inner), 0..20)
                .prop_map(Value::Dict),
        ]
    })
}

fn arb_integer_len() -> impl Strategy<Value = (i64, usize)> {
    prop_oneof![
        (0i64..=0x7f).prop_map(|i| (i, 1)),
        (0x80i64..=0xff).prop_map(|i| (i, 2)),
        (0x100i64..=0xffff).prop_map(|i| (i, 3)),
        (0x1_0000i64..=0x0fff_ffff).prop_map(|i| (i, 5)),
        (0x1000_0000i64..=i64::MAX).prop_map(|i| (i, 9)),
        (-0x20i64..=-1).prop_map(|i| (i, 1)),
        (-0x80i64..-0x20).prop_map(|i| (i, 2)),
        (-0x8000i64..-0x80).prop_map(|i| (i, 3)),
        (-0x8000_0000i64..-0x8000).prop_map(|i| (i, 5)),
        (i64::MIN..-0x8000_0000).prop_map(|i| (i, 9)),
    ]
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(mut value in arb_value()) {
        let bytes = encode(&mut value);
        prop_assert_eq!(decode(&bytes).unwrap(), value);
    }

    #[test]
    fn prop_streaming_matches_in_memory(
        mut value in arb_value(),
        capacity in MIN_CAPACITY..128usize,
    ) {
        let expected = encode(&mut value);
        let mut packer = Packer::to_writer(Vec::new(), capacity);
        pack_object(&mut value, &mut packer);
        prop_assert_eq!(packer.finish().unwrap(), expected);
    }

    #[test]
    fn prop_integer_widths((int, len) in arb_integer_len()) {
        let bytes = encode(&mut Value::Integer(int));
        prop_assert_eq!(bytes.len(), len);
        prop_assert_eq!(decode(&bytes).unwrap(), Value::Integer(int));
    }
}
