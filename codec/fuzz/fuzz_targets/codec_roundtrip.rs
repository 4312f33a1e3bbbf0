#![no_main]

use arbitrary::Arbitrary;
use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use num_bigint::BigInt;
use oracle_codec::{
    Array, Builder, Codec, Fields, IntoValue, NotNil, OracleId, Record, SharedCodec, Slice,
    Value,
};

#[derive(Arbitrary, Debug)]
struct Observation {
    observer: u8,
    price: i128,
    timestamp: u32,
    valid: bool,
}

#[derive(Arbitrary, Debug)]
enum FuzzInput<'a> {
    // Untrusted bytes
    Bytes(bool, &'a [u8]),

    // Primitives
    Bool(bool),
    I16(i16),
    U64(u64),
    F64(f64),
    Oracle(u8),

    // Odd widths
    Int3(i32),
    Uint5(u64),
    BigInt(i128),

    // Composites
    Text(String),
    Observers([u8; 4]),
    Prices(Vec<i64>),
    Boxed(u32),
    Observations(Vec<Observation>),
}

fn builder(little: bool) -> Builder {
    if little {
        Builder::LITTLE_ENDIAN
    } else {
        Builder::BIG_ENDIAN
    }
}

fn observation(b: Builder) -> SharedCodec {
    Record::new([
        ("observer", b.oracle_id()),
        ("price", b.big_int(17, true).unwrap()),
        ("timestamp", b.uint32()),
        ("valid", b.bool()),
    ])
    .unwrap()
    .shared()
}

fn observations(b: Builder) -> SharedCodec {
    Slice::new(observation(b), b.uint16()).unwrap().shared()
}

fn roundtrip(codec: &dyn Codec, value: Value) {
    let encoded = match codec.encode(&value, BytesMut::new()) {
        Ok(encoded) => encoded,
        Err(_) => return,
    };
    if let Ok(size) = codec.fixed_size() {
        assert_eq!(size, encoded.len());
    }
    let (decoded, rest) = codec
        .decode(&encoded)
        .expect("Failed to decode a successfully encoded input!");
    assert!(rest.is_empty());
    match (&decoded, &value) {
        (Value::F64(a), Value::F64(b)) => assert_eq!(a.to_bits(), b.to_bits()),
        _ => assert_eq!(decoded, value),
    }
}

fn fuzz(input: FuzzInput) {
    let b = Builder::BIG_ENDIAN;
    match input {
        FuzzInput::Bytes(little, bytes) => {
            // Decoding untrusted input may fail but must not panic.
            let codec = observations(builder(little));
            if let Ok((value, _)) = codec.decode(bytes) {
                roundtrip(codec.as_ref(), value);
            }
            let _ = b.string(1000).unwrap().decode(bytes);
        }
        FuzzInput::Bool(v) => roundtrip(b.bool().as_ref(), v.into_value()),
        FuzzInput::I16(v) => roundtrip(b.int16().as_ref(), v.into_value()),
        FuzzInput::U64(v) => roundtrip(Builder::LITTLE_ENDIAN.uint64().as_ref(), v.into_value()),
        FuzzInput::F64(v) => roundtrip(b.float64().as_ref(), v.into_value()),
        FuzzInput::Oracle(v) => roundtrip(b.oracle_id().as_ref(), OracleId(v).into_value()),
        FuzzInput::Int3(v) => roundtrip(b.int(3).unwrap().as_ref(), v.into_value()),
        FuzzInput::Uint5(v) => roundtrip(
            Builder::LITTLE_ENDIAN.uint(5).unwrap().as_ref(),
            v.into_value(),
        ),
        FuzzInput::BigInt(v) => roundtrip(
            b.big_int(16, true).unwrap().as_ref(),
            BigInt::from(v).into_value(),
        ),
        FuzzInput::Text(v) => roundtrip(b.string(64).unwrap().as_ref(), v.into_value()),
        FuzzInput::Observers(v) => roundtrip(
            &Array::new(4, b.oracle_id()),
            v.map(OracleId).into_value(),
        ),
        FuzzInput::Prices(v) => roundtrip(
            &Slice::new(b.int64(), b.uint8()).unwrap(),
            v.into_value(),
        ),
        FuzzInput::Boxed(v) => roundtrip(&NotNil::new(b.uint32()), Box::new(v).into_value()),
        FuzzInput::Observations(v) => {
            let value = v
                .into_iter()
                .map(|o| {
                    Fields::new()
                        .with("observer", OracleId(o.observer))
                        .with("price", BigInt::from(o.price))
                        .with("timestamp", o.timestamp)
                        .with("valid", o.valid)
                })
                .collect::<Vec<_>>()
                .into_value();
            roundtrip(observations(Builder::LITTLE_ENDIAN).as_ref(), value);
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
