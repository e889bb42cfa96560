#![no_main]
use libfuzzer_sys::fuzz_target;
use zenfarbfeld::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits::default().with_max_memory(64 << 20);

    // If we can decode it, re-encoding must reproduce the consumed bytes
    let mut decoder = FarbfeldDecoder::new(data).with_limits(limits.clone());
    let Ok(decoded) = decoder.decode::<u16>() else {
        return;
    };
    let rest = decoder.into_inner();
    let consumed = &data[..data.len() - rest.len()];

    let reencoded = encode_to_vec(&decoded).expect("decoded image must encode");
    assert_eq!(reencoded, consumed, "lossless roundtrip byte mismatch");

    // Reduced precision must be stable after one narrowing
    let narrow: FarbfeldImage<u8> = decoded.convert();
    let encoded = encode_to_vec(&narrow).expect("narrowed image must encode");
    let Ok(again) = decode_with_limits::<u8, _>(encoded.as_slice(), &limits) else {
        panic!("re-encoded data failed to decode");
    };
    assert_eq!(narrow, again, "reduced precision roundtrip mismatch");
});
