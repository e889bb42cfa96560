#![no_main]
use libfuzzer_sys::fuzz_target;
use zenfarbfeld::{FarbfeldDecoder, FarbfeldImage, Limits, ReadStrategy};

fuzz_target!(|data: &[u8]| {
    // Cap allocations; a 16-byte header may claim gigapixels.
    let limits = Limits::default().with_max_memory(64 << 20);

    // Both channel models and both strategies must never panic
    for strategy in [ReadStrategy::Rows, ReadStrategy::WholeImage] {
        let _: Result<FarbfeldImage<u16>, _> = FarbfeldDecoder::new(data)
            .with_limits(limits.clone())
            .with_strategy(strategy)
            .decode();
        let _: Result<FarbfeldImage<u8>, _> = FarbfeldDecoder::new(data)
            .with_limits(limits.clone())
            .with_strategy(strategy)
            .decode();
    }

    let _ = zenfarbfeld::is_farbfeld(data);
});
