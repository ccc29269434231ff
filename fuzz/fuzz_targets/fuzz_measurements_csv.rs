#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(rows) = harmony_config::read_measurements_csv(data) {
        // accepted rows always satisfy the fixture invariants
        for r in rows {
            assert!((0.0..=1.0).contains(&r.confidence));
            assert!(!r.unit.is_empty());
        }
    }
});
