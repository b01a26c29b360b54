#![no_main]

use libfuzzer_sys::fuzz_target;
use population_projector::io::read_countries_from_bytes;

fuzz_target!(|data: &[u8]| {
    if let Ok(store) = read_countries_from_bytes(data) {
        for name in store.names() {
            if let Ok(record) = store.get(name) {
                let _ = record.pyramid();
            }
        }
    }
});
