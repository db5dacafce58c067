#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;
use strata_di::Provider;

// Replays arbitrary override/reset/resolve sequences against a shadow Vec
// model; any divergence is a bug.
fuzz_target!(|data: &[u8]| {
    let provider = Provider::factory("fuzzed", || Ok(Arc::new(0u8)));
    let mut model: Vec<u8> = Vec::new();
    let mut guards = Vec::new();

    for chunk in data.chunks(2) {
        let op = chunk[0] % 6;
        let value = chunk.get(1).copied().unwrap_or(1).max(1);

        match op {
            0 => {
                provider.override_instance(Arc::new(value));
                model.push(value);
            }
            1 => {
                let result = provider.reset_last_overriding();
                assert_eq!(result.is_ok(), model.pop().is_some());
            }
            2 => {
                provider.reset_override();
                model.clear();
                // Guards now outnumber stack entries; dropping them must not
                // pop below empty
                guards.clear();
            }
            3 => {
                guards.push(provider.scoped_override(Arc::new(value)));
                model.push(value);
            }
            4 => {
                if guards.pop().is_some() {
                    model.pop();
                }
            }
            _ => {
                let expected = model.last().copied().unwrap_or(0);
                assert_eq!(*provider.resolve().unwrap(), expected);
            }
        }

        assert_eq!(provider.override_depth(), model.len());
        assert_eq!(provider.overridden(), !model.is_empty());
    }
});
