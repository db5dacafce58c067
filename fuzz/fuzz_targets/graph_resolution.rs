#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;
use strata_di::{ContainerBuilder, Provider};

struct Service {
    value: u8,
}

// Builds a two-provider graph, applies a fuzzed override sequence to the
// dependency, and checks that the dependent always sees the active entry.
fuzz_target!(|data: &[u8]| {
    let mut builder = ContainerBuilder::new("fuzzed");
    builder.provider::<u8, _>("value", |_| {
        Ok(Provider::factory("value", || Ok(Arc::new(0u8))))
    });
    builder.provider::<Service, _>("service", |wiring| {
        let value = wiring.get::<u8>("value")?;
        Ok(Provider::factory("service", move || {
            Ok(Arc::new(Service {
                value: *value.resolve()?,
            }))
        }))
    });

    let container = match builder.instantiate() {
        Ok(container) => container,
        Err(_) => return,
    };
    let value = container.provider::<u8>("value").unwrap();
    let mut model: Vec<u8> = Vec::new();

    for chunk in data.chunks(2) {
        match chunk[0] % 4 {
            0 => {
                let v = chunk.get(1).copied().unwrap_or(1);
                value.override_instance(Arc::new(v));
                model.push(v);
            }
            1 => {
                let result = value.reset_last_overriding();
                assert_eq!(result.is_ok(), model.pop().is_some());
            }
            2 => {
                container.reset_override();
                model.clear();
            }
            _ => {}
        }

        let expected = model.last().copied().unwrap_or(0);
        let service = container.resolve::<Service>("service").unwrap();
        assert_eq!(service.value, expected);
    }
});
