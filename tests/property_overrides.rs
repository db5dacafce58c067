/// Property-based tests for override-stack semantics
///
/// Random interleavings of override/reset operations are replayed against a
/// plain Vec model; resolution must agree with the model's top (or the base)
/// at every step.
use proptest::prelude::*;
use std::sync::Arc;
use strata_di::{ContainerBuilder, DiError, Provider};

const BASE: u32 = 0;

#[derive(Debug, Clone)]
enum Op {
    Override(u32),
    ResetLast,
    ResetAll,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1u32..1000).prop_map(Op::Override),
        2 => Just(Op::ResetLast),
        1 => Just(Op::ResetAll),
    ]
}

proptest! {
    #[test]
    fn stack_semantics_match_model(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let provider = Provider::factory("value", || Ok(Arc::new(BASE)));
        let mut model: Vec<u32> = Vec::new();

        for op in ops {
            match op {
                Op::Override(value) => {
                    provider.override_instance(Arc::new(value));
                    model.push(value);
                }
                Op::ResetLast => {
                    let result = provider.reset_last_overriding();
                    match model.pop() {
                        Some(_) => prop_assert_eq!(result, Ok(())),
                        None => prop_assert_eq!(
                            result,
                            Err(DiError::EmptyOverrideStack("value"))
                        ),
                    }
                }
                Op::ResetAll => {
                    provider.reset_override();
                    model.clear();
                }
            }

            // Resolution always observes the model's top, falling back to base
            let expected = model.last().copied().unwrap_or(BASE);
            prop_assert_eq!(*provider.resolve().unwrap(), expected);
            prop_assert_eq!(provider.override_depth(), model.len());
            prop_assert_eq!(provider.overridden(), !model.is_empty());
        }
    }
}

proptest! {
    #[test]
    fn scoped_overrides_restore_stack(
        prior in prop::collection::vec(1u32..1000, 0..8),
        scoped in prop::collection::vec(1u32..1000, 1..8),
    ) {
        let provider = Provider::factory("value", || Ok(Arc::new(BASE)));
        for value in &prior {
            provider.override_instance(Arc::new(*value));
        }
        let before = provider.override_depth();

        {
            let mut guards = Vec::new();
            for value in &scoped {
                guards.push(provider.scoped_override(Arc::new(*value)));
            }
            prop_assert_eq!(provider.override_depth(), before + scoped.len());
            prop_assert_eq!(*provider.resolve().unwrap(), *scoped.last().unwrap());
            // Guards drop here in reverse declaration order
        }

        prop_assert_eq!(provider.override_depth(), before);
        let expected = prior.last().copied().unwrap_or(BASE);
        prop_assert_eq!(*provider.resolve().unwrap(), expected);
    }
}

proptest! {
    #[test]
    fn overrides_propagate_to_dependents(override_values in prop::collection::vec(1u32..1000, 0..8)) {
        struct Doubler {
            value: u32,
        }

        let mut builder = ContainerBuilder::new("math");
        builder.provider::<u32, _>("value", |_| {
            Ok(Provider::factory("value", || Ok(Arc::new(BASE))))
        });
        builder.provider::<Doubler, _>("doubler", |wiring| {
            let value = wiring.get::<u32>("value")?;
            Ok(Provider::factory("doubler", move || {
                Ok(Arc::new(Doubler {
                    value: *value.resolve()? * 2,
                }))
            }))
        });
        let container = builder.instantiate().unwrap();
        let value = container.provider::<u32>("value").unwrap();

        for v in &override_values {
            value.override_instance(Arc::new(*v));
            let doubler = container.resolve::<Doubler>("doubler").unwrap();
            prop_assert_eq!(doubler.value, *v * 2);
        }

        value.reset_override();
        let doubler = container.resolve::<Doubler>("doubler").unwrap();
        prop_assert_eq!(doubler.value, BASE * 2);
    }
}

proptest! {
    #[test]
    fn instantiations_never_share_state(override_first in any::<bool>(), value in 1u32..1000) {
        let mut builder = ContainerBuilder::new("app");
        builder.provider::<u32, _>("value", |_| {
            Ok(Provider::factory("value", || Ok(Arc::new(BASE))))
        });

        let first = builder.instantiate().unwrap();
        let second = builder.instantiate().unwrap();

        let (overridden, untouched) = if override_first {
            (&first, &second)
        } else {
            (&second, &first)
        };

        overridden
            .provider::<u32>("value")
            .unwrap()
            .override_instance(Arc::new(value));

        prop_assert_eq!(*overridden.resolve::<u32>("value").unwrap(), value);
        prop_assert_eq!(*untouched.resolve::<u32>("value").unwrap(), BASE);
    }
}
