use std::sync::{Arc, Mutex};
use strata_di::{DiError, Provider};

#[test]
fn test_factory_creates_new_instances() {
    let counter = Arc::new(Mutex::new(0));
    let counter_clone = counter.clone();

    let provider = Provider::factory("label", move || {
        let mut c = counter_clone.lock().unwrap();
        *c += 1;
        Ok(Arc::new(format!("instance-{}", *c)))
    });

    let a = provider.resolve().unwrap();
    let b = provider.resolve().unwrap();
    let c = provider.resolve().unwrap();

    assert_eq!(*a, "instance-1");
    assert_eq!(*b, "instance-2");
    assert_eq!(*c, "instance-3");

    // All different instances
    assert!(!Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&b, &c));
}

#[test]
fn test_instance_returns_same_value() {
    let value = Arc::new(8080u16);
    let provider = Provider::instance("port", value.clone());

    let a = provider.resolve().unwrap();
    let b = provider.resolve().unwrap();

    assert_eq!(*a, 8080);
    assert!(Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&a, &value));
}

#[test]
fn test_factory_with_dependencies() {
    #[derive(Debug)]
    struct Config {
        port: u16,
    }

    #[derive(Debug)]
    struct Server {
        config: Arc<Config>,
        name: String,
    }

    let config = Provider::instance("config", Arc::new(Config { port: 8080 }));

    let config_dep = config.clone();
    let server = Provider::factory("server", move || {
        Ok(Arc::new(Server {
            config: config_dep.resolve()?,
            name: "MyServer".to_string(),
        }))
    });

    let server = server.resolve().unwrap();
    assert_eq!(server.config.port, 8080);
    assert_eq!(server.name, "MyServer");
}

#[test]
fn test_complex_dependency_graph() {
    struct A {
        value: i32,
    }

    struct B {
        a: Arc<A>,
    }

    struct C {
        a: Arc<A>,
        b: Arc<B>,
    }

    let a = Provider::instance("a", Arc::new(A { value: 100 }));

    let a_dep = a.clone();
    let b = Provider::factory("b", move || Ok(Arc::new(B { a: a_dep.resolve()? })));

    let a_dep = a.clone();
    let b_dep = b.clone();
    let c = Provider::factory("c", move || {
        Ok(Arc::new(C {
            a: a_dep.resolve()?,
            b: b_dep.resolve()?,
        }))
    });

    let c = c.resolve().unwrap();
    assert_eq!(c.a.value, 100);
    assert_eq!(c.b.a.value, 100);
    // The fixed instance flows to every dependent unchanged
    assert!(Arc::ptr_eq(&c.a, &c.b.a));
}

#[test]
fn test_placeholder_fails_until_overridden() {
    let provider = Provider::<String>::placeholder("late_bound");

    assert!(!provider.is_wired());
    assert_eq!(provider.resolve(), Err(DiError::UnsetBase("late_bound")));

    provider.override_instance(Arc::new("bound".to_string()));
    assert_eq!(*provider.resolve().unwrap(), "bound");

    provider.reset_override();
    assert_eq!(provider.resolve(), Err(DiError::UnsetBase("late_bound")));
}

#[test]
#[should_panic(expected = "Failed to resolve late_bound")]
fn test_resolve_required_panics_on_unset_base() {
    let provider = Provider::<String>::placeholder("late_bound");
    let _ = provider.resolve_required();
}

#[test]
fn test_clones_share_override_state() {
    let provider = Provider::instance("value", Arc::new(1u32));
    let alias = provider.clone();

    alias.override_instance(Arc::new(2));

    assert_eq!(*provider.resolve().unwrap(), 2);
    assert_eq!(provider.override_depth(), 1);

    provider.reset_override();
    assert_eq!(*alias.resolve().unwrap(), 1);
}

#[test]
fn test_factory_panic_propagates_and_leaves_stack_intact() {
    let provider = Provider::instance("value", Arc::new(0u32));
    provider.override_instance(Arc::new(1));
    provider.override_factory(|| panic!("constructor exploded"));

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| provider.resolve()));
    assert!(result.is_err());

    // Resolution never mutates the stack, failed or not
    assert_eq!(provider.override_depth(), 2);
    provider.reset_last_overriding().unwrap();
    assert_eq!(*provider.resolve().unwrap(), 1);
}

#[test]
fn test_circular_delegation_detected() {
    let a = Provider::<u32>::placeholder("a");
    let b_target = a.clone();
    let b = Provider::factory("b", move || b_target.resolve());

    // a delegates to b, b resolves a: a -> b -> a
    a.override_provider(&b);

    match a.resolve() {
        Err(DiError::Circular(path)) => {
            assert_eq!(path, vec!["a", "b", "a"]);
        }
        other => panic!("Expected circular error, got {:?}", other),
    }
}

#[test]
fn test_self_delegation_detected() {
    let provider = Provider::instance("selfish", Arc::new(1u32));
    provider.override_provider(&provider);

    assert!(matches!(provider.resolve(), Err(DiError::Circular(_))));

    // Popping the delegation restores base behavior
    provider.reset_last_overriding().unwrap();
    assert_eq!(*provider.resolve().unwrap(), 1);
}

#[test]
fn test_depth_exceeded_on_pathological_chain() {
    let mut tail = Provider::factory("leaf", || Ok(Arc::new(0u32)));
    for _ in 0..1100 {
        let prev = tail.clone();
        tail = Provider::factory("link", move || prev.resolve());
    }

    match tail.resolve() {
        Err(DiError::DepthExceeded(depth)) => assert_eq!(depth, 1024),
        other => panic!("Expected depth error, got {:?}", other),
    }
}

#[test]
fn test_deep_chain_within_limit_resolves() {
    let mut tail = Provider::factory("leaf", || Ok(Arc::new(0u32)));
    for _ in 0..100 {
        let prev = tail.clone();
        tail = Provider::factory("link", move || Ok(Arc::new(*prev.resolve()? + 1)));
    }

    assert_eq!(*tail.resolve().unwrap(), 100);
}

#[test]
fn test_cross_thread_resolution() {
    let provider = Provider::factory("value", || Ok(Arc::new(42u64)));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let provider = provider.clone();
            std::thread::spawn(move || *provider.resolve().unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 42);
    }
}

#[test]
fn test_provider_debug_output() {
    let provider = Provider::instance("port", Arc::new(8080u16));
    provider.override_instance(Arc::new(1u16));

    let debug = format!("{:?}", provider);
    assert!(debug.contains("port"));
    assert!(debug.contains("override_depth: 1"));
}
