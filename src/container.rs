//! Container declaration and instantiation.
//!
//! This module contains the [`ContainerBuilder`] for declaring a named set of
//! wired providers once, and the [`Container`] produced by each
//! [`instantiate`](ContainerBuilder::instantiate) call: a fresh, independently
//! overridable graph sharing the declared topology.

use std::sync::Arc;

use crate::descriptors::ProviderDescriptor;
use crate::error::{DiError, DiResult};
use crate::provider::Provider;
use crate::traits::AnyProvider;

type Registry = Vec<(&'static str, Arc<dyn AnyProvider>)>;

type DefineFn = Arc<dyn Fn(&Wiring<'_>) -> DiResult<Arc<dyn AnyProvider>> + Send + Sync>;

fn lookup<T: ?Sized + Send + Sync + 'static>(
    providers: &Registry,
    name: &'static str,
) -> DiResult<Provider<T>> {
    // Containers hold a handful of providers in declaration order; a linear
    // scan beats hashing at this size.
    let (_, erased) = providers
        .iter()
        .find(|(declared, _)| *declared == name)
        .ok_or(DiError::NotFound(name))?;
    erased
        .as_any()
        .downcast_ref::<Provider<T>>()
        .cloned()
        .ok_or(DiError::TypeMismatch(std::any::type_name::<T>()))
}

/// Declares a container: a named, ordered set of provider definitions.
///
/// Definitions are recorded once; every [`instantiate`](Self::instantiate)
/// call replays them against a fresh graph, so container instances never
/// share provider state. Re-declaring a name replaces the earlier definition
/// in place (last wins, declaration order preserved).
///
/// # Examples
///
/// ```rust
/// use strata_di::{ContainerBuilder, Provider};
/// use std::sync::Arc;
///
/// struct ApiClient;
/// struct Service { client: Arc<ApiClient> }
///
/// let mut builder = ContainerBuilder::new("app");
/// builder.provider::<ApiClient, _>("api_client", |_| {
///     Ok(Provider::factory("api_client", || Ok(Arc::new(ApiClient))))
/// });
/// builder.provider::<Service, _>("service", |wiring| {
///     let client = wiring.get::<ApiClient>("api_client")?;
///     Ok(Provider::factory("service", move || {
///         Ok(Arc::new(Service { client: client.resolve()? }))
///     }))
/// });
///
/// let container = builder.instantiate().unwrap();
/// let service = container.resolve::<Service>("service").unwrap();
/// # let _ = service.client;
/// ```
pub struct ContainerBuilder {
    name: &'static str,
    definitions: Vec<(&'static str, DefineFn)>,
}

impl ContainerBuilder {
    /// Creates a new, empty builder.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            definitions: Vec::new(),
        }
    }

    /// Declares a provider under `name`.
    ///
    /// `define` runs once per instantiation and receives a [`Wiring`] view of
    /// the providers declared earlier in the same instantiation, so dependency
    /// handles captured inside it always belong to the instance being built.
    /// The registry name given here is authoritative for lookups; the name
    /// baked into the returned [`Provider`] is diagnostic.
    pub fn provider<T, F>(&mut self, name: &'static str, define: F) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Wiring<'_>) -> DiResult<Provider<T>> + Send + Sync + 'static,
    {
        let define: DefineFn = Arc::new(move |wiring| {
            let provider = define(wiring)?;
            Ok(Arc::new(provider) as Arc<dyn AnyProvider>)
        });
        self.insert(name, define);
        self
    }

    /// Declares a fixed-instance provider. Every container instance resolves
    /// the same prebuilt value, while each keeps its own override stack.
    pub fn instance<T>(&mut self, name: &'static str, value: Arc<T>) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.provider::<T, _>(name, move |_| Ok(Provider::instance(name, value.clone())))
    }

    /// Declares a provider with no base; it must be overridden before use.
    pub fn placeholder<T>(&mut self, name: &'static str) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.provider::<T, _>(name, move |_| Ok(Provider::placeholder(name)))
    }

    fn insert(&mut self, name: &'static str, define: DefineFn) {
        if let Some(pos) = self
            .definitions
            .iter()
            .position(|(declared, _)| *declared == name)
        {
            self.definitions[pos] = (name, define);
        } else {
            self.definitions.push((name, define));
        }
    }

    /// Instantiates a fresh container graph.
    ///
    /// Definitions run in declaration order; each sees only the providers
    /// already created for this instantiation, which makes dangling
    /// dependency references fail here — at build time — with
    /// [`DiError::NotFound`] rather than at first resolution.
    ///
    /// Every call yields an independent graph: same topology, fresh empty
    /// override stacks, no shared mutable state with earlier instances.
    pub fn instantiate(&self) -> DiResult<Container> {
        let mut providers: Registry = Vec::with_capacity(self.definitions.len());
        for (name, define) in &self.definitions {
            let provider = {
                let wiring = Wiring {
                    providers: &providers,
                };
                define(&wiring)?
            };
            providers.push((*name, provider));
        }
        Ok(Container {
            name: self.name,
            providers,
        })
    }
}

/// Dependency-lookup view handed to provider definitions during
/// [`ContainerBuilder::instantiate`].
///
/// Exposes the providers declared *earlier* in the instantiation being built.
/// Handles returned by [`get`](Self::get) are clones: capture them in factory
/// closures and resolve them at call time.
pub struct Wiring<'a> {
    providers: &'a Registry,
}

impl Wiring<'_> {
    /// Typed handle to a previously declared provider.
    ///
    /// # Errors
    ///
    /// [`DiError::NotFound`] if nothing was declared under `name` yet,
    /// [`DiError::TypeMismatch`] if it was declared with a different type.
    pub fn get<T>(&self, name: &'static str) -> DiResult<Provider<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        lookup(self.providers, name)
    }
}

/// A named collection of wired providers forming one independently
/// overridable graph.
///
/// Produced by [`ContainerBuilder::instantiate`]; owns its providers for its
/// lifetime. Override state on one container instance never leaks to another.
///
/// # Examples
///
/// ```rust
/// use strata_di::{ContainerBuilder, Provider};
/// use std::sync::Arc;
///
/// let mut builder = ContainerBuilder::new("app");
/// builder.instance("greeting", Arc::new("hello".to_string()));
///
/// let container = builder.instantiate().unwrap();
/// let provider = container.provider::<String>("greeting").unwrap();
///
/// provider.override_instance(Arc::new("overridden".to_string()));
/// assert_eq!(*container.resolve::<String>("greeting").unwrap(), "overridden");
///
/// container.reset_override();
/// assert_eq!(*container.resolve::<String>("greeting").unwrap(), "hello");
/// ```
pub struct Container {
    name: &'static str,
    providers: Registry,
}

impl Container {
    /// Container name, shared by all instances of one declaration.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of declared providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// True when no providers were declared.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Typed handle to the provider declared under `name`.
    ///
    /// # Errors
    ///
    /// [`DiError::NotFound`] for undeclared names, [`DiError::TypeMismatch`]
    /// when `T` differs from the declared type.
    pub fn provider<T>(&self, name: &'static str) -> DiResult<Provider<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        lookup(&self.providers, name)
    }

    /// Looks up and resolves in one call.
    pub fn resolve<T>(&self, name: &'static str) -> DiResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.provider::<T>(name)?.resolve()
    }

    /// Iterates the providers in declaration order, type-erased.
    pub fn providers(&self) -> impl Iterator<Item = (&'static str, &dyn AnyProvider)> {
        self.providers
            .iter()
            .map(|(name, provider)| (*name, provider.as_ref()))
    }

    /// True when any provider in this instance has an active override.
    pub fn overridden(&self) -> bool {
        self.providers.iter().any(|(_, p)| p.overridden())
    }

    /// Clears the override stack of every provider in this instance,
    /// returning the whole graph to base behavior.
    pub fn reset_override(&self) {
        for (_, provider) in &self.providers {
            provider.reset_override();
        }
    }

    /// Snapshots every provider's declaration and override state, in
    /// declaration order.
    pub fn describe(&self) -> Vec<ProviderDescriptor> {
        self.providers
            .iter()
            .map(|(name, provider)| ProviderDescriptor {
                name: *name,
                type_name: provider.provided_type(),
                wired: provider.is_wired(),
                override_depth: provider.override_depth(),
            })
            .collect()
    }
}
