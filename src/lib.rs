//! # strata-di
//!
//! Dependency injection for Rust built around stackable provider overrides.
//!
//! ## Features
//!
//! - **Named providers**: factory, fixed-instance, and placeholder providers
//!   producing `Arc<T>` values, with `T: ?Sized` trait objects supported
//! - **Override stacks**: per-provider LIFO stacks of substitutes — push,
//!   pop-one, or clear-all at any point, with the top entry always winning
//! - **Scoped overrides**: RAII guards that pop their push on every exit
//!   path, panics included
//! - **Call-time dependency edges**: factories capture provider handles and
//!   resolve them per call, so overriding a dependency reaches every
//!   dependent without rewiring
//! - **Independent container instances**: declare a graph once, instantiate
//!   it many times, never share override state
//! - **Cycle detection**: delegation loops surface as errors with the full
//!   provider path instead of blowing the stack
//!
//! ## Quick Start
//!
//! ```rust
//! use strata_di::{ContainerBuilder, Provider};
//! use std::sync::Arc;
//!
//! // Define your services
//! trait ApiClient: Send + Sync {
//!     fn endpoint(&self) -> &'static str;
//! }
//!
//! struct HttpApiClient;
//! impl ApiClient for HttpApiClient {
//!     fn endpoint(&self) -> &'static str {
//!         "https://api.example.com"
//!     }
//! }
//!
//! struct Service {
//!     client: Arc<dyn ApiClient>,
//! }
//!
//! // Declare the graph once
//! let mut builder = ContainerBuilder::new("app");
//! builder.provider::<dyn ApiClient, _>("api_client", |_| {
//!     Ok(Provider::factory("api_client", || {
//!         Ok(Arc::new(HttpApiClient) as Arc<dyn ApiClient>)
//!     }))
//! });
//! builder.provider::<Service, _>("service", |wiring| {
//!     let client = wiring.get::<dyn ApiClient>("api_client")?;
//!     Ok(Provider::factory("service", move || {
//!         Ok(Arc::new(Service { client: client.resolve()? }))
//!     }))
//! });
//!
//! // Instantiate and resolve
//! let container = builder.instantiate().unwrap();
//! let service = container.resolve::<Service>("service").unwrap();
//! assert_eq!(service.client.endpoint(), "https://api.example.com");
//! ```
//!
//! ## Overriding
//!
//! Every provider carries a LIFO stack of substitute resolvables consulted
//! before its base. Overriding a dependency is visible through every
//! dependent, because dependency edges re-resolve on each call:
//!
//! ```rust
//! # use strata_di::{ContainerBuilder, Provider};
//! # use std::sync::Arc;
//! # trait ApiClient: Send + Sync { fn endpoint(&self) -> &'static str; }
//! # struct HttpApiClient;
//! # impl ApiClient for HttpApiClient { fn endpoint(&self) -> &'static str { "https://api.example.com" } }
//! # struct StubApiClient;
//! # impl ApiClient for StubApiClient { fn endpoint(&self) -> &'static str { "stub://" } }
//! # struct Service { client: Arc<dyn ApiClient> }
//! # let mut builder = ContainerBuilder::new("app");
//! # builder.provider::<dyn ApiClient, _>("api_client", |_| {
//! #     Ok(Provider::factory("api_client", || Ok(Arc::new(HttpApiClient) as Arc<dyn ApiClient>)))
//! # });
//! # builder.provider::<Service, _>("service", |wiring| {
//! #     let client = wiring.get::<dyn ApiClient>("api_client")?;
//! #     Ok(Provider::factory("service", move || Ok(Arc::new(Service { client: client.resolve()? }))))
//! # });
//! let container = builder.instantiate().unwrap();
//! let client = container.provider::<dyn ApiClient>("api_client").unwrap();
//!
//! client.override_factory(|| Ok(Arc::new(StubApiClient) as Arc<dyn ApiClient>));
//! let service = container.resolve::<Service>("service").unwrap();
//! assert_eq!(service.client.endpoint(), "stub://");
//!
//! client.reset_override();
//! let service = container.resolve::<Service>("service").unwrap();
//! assert_eq!(service.client.endpoint(), "https://api.example.com");
//! ```
//!
//! ## Scoped Overrides
//!
//! [`Provider::scoped_override`] pushes and returns a guard; dropping the
//! guard pops exactly that push, on normal exit or during unwinding:
//!
//! ```rust
//! use strata_di::Provider;
//! use std::sync::Arc;
//!
//! let timeout = Provider::instance("timeout_ms", Arc::new(5_000u64));
//! {
//!     let _guard = timeout.scoped_override(Arc::new(10u64));
//!     assert_eq!(*timeout.resolve().unwrap(), 10);
//! }
//! assert_eq!(*timeout.resolve().unwrap(), 5_000);
//! ```

// Module declarations
pub mod container;
pub mod descriptors;
pub mod error;
pub mod provider;
pub mod traits;

// Internal modules
mod internal;

// Re-export core types
pub use container::{Container, ContainerBuilder, Wiring};
pub use descriptors::ProviderDescriptor;
pub use error::{DiError, DiResult};
pub use provider::{FactoryFn, OverrideGuard, Provider, Resolvable};
pub use traits::AnyProvider;
