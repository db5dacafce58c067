//! The resolvable abstraction behind provider bases and overrides.

use std::fmt;
use std::sync::Arc;

use crate::error::DiResult;
use crate::provider::Provider;

/// Constructor closure invoked on every resolution.
pub type FactoryFn<T> = Arc<dyn Fn() -> DiResult<Arc<T>> + Send + Sync>;

/// What a provider resolves to on call.
///
/// A closed set of variants behind one interface, so substitutions are
/// type-checked at the boundary: a constructor call producing a new instance
/// per resolution, a fixed prebuilt instance, or delegation to another
/// provider whose own override stack applies.
///
/// # Examples
///
/// ```rust
/// use strata_di::{Provider, Resolvable};
/// use std::sync::Arc;
///
/// let provider = Provider::instance("greeting", Arc::new("hello".to_string()));
///
/// // A factory builds a new value on every call
/// provider.override_with(Resolvable::factory(|| Ok(Arc::new("stubbed".to_string()))));
/// assert_eq!(*provider.resolve().unwrap(), "stubbed");
/// ```
pub enum Resolvable<T: ?Sized + Send + Sync + 'static> {
    /// Invokes the constructor on every call, yielding a fresh instance
    Factory(FactoryFn<T>),
    /// Returns the same prebuilt instance on every call
    Instance(Arc<T>),
    /// Delegates to another provider, honoring its override stack
    Provider(Provider<T>),
}

impl<T: ?Sized + Send + Sync + 'static> Resolvable<T> {
    /// Wraps a constructor closure as a factory resolvable.
    pub fn factory<F>(f: F) -> Self
    where
        F: Fn() -> DiResult<Arc<T>> + Send + Sync + 'static,
    {
        Resolvable::Factory(Arc::new(f))
    }

    /// Wraps a prebuilt value as a fixed-instance resolvable.
    pub fn instance(value: Arc<T>) -> Self {
        Resolvable::Instance(value)
    }

    /// Produces one value. Callers must not hold any provider lock.
    pub(crate) fn produce(&self) -> DiResult<Arc<T>> {
        match self {
            Resolvable::Factory(f) => f(),
            Resolvable::Instance(value) => Ok(value.clone()),
            Resolvable::Provider(provider) => provider.resolve(),
        }
    }
}

// Manual impl: `derive(Clone)` would demand `T: Clone`, but every variant is
// already cheaply cloneable through its `Arc`.
impl<T: ?Sized + Send + Sync + 'static> Clone for Resolvable<T> {
    fn clone(&self) -> Self {
        match self {
            Resolvable::Factory(f) => Resolvable::Factory(f.clone()),
            Resolvable::Instance(value) => Resolvable::Instance(value.clone()),
            Resolvable::Provider(provider) => Resolvable::Provider(provider.clone()),
        }
    }
}

impl<T: ?Sized + Send + Sync + 'static> fmt::Debug for Resolvable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolvable::Factory(_) => f.write_str("Resolvable::Factory"),
            Resolvable::Instance(_) => f.write_str("Resolvable::Instance"),
            Resolvable::Provider(provider) => {
                write!(f, "Resolvable::Provider({})", provider.name())
            }
        }
    }
}

impl<T: ?Sized + Send + Sync + 'static> From<Provider<T>> for Resolvable<T> {
    fn from(provider: Provider<T>) -> Self {
        Resolvable::Provider(provider)
    }
}

impl<T: ?Sized + Send + Sync + 'static> From<&Provider<T>> for Resolvable<T> {
    fn from(provider: &Provider<T>) -> Self {
        Resolvable::Provider(provider.clone())
    }
}

impl<T: ?Sized + Send + Sync + 'static> From<Arc<T>> for Resolvable<T> {
    fn from(value: Arc<T>) -> Self {
        Resolvable::Instance(value)
    }
}
