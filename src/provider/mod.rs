//! Provider handles and their override stacks.
//!
//! This module contains the [`Provider`] type: a named, resolvable unit with
//! an immutable base resolvable and a LIFO stack of substitutes consulted
//! ahead of it.

use std::fmt;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::internal::sync::{lock, StackMutex};
use crate::internal::CycleGuard;

pub mod guard;
pub mod resolvable;

pub use guard::OverrideGuard;
pub use resolvable::{FactoryFn, Resolvable};

#[cfg(feature = "smallvec")]
type OverrideStack<T> = smallvec::SmallVec<[Resolvable<T>; 2]>;

#[cfg(not(feature = "smallvec"))]
type OverrideStack<T> = Vec<Resolvable<T>>;

/// A named, resolvable unit producing instances of `T`.
///
/// A provider owns two pieces of state: a `base` resolvable fixed at
/// declaration time, and an override stack that starts empty and is consulted
/// before the base on every [`resolve`](Provider::resolve). Handles are cheap
/// `Arc`-backed clones sharing that state — cloning a handle into another
/// provider's factory closure is how dependency edges are captured at
/// declaration time while still being resolved at call time:
///
/// ```rust
/// use strata_di::Provider;
/// use std::sync::Arc;
///
/// struct ApiClient;
/// struct Service { client: Arc<ApiClient> }
///
/// let client = Provider::factory("api_client", || Ok(Arc::new(ApiClient)));
///
/// let client_dep = client.clone();
/// let service = Provider::factory("service", move || {
///     Ok(Arc::new(Service { client: client_dep.resolve()? }))
/// });
///
/// let s = service.resolve().unwrap();
/// # let _ = s.client;
/// ```
///
/// Because the edge is re-resolved on every call, overriding `client` later
/// changes what `service` receives without rewiring `service`.
///
/// # Thread safety
///
/// Handles are `Send + Sync`; the stack sits behind a mutex so pushes and
/// pops are individually atomic. Sequencing of overrides against resolution
/// is left to the caller — the intended discipline is a single writer per
/// container instance.
pub struct Provider<T: ?Sized + Send + Sync + 'static> {
    inner: Arc<ProviderInner<T>>,
}

struct ProviderInner<T: ?Sized + Send + Sync + 'static> {
    name: &'static str,
    // Fixed at declaration; resolution only ever reads it.
    base: Option<Resolvable<T>>,
    overrides: StackMutex<OverrideStack<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> Provider<T> {
    fn with_base(name: &'static str, base: Option<Resolvable<T>>) -> Self {
        Self {
            inner: Arc::new(ProviderInner {
                name,
                base,
                overrides: StackMutex::new(OverrideStack::default()),
            }),
        }
    }

    /// Declares a factory provider: the base invokes `f` on every call,
    /// yielding a fresh instance each time. Nothing is cached.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata_di::Provider;
    /// use std::sync::Arc;
    ///
    /// let provider = Provider::factory("counter", || Ok(Arc::new(vec![0u8; 4])));
    /// let a = provider.resolve().unwrap();
    /// let b = provider.resolve().unwrap();
    /// assert!(!Arc::ptr_eq(&a, &b)); // New instance per call
    /// ```
    pub fn factory<F>(name: &'static str, f: F) -> Self
    where
        F: Fn() -> DiResult<Arc<T>> + Send + Sync + 'static,
    {
        Self::with_base(name, Some(Resolvable::factory(f)))
    }

    /// Declares a fixed-instance provider: the base returns the same
    /// prebuilt value on every call.
    pub fn instance(name: &'static str, value: Arc<T>) -> Self {
        Self::with_base(name, Some(Resolvable::Instance(value)))
    }

    /// Declares a provider with no base. Resolving it fails with
    /// [`DiError::UnsetBase`] until an override supplies a resolvable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata_di::{DiError, Provider};
    /// use std::sync::Arc;
    ///
    /// let provider = Provider::<u32>::placeholder("late_bound");
    /// assert_eq!(provider.resolve(), Err(DiError::UnsetBase("late_bound")));
    ///
    /// provider.override_instance(Arc::new(7));
    /// assert_eq!(*provider.resolve().unwrap(), 7);
    /// ```
    pub fn placeholder(name: &'static str) -> Self {
        Self::with_base(name, None)
    }

    /// Provider name, unique within its owning container.
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// True when a base resolvable was wired at declaration.
    pub fn is_wired(&self) -> bool {
        self.inner.base.is_some()
    }

    // Identity of the shared state, stable across handle clones.
    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }

    /// Resolves one instance.
    ///
    /// The top of the override stack wins; with an empty stack the base
    /// resolvable runs. Resolution reads the stack but never mutates it, and
    /// the stack lock is released before any factory executes, so factories
    /// are free to resolve other providers (or push overrides of their own).
    ///
    /// # Errors
    ///
    /// - [`DiError::UnsetBase`] if the provider has neither base nor override
    /// - [`DiError::Circular`] if resolution re-enters this provider
    /// - [`DiError::DepthExceeded`] on pathological nesting
    /// - Any error returned by the active factory closure, unchanged
    ///
    /// Panics raised inside a factory propagate unchanged to the caller.
    pub fn resolve(&self) -> DiResult<Arc<T>> {
        let _guard = CycleGuard::enter(self.id(), self.inner.name)?;

        let active = lock(&self.inner.overrides).last().cloned();
        match active {
            Some(overriding) => overriding.produce(),
            None => match &self.inner.base {
                Some(base) => base.produce(),
                None => Err(DiError::UnsetBase(self.inner.name)),
            },
        }
    }

    /// Resolves one instance, panicking on failure.
    ///
    /// Convenience for call sites that treat a mis-wired graph as fatal.
    pub fn resolve_required(&self) -> Arc<T> {
        self.resolve()
            .unwrap_or_else(|e| panic!("Failed to resolve {}: {:?}", self.inner.name, e))
    }

    /// Pushes an override. The pushed resolvable stays active until popped by
    /// [`reset_last_overriding`](Provider::reset_last_overriding) or cleared
    /// by [`reset_override`](Provider::reset_override); pushes stack in LIFO
    /// order, the most recent winning.
    ///
    /// Accepts anything convertible to a [`Resolvable`]: another provider, a
    /// prebuilt `Arc<T>`, or an explicit `Resolvable` value.
    pub fn override_with(&self, resolvable: impl Into<Resolvable<T>>) {
        lock(&self.inner.overrides).push(resolvable.into());
    }

    /// Pushes a factory override.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata_di::Provider;
    /// use std::sync::Arc;
    ///
    /// let provider = Provider::instance("mode", Arc::new("live".to_string()));
    /// provider.override_factory(|| Ok(Arc::new("test".to_string())));
    /// assert_eq!(*provider.resolve().unwrap(), "test");
    /// ```
    pub fn override_factory<F>(&self, f: F)
    where
        F: Fn() -> DiResult<Arc<T>> + Send + Sync + 'static,
    {
        self.override_with(Resolvable::factory(f));
    }

    /// Pushes a fixed-instance override; every resolution returns `value`.
    pub fn override_instance(&self, value: Arc<T>) {
        self.override_with(Resolvable::Instance(value));
    }

    /// Pushes a delegation override: resolution is forwarded to `other`,
    /// whose own override stack applies recursively.
    pub fn override_provider(&self, other: &Provider<T>) {
        self.override_with(Resolvable::Provider(other.clone()));
    }

    /// Pushes an override and returns a guard that pops it on drop,
    /// including during panic unwinding.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata_di::Provider;
    /// use std::sync::Arc;
    ///
    /// let provider = Provider::instance("flag", Arc::new(false));
    /// {
    ///     let _guard = provider.scoped_override(Arc::new(true));
    ///     assert!(*provider.resolve().unwrap());
    /// }
    /// assert!(!*provider.resolve().unwrap());
    /// ```
    pub fn scoped_override(&self, resolvable: impl Into<Resolvable<T>>) -> OverrideGuard<T> {
        self.override_with(resolvable);
        OverrideGuard::new(self.clone())
    }

    /// Clears the override stack unconditionally, returning the provider to
    /// base behavior regardless of stack depth.
    pub fn reset_override(&self) {
        lock(&self.inner.overrides).clear();
    }

    /// Pops exactly one override, the most recently pushed.
    ///
    /// # Errors
    ///
    /// [`DiError::EmptyOverrideStack`] if no override is active; the stack is
    /// left unchanged.
    pub fn reset_last_overriding(&self) -> DiResult<()> {
        let mut stack = lock(&self.inner.overrides);
        match stack.pop() {
            Some(_) => Ok(()),
            None => Err(DiError::EmptyOverrideStack(self.inner.name)),
        }
    }

    /// True when at least one override is active.
    pub fn overridden(&self) -> bool {
        !lock(&self.inner.overrides).is_empty()
    }

    /// Number of active overrides.
    pub fn override_depth(&self) -> usize {
        lock(&self.inner.overrides).len()
    }
}

// Manual impl: handle clones share state for any `T`, Sized or not.
impl<T: ?Sized + Send + Sync + 'static> Clone for Provider<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: ?Sized + Send + Sync + 'static> fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.inner.name)
            .field("type", &std::any::type_name::<T>())
            .field("wired", &self.is_wired())
            .field("override_depth", &self.override_depth())
            .finish()
    }
}
