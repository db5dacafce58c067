//! Scope guard reversing a single override push.

use crate::provider::Provider;

/// Pops exactly one override from its provider when dropped.
///
/// Returned by [`Provider::scoped_override`]. The pop runs on every exit
/// path, including panic unwinding, and is equivalent to one
/// [`Provider::reset_last_overriding`] call. Nested guards on the same
/// provider release in LIFO drop order, so a balanced scope restores the
/// stack to its exact pre-scope contents.
///
/// # Examples
///
/// ```rust
/// use strata_di::Provider;
/// use std::sync::Arc;
///
/// let provider = Provider::instance("answer", Arc::new(1u32));
/// {
///     let _guard = provider.scoped_override(Arc::new(2u32));
///     assert_eq!(*provider.resolve().unwrap(), 2);
/// }
/// assert_eq!(*provider.resolve().unwrap(), 1);
/// ```
#[must_use = "dropping the guard immediately removes the override"]
pub struct OverrideGuard<T: ?Sized + Send + Sync + 'static> {
    provider: Provider<T>,
}

impl<T: ?Sized + Send + Sync + 'static> OverrideGuard<T> {
    pub(crate) fn new(provider: Provider<T>) -> Self {
        Self { provider }
    }

    /// The provider this guard will pop on drop.
    pub fn provider(&self) -> &Provider<T> {
        &self.provider
    }
}

impl<T: ?Sized + Send + Sync + 'static> Drop for OverrideGuard<T> {
    fn drop(&mut self) {
        // One pop, matching the single push made when the guard was created.
        // An empty stack here means the scope body already reset the
        // provider; there is nothing left to undo.
        let _ = self.provider.reset_last_overriding();
    }
}
