//! Object-safe provider surface for type-erased storage.

use std::any::Any;

use crate::error::DiResult;
use crate::provider::Provider;

/// Erased view of a [`Provider<T>`].
///
/// Containers store heterogeneous providers behind `Arc<dyn AnyProvider>`;
/// this trait carries the operations that make sense without knowing `T` —
/// override-stack control and introspection — plus an [`Any`] hook for the
/// typed downcast performed at the container lookup boundary.
///
/// Most users never implement or name this trait directly; it is the seam
/// between [`Container`](crate::Container) and the typed provider layer.
pub trait AnyProvider: Send + Sync {
    /// Provider name within its container.
    fn name(&self) -> &'static str;

    /// `std::any::type_name` of the provided type.
    fn provided_type(&self) -> &'static str;

    /// True when a base resolvable was wired at declaration.
    fn is_wired(&self) -> bool;

    /// True when at least one override is active.
    fn overridden(&self) -> bool;

    /// Number of active overrides.
    fn override_depth(&self) -> usize;

    /// Clears the override stack unconditionally.
    fn reset_override(&self);

    /// Pops exactly one override, the most recently pushed.
    fn reset_last_overriding(&self) -> DiResult<()>;

    /// Typed view for downcasting back to `Provider<T>`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: ?Sized + Send + Sync + 'static> AnyProvider for Provider<T> {
    fn name(&self) -> &'static str {
        Provider::name(self)
    }

    fn provided_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn is_wired(&self) -> bool {
        Provider::is_wired(self)
    }

    fn overridden(&self) -> bool {
        Provider::overridden(self)
    }

    fn override_depth(&self) -> usize {
        Provider::override_depth(self)
    }

    fn reset_override(&self) {
        Provider::reset_override(self)
    }

    fn reset_last_overriding(&self) -> DiResult<()> {
        Provider::reset_last_overriding(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
