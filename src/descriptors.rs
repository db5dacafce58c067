//! Provider descriptors for introspection and diagnostics.

/// Snapshot of one provider's declaration and override state
///
/// Produced by [`Container::describe`](crate::Container::describe) in
/// declaration order. Useful for debugging a container's wiring, asserting
/// that a test harness restored every provider, or exporting container state.
///
/// # Examples
///
/// ```rust
/// use strata_di::{ContainerBuilder, Provider};
/// use std::sync::Arc;
///
/// let mut builder = ContainerBuilder::new("app");
/// builder.instance("port", Arc::new(8080u16));
/// builder.placeholder::<String>("hostname");
///
/// let container = builder.instantiate().unwrap();
/// let descriptors = container.describe();
///
/// assert_eq!(descriptors[0].name, "port");
/// assert!(descriptors[0].wired);
/// assert!(!descriptors[0].overridden());
///
/// assert_eq!(descriptors[1].name, "hostname");
/// assert!(!descriptors[1].wired);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProviderDescriptor {
    /// Provider name within its container
    pub name: &'static str,
    /// `std::any::type_name` of the provided type
    pub type_name: &'static str,
    /// Whether a base resolvable was wired at declaration
    pub wired: bool,
    /// Number of overrides active when the snapshot was taken
    pub override_depth: usize,
}

impl ProviderDescriptor {
    /// True when the snapshot saw at least one active override.
    pub fn overridden(&self) -> bool {
        self.override_depth > 0
    }
}
