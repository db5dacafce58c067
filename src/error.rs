//! Error types for the provider container.

use std::fmt;

/// Provider and container errors
///
/// Represents the error conditions that can occur while wiring containers,
/// resolving providers, or manipulating override stacks in strata-di.
///
/// # Examples
///
/// ```rust
/// use strata_di::{DiError, Provider};
/// use std::sync::Arc;
///
/// // Popping an override that was never pushed
/// let provider = Provider::instance("port", Arc::new(8080u16));
/// match provider.reset_last_overriding() {
///     Err(DiError::EmptyOverrideStack(name)) => {
///         assert_eq!(name, "port");
///     }
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use strata_di::DiError;
///
/// // All errors implement Display
/// let unset = DiError::UnsetBase("api_client");
/// let not_found = DiError::NotFound("service");
/// let circular = DiError::Circular(vec!["a", "b", "a"]);
///
/// println!("Error: {}", unset);
/// println!("Error: {}", not_found);
/// println!("Error: {}", circular);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiError {
    /// `reset_last_overriding` called with no override active
    EmptyOverrideStack(&'static str),
    /// Provider was declared without a base and has no override
    UnsetBase(&'static str),
    /// Container has no provider registered under the requested name
    NotFound(&'static str),
    /// Provider under the requested name holds a different type
    TypeMismatch(&'static str),
    /// Resolution re-entered a provider already being resolved (includes path)
    Circular(Vec<&'static str>),
    /// Maximum resolution nesting exceeded
    DepthExceeded(usize),
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::EmptyOverrideStack(name) => {
                write!(f, "No overriding resolvable to reset on: {}", name)
            }
            DiError::UnsetBase(name) => write!(f, "Provider base is unset: {}", name),
            DiError::NotFound(name) => write!(f, "Provider not found: {}", name),
            DiError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
            DiError::Circular(path) => {
                write!(f, "Circular resolution: {}", path.join(" -> "))
            }
            DiError::DepthExceeded(depth) => write!(f, "Max depth {} exceeded", depth),
        }
    }
}

impl std::error::Error for DiError {}

/// Result type for container operations
///
/// A convenience type alias for `Result<T, DiError>` used throughout
/// strata-di. Factory closures return it so dependency failures propagate
/// with `?` instead of unwinding.
///
/// # Examples
///
/// ```rust
/// use strata_di::{DiResult, DiError};
///
/// fn wire_service() -> DiResult<String> {
///     Ok("wired".to_string())
/// }
///
/// fn failing_lookup() -> DiResult<()> {
///     Err(DiError::NotFound("some_provider"))
/// }
///
/// match wire_service() {
///     Ok(service) => println!("Success: {}", service),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub type DiResult<T> = Result<T, DiError>;
