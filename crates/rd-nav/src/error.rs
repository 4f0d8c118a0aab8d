//! Navigation error types.

use rd_content::RegistryError;

/// Error returned when a [`Resolver`](crate::Resolver) cannot be built.
///
/// Resolution itself never fails; these errors only reject inconsistent
/// configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// The configured default slug is not a page in the registry.
    #[error("Default page '{0}' is not in the docs registry")]
    UnknownDefaultSlug(String),
    /// The configured fallback section key names no section.
    #[error("Fallback section '{0}' is not a section key in the docs registry")]
    UnknownFallbackSection(String),
    /// A section key equals the reserved anchor key.
    #[error("Section key '{0}' collides with the reserved anchor query key")]
    ReservedKeyCollision(String),
    /// Registry could not be built.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
