//! Application ports
//!
//! Contracts the application consumes from outer layers.

use async_trait::async_trait;

use tasktrack_domain::value_objects::UserId;

use crate::errors::ApplicationResult;

/// Resolves a request credential (session cookie, bearer token) to a user
///
/// Token signing, verification and password hashing live behind this port.
/// Failures should surface as `ApplicationError::Unauthenticated`.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, credential: &str) -> ApplicationResult<UserId>;
}
