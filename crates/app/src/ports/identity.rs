//! Identity port — turns an opaque credential into a [`Principal`].

use std::future::Future;

use hotelhub_domain::error::HotelError;
use hotelhub_domain::principal::Principal;

/// Resolves credentials issued by the identity provider.
pub trait PrincipalResolver {
    /// Validate `credential` and return the principal it stands for.
    ///
    /// Fails with [`HotelError::Auth`] when the credential is unknown or
    /// malformed.
    fn resolve(&self, credential: &str)
    -> impl Future<Output = Result<Principal, HotelError>> + Send;
}

impl<T: PrincipalResolver + Send + Sync> PrincipalResolver for std::sync::Arc<T> {
    fn resolve(
        &self,
        credential: &str,
    ) -> impl Future<Output = Result<Principal, HotelError>> + Send {
        (**self).resolve(credential)
    }
}
