//! Fixed bearer-token table.

use std::collections::HashMap;
use std::future::Future;

use hotelhub_app::ports::PrincipalResolver;
use hotelhub_domain::error::{AuthError, HotelError};
use hotelhub_domain::principal::Principal;

/// Resolves opaque tokens against a table loaded at startup.
#[derive(Debug, Default, Clone)]
pub struct StaticTokenResolver {
    tokens: HashMap<String, Principal>,
}

impl StaticTokenResolver {
    /// Register `token` for `principal`, replacing any previous holder.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, principal: Principal) -> Self {
        self.tokens.insert(token.into(), principal);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<T: Into<String>> FromIterator<(T, Principal)> for StaticTokenResolver {
    fn from_iter<I: IntoIterator<Item = (T, Principal)>>(iter: I) -> Self {
        Self {
            tokens: iter
                .into_iter()
                .map(|(token, principal)| (token.into(), principal))
                .collect(),
        }
    }
}

impl PrincipalResolver for StaticTokenResolver {
    fn resolve(
        &self,
        credential: &str,
    ) -> impl Future<Output = Result<Principal, HotelError>> + Send {
        let result = if credential.trim().is_empty() {
            Err(AuthError::MissingCredential.into())
        } else {
            self.tokens
                .get(credential)
                .copied()
                .ok_or_else(|| AuthError::InvalidCredential.into())
        };
        async move { result }
    }
}
