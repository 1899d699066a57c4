use subtle::ConstantTimeEq;

use crate::config::AuthConfig;
use crate::traits::IdentityProvider;

/// Accepts exactly one configured username/password pair.
#[derive(Debug, Clone)]
pub struct StaticIdentityProvider {
    config: AuthConfig,
}

impl StaticIdentityProvider {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn verify(&self, username: &str, password: &str) -> bool {
        // Both comparisons run regardless of the first result.
        let user = username
            .as_bytes()
            .ct_eq(self.config.username.as_bytes());
        let pass = password
            .as_bytes()
            .ct_eq(self.config.password.as_bytes());
        (user & pass).into()
    }
}
