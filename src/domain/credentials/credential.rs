/// An (identity, secret) pair used for Basic authentication
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    identity: String,
    secret: String,
}

impl Credential {
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Split into (identity, secret)
    pub fn into_parts(self) -> (String, String) {
        (self.identity, self.secret)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("identity", &self.identity)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let credential = Credential::new("a@x.com", "hunter2");
        let debug = format!("{:?}", credential);

        assert!(debug.contains("a@x.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_into_parts() {
        let (identity, secret) = Credential::new("a@x.com", "hunter2").into_parts();
        assert_eq!(identity, "a@x.com");
        assert_eq!(secret, "hunter2");
    }
}
