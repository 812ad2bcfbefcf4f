use crate::digest::{digest, is_digest};
use crate::error::AuthError;
use zeroize::Zeroizing;

/// The stored credential pair, as digests.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    username_digest: String,
    password_digest: String,
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CredentialRecord(..)")
    }
}

impl CredentialRecord {
    /// Digests a plaintext pair. The plaintext is not retained.
    #[must_use]
    pub fn from_plaintext(username: &str, password: &str) -> Self {
        Self { username_digest: digest(username), password_digest: digest(password) }
    }

    #[must_use]
    pub fn username_digest(&self) -> &str {
        &self.username_digest
    }

    #[must_use]
    pub fn password_digest(&self) -> &str {
        &self.password_digest
    }

    #[must_use]
    pub fn matches_username(&self, candidate: &str) -> bool {
        digest(candidate) == self.username_digest
    }

    #[must_use]
    pub fn matches_password(&self, candidate: &str) -> bool {
        digest(candidate) == self.password_digest
    }

    /// `"{username_digest}:{password_digest}"`, the plaintext of the envelope.
    #[must_use]
    pub fn to_text(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("{}:{}", self.username_digest, self.password_digest))
    }

    /// Parses the envelope plaintext.
    ///
    /// # Errors
    /// Returns [`AuthError::CorruptRecord`] unless `text` is exactly two lowercase hex SHA-256
    /// digests joined by `:`.
    pub fn parse(text: &str) -> Result<Self, AuthError> {
        let Some((user, pass)) = text.split_once(':') else {
            return Err(AuthError::CorruptRecord {
                message: "missing ':' separator".into(),
                context: None,
            });
        };

        if !is_digest(user) || !is_digest(pass) {
            return Err(AuthError::CorruptRecord {
                message: "fields are not SHA-256 hex digests".into(),
                context: None,
            });
        }

        Ok(Self { username_digest: user.to_owned(), password_digest: pass.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trip() {
        let record = CredentialRecord::from_plaintext("alice", "pw123!");
        let parsed = CredentialRecord::parse(&record.to_text()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_text_never_contains_plaintext() {
        let record = CredentialRecord::from_plaintext("alice", "pw123!");
        let text = record.to_text();
        assert!(!text.contains("alice"));
        assert!(!text.contains("pw123!"));
        assert_eq!(text.len(), 64 + 1 + 64);
    }

    #[test]
    fn test_matching() {
        let record = CredentialRecord::from_plaintext("alice", "pw123!");
        assert!(record.matches_username("alice"));
        assert!(!record.matches_username("bob"));
        assert!(record.matches_password("pw123!"));
        assert!(!record.matches_password("wrong"));
    }

    #[test]
    fn test_malformed_text_is_corrupt() {
        let good = digest("x");
        for bad in [
            String::new(),
            good.clone(),
            format!("{good}:"),
            format!("{good}:{good}:{good}"),
            format!("{}:{good}", good.to_uppercase()),
        ] {
            assert!(
                matches!(CredentialRecord::parse(&bad), Err(AuthError::CorruptRecord { .. })),
                "'{bad}' must be rejected"
            );
        }
    }

    #[test]
    fn test_debug_hides_digests() {
        let record = CredentialRecord::from_plaintext("alice", "pw123!");
        assert!(!format!("{record:?}").contains(record.username_digest()));
    }
}
