use std::fmt;
use std::hash::{Hash, Hasher};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// Number of random bytes drawn for each secret
pub const SECRET_SIZE: usize = 12;
/// Length of a generated secret: one tag character plus unpadded base64
pub const ENCODED_SECRET_LEN: usize = 1 + (SECRET_SIZE * 4 + 2) / 3;
/// Upper bound on the length of a stored or claimed secret string
pub const MAX_SECRET_LEN: usize = 32;

const PUBLIC_TAG: char = 'P';
const PRIVATE_TAG: char = 'p';

/// Which of an entity's two secrets a token is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretKind {
    Public,
    Private,
}

impl SecretKind {
    /// The leading character that marks a secret of this kind
    pub fn tag(&self) -> char {
        match self {
            SecretKind::Public => PUBLIC_TAG,
            SecretKind::Private => PRIVATE_TAG,
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            PUBLIC_TAG => Some(SecretKind::Public),
            PRIVATE_TAG => Some(SecretKind::Private),
            _ => None,
        }
    }
}

/// An opaque bearer token
///
/// Generated secrets are a kind tag followed by the URL-safe, unpadded base64
/// encoding of [`SECRET_SIZE`] random bytes, e.g. `PqZ3x0c1Tn8mYwL2a`. The
/// alphabet (`A-Z a-z 0-9 - _`) never contains the link delimiter `!`.
///
/// Secrets claimed by a client are wrapped verbatim with [`Secret::from`]; the
/// store only ever compares them against stored values, never interprets them.
///
/// Equality is constant-time.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    /// Generate a new random secret of the given kind using a cryptographically secure RNG
    ///
    /// # Panics
    ///
    /// Panics if the operating system RNG is unavailable. There is no safe way
    /// to keep issuing links without it.
    pub fn generate(kind: SecretKind) -> Self {
        let mut bytes = [0u8; SECRET_SIZE];
        getrandom::getrandom(&mut bytes).expect("failed to generate random bytes");

        let mut encoded = String::with_capacity(ENCODED_SECRET_LEN);
        encoded.push(kind.tag());
        URL_SAFE_NO_PAD.encode_string(bytes, &mut encoded);
        Self(encoded)
    }

    /// The kind indicated by the secret's tag, if it carries a known one
    pub fn kind(&self) -> Option<SecretKind> {
        self.0.chars().next().and_then(SecretKind::from_tag)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compare two secrets without short-circuiting on the first differing byte
    ///
    /// Secrets of different lengths compare unequal.
    pub fn ct_eq(&self, other: &Secret) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other)
    }
}

impl Eq for Secret {}

impl Hash for Secret {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("kind", &self.kind())
            .field("value", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_generated_secret_shape() {
        let public = Secret::generate(SecretKind::Public);
        let private = Secret::generate(SecretKind::Private);

        assert_eq!(public.len(), ENCODED_SECRET_LEN);
        assert_eq!(private.len(), ENCODED_SECRET_LEN);
        assert!(public.len() <= MAX_SECRET_LEN);

        assert!(public.as_str().starts_with('P'));
        assert!(private.as_str().starts_with('p'));
        assert_eq!(public.kind(), Some(SecretKind::Public));
        assert_eq!(private.kind(), Some(SecretKind::Private));
    }

    #[test]
    fn test_generated_secret_alphabet_excludes_delimiter() {
        for _ in 0..256 {
            let secret = Secret::generate(SecretKind::Private);
            assert!(secret
                .as_str()
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
        }
    }

    #[test]
    fn test_independent_draws_differ() {
        let a = Secret::generate(SecretKind::Public);
        let b = Secret::generate(SecretKind::Public);
        assert_ne!(a, b);
    }

    #[test]
    fn test_constant_time_equality() {
        let secret = Secret::generate(SecretKind::Public);
        let same = Secret::from(secret.as_str());
        assert!(secret.ct_eq(&same));
        assert_eq!(secret, same);

        // prefix of the real secret must not match
        let prefix = Secret::from(&secret.as_str()[..secret.len() - 1]);
        assert!(!secret.ct_eq(&prefix));

        assert!(!secret.ct_eq(&Secret::from("")));
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(Secret::from("xyz").kind(), None);
        assert_eq!(Secret::from("").kind(), None);
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = Secret::generate(SecretKind::Private);
        let debug = format!("{:?}", secret);
        assert!(!debug.contains(secret.as_str()));
        assert!(debug.contains("redacted"));
    }
}
