use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::crypto::{Secret, MAX_SECRET_LEN};

/// Identifier assigned to an entity by the store
pub type EntityId = i64;

/// Separates the entity id from the secret inside a link
pub const LINK_DELIMITER: char = '!';

/// Errors that can occur while decoding a link
///
/// Messages never echo the input; a link carries a secret.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("link is missing the '{}' delimiter", LINK_DELIMITER)]
    MissingDelimiter,
    #[error("link id is not a non-negative integer")]
    InvalidId,
    #[error("link secret is empty")]
    EmptySecret,
    #[error("link contains more than one delimiter")]
    ExtraDelimiter,
    #[error("link secret exceeds {} characters", MAX_SECRET_LEN)]
    SecretTooLong,
    #[error("site root cannot carry path segments")]
    CannotBeABase,
}

/// An `(entity id, secret)` pair, encoded as the URL path segment `{id}!{secret}`
///
/// ```
/// use common::prelude::{Link, Secret, SecretKind};
///
/// let secret = Secret::generate(SecretKind::Public);
/// let link = Link::new(42, secret.clone());
///
/// let encoded = link.to_string();
/// assert!(encoded.starts_with("42!P"));
///
/// let decoded: Link = encoded.parse().unwrap();
/// assert_eq!(decoded.id(), 42);
/// assert_eq!(decoded.secret(), &secret);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    id: EntityId,
    secret: Secret,
}

impl Link {
    pub fn new(id: EntityId, secret: Secret) -> Self {
        Self { id, secret }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn into_parts(self) -> (EntityId, Secret) {
        (self.id, self.secret)
    }

    /// Render the link as an absolute URL below `site_root`
    ///
    /// The encoded link becomes the last path segment, so a root of
    /// `https://example.com/paste` yields `https://example.com/paste/{id}!{secret}`.
    pub fn to_url(&self, site_root: &Url) -> Result<Url, LinkError> {
        let mut url = site_root.clone();
        url.path_segments_mut()
            .map_err(|_| LinkError::CannotBeABase)?
            .pop_if_empty()
            .push(&self.to_string());
        Ok(url)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.id, LINK_DELIMITER, self.secret.as_str())
    }
}

impl FromStr for Link {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, secret) = s
            .split_once(LINK_DELIMITER)
            .ok_or(LinkError::MissingDelimiter)?;

        // digits only: rejects signs, whitespace and hex
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LinkError::InvalidId);
        }
        let id = id.parse::<EntityId>().map_err(|_| LinkError::InvalidId)?;

        if secret.is_empty() {
            return Err(LinkError::EmptySecret);
        }
        if secret.contains(LINK_DELIMITER) {
            return Err(LinkError::ExtraDelimiter);
        }
        if secret.len() > MAX_SECRET_LEN {
            return Err(LinkError::SecretTooLong);
        }

        Ok(Self::new(id, Secret::from(secret)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::SecretKind;

    #[test]
    fn test_encode_format() {
        let link = Link::new(7, Secret::from("Pabc"));
        assert_eq!(link.to_string(), "7!Pabc");
    }

    #[test]
    fn test_decode_valid() {
        let link: Link = "123!pSomeSecret_-".parse().unwrap();
        assert_eq!(link.id(), 123);
        assert_eq!(link.secret().as_str(), "pSomeSecret_-");
        assert_eq!(link.secret().kind(), Some(SecretKind::Private));
    }

    #[test]
    fn test_decode_zero_id() {
        let link: Link = "0!Px".parse().unwrap();
        assert_eq!(link.id(), 0);
    }

    #[test]
    fn test_decode_failures() {
        assert_eq!(
            "12Pabc".parse::<Link>().unwrap_err(),
            LinkError::MissingDelimiter
        );
        assert_eq!("".parse::<Link>().unwrap_err(), LinkError::MissingDelimiter);
        assert_eq!("!Pabc".parse::<Link>().unwrap_err(), LinkError::InvalidId);
        assert_eq!("abc!Pabc".parse::<Link>().unwrap_err(), LinkError::InvalidId);
        assert_eq!("-1!Pabc".parse::<Link>().unwrap_err(), LinkError::InvalidId);
        assert_eq!("+1!Pabc".parse::<Link>().unwrap_err(), LinkError::InvalidId);
        assert_eq!("0x1f!Pabc".parse::<Link>().unwrap_err(), LinkError::InvalidId);
        assert_eq!(
            "99999999999999999999!Pabc".parse::<Link>().unwrap_err(),
            LinkError::InvalidId
        );
        assert_eq!("5!".parse::<Link>().unwrap_err(), LinkError::EmptySecret);
        assert_eq!(
            "5!Pab!c".parse::<Link>().unwrap_err(),
            LinkError::ExtraDelimiter
        );
        let long = format!("5!P{}", "a".repeat(MAX_SECRET_LEN));
        assert_eq!(
            long.parse::<Link>().unwrap_err(),
            LinkError::SecretTooLong
        );
    }

    #[test]
    fn test_to_url() {
        let link = Link::new(3, Secret::from("Pxyz"));

        let root = Url::parse("https://example.com").unwrap();
        assert_eq!(
            link.to_url(&root).unwrap().as_str(),
            "https://example.com/3!Pxyz"
        );

        let nested = Url::parse("https://example.com/paste/").unwrap();
        assert_eq!(
            link.to_url(&nested).unwrap().as_str(),
            "https://example.com/paste/3!Pxyz"
        );

        let opaque = Url::parse("mailto:someone@example.com").unwrap();
        assert_eq!(link.to_url(&opaque).unwrap_err(), LinkError::CannotBeABase);
    }

    #[test]
    fn test_debug_hides_secret() {
        let secret = Secret::generate(SecretKind::Private);
        let link = Link::new(1, secret.clone());
        assert!(!format!("{:?}", link).contains(secret.as_str()));
    }
}
