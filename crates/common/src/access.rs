use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::SecretKind;

/// The class of operation a request wants to perform on an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Fetch the current text and content type
    Read,
    /// Replace or append text, or change the content type
    Write,
}

impl Capability {
    /// The kind of secret that grants this capability
    pub fn granted_by(&self) -> SecretKind {
        match self {
            Capability::Read => SecretKind::Public,
            Capability::Write => SecretKind::Private,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Read => write!(f, "read"),
            Capability::Write => write!(f, "write"),
        }
    }
}
