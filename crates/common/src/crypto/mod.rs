//! Secret tokens for duolink
//!
//! Every entity carries two independent bearer tokens:
//!
//! - **Public secret** (`P…`): grants read access to the entity's text and content type
//! - **Private secret** (`p…`): grants write access (replace, append, retype)
//!
//! # Security Model
//!
//! There are no accounts. Possession of a secret is the whole of the
//! access-control story, so secrets must be:
//! - drawn from the operating system's CSPRNG
//! - long enough that guessing one is infeasible (96 bits)
//! - compared in constant time when a claimed secret is checked
//! - kept out of logs (`Secret` has a redacted `Debug` and no `Display`)
//!
//! The one-character tag keeps the two kinds structurally distinct: a public
//! secret can never equal a private one, even by accident.

mod secret;

pub use secret::{Secret, SecretKind, ENCODED_SECRET_LEN, MAX_SECRET_LEN, SECRET_SIZE};
