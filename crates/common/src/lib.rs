/**
 * Capability grants.
 *  - Read vs. write, and the kind of secret
 *    that unlocks each of them
 */
pub mod access;
/**
 * Bearer-token primitives.
 *  - Random, tagged, URL-safe secrets
 *  - Constant-time comparison
 */
pub mod crypto;
/**
 * The `{id}!{secret}` path segment that
 *  addresses an entity together with one
 *  of its secrets.
 */
pub mod link;
/**
 * Helper for reporting build version information.
 */
pub mod version;

pub mod prelude {
    pub use crate::access::Capability;
    pub use crate::crypto::{Secret, SecretKind, MAX_SECRET_LEN, SECRET_SIZE};
    pub use crate::link::{EntityId, Link, LinkError};
    pub use crate::version::build_info;
}
