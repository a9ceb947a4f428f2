pub mod append;
pub mod create;
pub mod daemon;
pub mod health;
pub mod init;
pub mod read;
pub mod retype;
pub mod version;
pub mod write;

pub use append::Append;
pub use create::Create;
pub use daemon::Daemon;
pub use health::Health;
pub use init::Init;
pub use read::Read;
pub use retype::Retype;
pub use version::Version;
pub use write::Write;
