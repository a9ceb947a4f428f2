pub mod args;
pub mod op;
pub mod ops;

pub use ops::{Append, Create, Daemon, Health, Init, Read, Retype, Version, Write};
