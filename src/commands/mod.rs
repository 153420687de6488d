//! Command implementations for Modsync CLI

pub mod completions;
pub mod init;
pub mod list;
pub mod sync;
pub mod version;
