//! Command implementations

pub mod init;
pub mod login;
pub mod mold;
pub mod part;
pub mod repair;
pub mod status;
pub mod user;
