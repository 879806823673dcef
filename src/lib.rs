//! MoldMaster: maintenance tracking for injection-mold tooling
//!
//! Records mold inventory, repair logs, spare-part stock levels and the
//! roster of authorized users as JSON files in a local workspace.

pub mod cli;
pub mod core;
pub mod entities;
pub mod services;
pub mod storage;
