//! Type definition module

mod access;
mod config;
mod request;

pub use access::AccessResult;
pub use config::AccessConfig;
pub use request::RoleAssumptionRequest;
