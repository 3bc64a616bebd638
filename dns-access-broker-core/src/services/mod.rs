//! 业务逻辑服务层

mod access_setup_service;
mod access_verifier;
mod error_classifier;
mod role_assumer;

pub use access_setup_service::{
    AccessSetupService, ASSUME_ROLE_FAILED_PREFIX, VERIFY_ACCESS_FAILED_PREFIX,
};
pub use access_verifier::AccessVerifier;
pub use error_classifier::{ErrorClassifier, Operation};
pub use role_assumer::RoleAssumer;
