//! Role assumption request

use crate::error::{CoreError, CoreResult};

/// Identifies the DNS-account role to assume.
///
/// Immutable once built; all fields are guaranteed non-empty. Whether the
/// external id matches the role's trust policy is only known to AWS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssumptionRequest {
    dns_account_id: String,
    dns_role_name: String,
    external_id: String,
}

impl RoleAssumptionRequest {
    /// Validates and builds a request. Surrounding whitespace is trimmed.
    pub fn new(
        dns_account_id: impl Into<String>,
        dns_role_name: impl Into<String>,
        external_id: impl Into<String>,
    ) -> CoreResult<Self> {
        Ok(Self {
            dns_account_id: non_empty("dnsAccountId", dns_account_id.into())?,
            dns_role_name: non_empty("dnsRoleName", dns_role_name.into())?,
            external_id: non_empty("externalId", external_id.into())?,
        })
    }

    /// DNS account id.
    pub fn dns_account_id(&self) -> &str {
        &self.dns_account_id
    }

    /// Role name inside the DNS account.
    pub fn dns_role_name(&self) -> &str {
        &self.dns_role_name
    }

    /// External id expected by the role's trust policy.
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    /// `arn:aws:iam::{account}:role/{name}`
    pub fn role_arn(&self) -> String {
        format!(
            "arn:aws:iam::{}:role/{}",
            self.dns_account_id, self.dns_role_name
        )
    }
}

fn non_empty(field: &str, value: String) -> CoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError(format!(
            "{field} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}
