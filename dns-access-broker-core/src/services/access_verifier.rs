//! 两阶段只读 Route53 访问验证

use std::sync::Arc;

use chrono::Utc;

use dns_access_broker_provider::{CrossAccountApi, Session};

use crate::error::{CoreError, Diagnostic};
use crate::services::{ErrorClassifier, Operation};

/// Confirms an assumed identity can actually act on a hosted zone.
///
/// Stage 1 lists zones (`maxitems` = probe size) to separate "no Route53
/// permissions at all" from a zone-specific problem; stage 2 fetches the exact
/// zone. A failing stage short-circuits. Never issues writes.
pub struct AccessVerifier {
    api: Arc<dyn CrossAccountApi>,
    max_probe_items: u32,
}

impl AccessVerifier {
    /// 创建验证器
    #[must_use]
    pub fn new(api: Arc<dyn CrossAccountApi>, max_probe_items: u32) -> Self {
        Self {
            api,
            max_probe_items: max_probe_items.max(1),
        }
    }

    /// Runs both probes with `session`'s credentials.
    ///
    /// A missing or already-expired session, or a blank zone id, fails without
    /// any network call.
    pub async fn verify_access(
        &self,
        session: Option<&Session>,
        hosted_zone_id: &str,
    ) -> Result<(), Diagnostic> {
        let Some(session) = session else {
            return Err(ErrorClassifier::no_session());
        };
        if session.is_expired_at(Utc::now()) {
            return Err(ErrorClassifier::session_expired(session.expires_at()));
        }
        let hosted_zone_id = hosted_zone_id.trim();
        if hosted_zone_id.is_empty() {
            return Err(
                CoreError::ValidationError("hostedZoneId must not be empty".to_string()).into(),
            );
        }

        // Stage 1: coarse probe
        log::debug!("Probing Route53 list zones (maxitems={})", self.max_probe_items);
        self.api
            .list_hosted_zones(session, self.max_probe_items)
            .await
            .map_err(|e| ErrorClassifier::classify(&e, Operation::ListZones))?;

        // Stage 2: targeted probe
        log::debug!("Probing Route53 hosted zone {hosted_zone_id}");
        self.api
            .get_hosted_zone(session, hosted_zone_id)
            .await
            .map_err(|e| ErrorClassifier::classify(&e, Operation::GetZone))?;

        Ok(())
    }
}
