//! Route53 只读探测调用

use crate::error::Result;
use crate::providers::common::normalize_hosted_zone_id;
use crate::traits::ErrorContext;
use crate::types::Session;

use super::error::Route53Errors;
use super::http::SignedTarget;
use super::types::{GetHostedZoneResponse, ListHostedZonesResponse};
use super::{AwsClient, ROUTE53_API_VERSION, ROUTE53_SIGNING_REGION};

impl AwsClient {
    /// `ListHostedZones`，最多返回 `max_items` 条
    pub(crate) async fn route53_list_hosted_zones(
        &self,
        session: &Session,
        max_items: u32,
    ) -> Result<()> {
        let endpoints = session.endpoints();
        let target = SignedTarget {
            endpoint: &endpoints.route53_endpoint,
            region: ROUTE53_SIGNING_REGION,
            service: "route53",
        };
        let path = format!("/{ROUTE53_API_VERSION}/hostedzone");
        let query = vec![("maxitems".to_string(), max_items.to_string())];

        let response: ListHostedZonesResponse = self
            .get(
                &Route53Errors,
                &target,
                &session.credentials().as_signing_credentials(),
                &path,
                &query,
                ErrorContext::default(),
            )
            .await?;

        log::debug!(
            "[route53] ListHostedZones returned {} zone(s), truncated={}",
            response.hosted_zones.items.len(),
            response.is_truncated
        );
        Ok(())
    }

    /// `GetHostedZone`，接受 `Z123` 或 `/hostedzone/Z123`
    pub(crate) async fn route53_get_hosted_zone(
        &self,
        session: &Session,
        hosted_zone_id: &str,
    ) -> Result<()> {
        let endpoints = session.endpoints();
        let target = SignedTarget {
            endpoint: &endpoints.route53_endpoint,
            region: ROUTE53_SIGNING_REGION,
            service: "route53",
        };
        let zone_id = normalize_hosted_zone_id(hosted_zone_id);
        let path = format!("/{ROUTE53_API_VERSION}/hostedzone/{zone_id}");
        let ctx = ErrorContext {
            role_arn: None,
            hosted_zone_id: Some(zone_id.to_string()),
        };

        let response: GetHostedZoneResponse = self
            .get(
                &Route53Errors,
                &target,
                &session.credentials().as_signing_credentials(),
                &path,
                &[],
                ctx,
            )
            .await?;

        log::debug!(
            "[route53] GetHostedZone {} -> {}",
            response.hosted_zone.id,
            response.hosted_zone.name
        );
        Ok(())
    }
}
