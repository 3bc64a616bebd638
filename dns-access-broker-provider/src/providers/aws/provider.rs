//! `CrossAccountApi` trait 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::CrossAccountApi;
use crate::types::{AssumeRoleParams, EndpointConfig, Session, TemporaryCredentials};

use super::AwsClient;

#[async_trait]
impl CrossAccountApi for AwsClient {
    fn id(&self) -> &'static str {
        "aws"
    }

    fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    async fn assume_role(&self, params: &AssumeRoleParams) -> Result<TemporaryCredentials> {
        self.sts_assume_role(params).await
    }

    async fn list_hosted_zones(&self, session: &Session, max_items: u32) -> Result<()> {
        self.route53_list_hosted_zones(session, max_items).await
    }

    async fn get_hosted_zone(&self, session: &Session, hosted_zone_id: &str) -> Result<()> {
        self.route53_get_hosted_zone(session, hosted_zone_id).await
    }
}
