use async_trait::async_trait;
use aws_sdk_ecs::{error::DisplayErrorContext, Client as EcsSdkClient};

use crate::config::InventoryConfig;
use crate::error::InventoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EcsApi: Send + Sync {
    // Listings read a single page.
    async fn list_clusters(&self) -> Result<Vec<String>, InventoryError>;

    async fn list_services(&self, cluster: &str) -> Result<Vec<String>, InventoryError>;

    async fn running_count(&self, cluster: &str, service: &str) -> Result<i32, InventoryError>;
}

pub struct EcsClient {
    client: EcsSdkClient,
}

impl EcsClient {
    pub fn new(client: EcsSdkClient) -> Self {
        Self { client }
    }

    pub async fn from_config(config: &InventoryConfig) -> Self {
        let sdk_config = config.sdk_config().await;
        Self::new(EcsSdkClient::new(&sdk_config))
    }
}

#[async_trait]
impl EcsApi for EcsClient {
    async fn list_clusters(&self) -> Result<Vec<String>, InventoryError> {
        let output = self
            .client
            .list_clusters()
            .send()
            .await
            .map_err(|e| InventoryError::ListClusters(DisplayErrorContext(&e).to_string()))?;

        Ok(output.cluster_arns().to_vec())
    }

    async fn list_services(&self, cluster: &str) -> Result<Vec<String>, InventoryError> {
        let output = self
            .client
            .list_services()
            .cluster(cluster)
            .send()
            .await
            .map_err(|e| InventoryError::ListServices {
                cluster: cluster.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(output.service_arns().to_vec())
    }

    async fn running_count(&self, cluster: &str, service: &str) -> Result<i32, InventoryError> {
        let output = self
            .client
            .describe_services()
            .cluster(cluster)
            .services(service)
            .send()
            .await
            .map_err(|e| InventoryError::DescribeService {
                cluster: cluster.to_string(),
                service: service.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        output
            .services()
            .first()
            .map(|record| record.running_count())
            .ok_or_else(|| InventoryError::MissingServiceRecord {
                cluster: cluster.to_string(),
                service: service.to_string(),
            })
    }
}
