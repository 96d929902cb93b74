pub mod config;
pub mod ecs;
pub mod error;
pub mod request;
pub mod response;

use chrono::Utc;
use lambda_runtime::LambdaEvent;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

pub use config::InventoryConfig;
pub use ecs::{EcsApi, EcsClient};
pub use error::InventoryError;
pub use request::Request;
pub use response::{build_response, Response};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct InventoryReport {
    pub running_services: Vec<String>,
    pub failures: Vec<String>,
    pub clusters_scanned: usize,
    pub services_checked: usize,
    pub timestamp: String,
}

pub fn exclude_production(arns: Vec<String>, marker: &str) -> Vec<String> {
    // An empty marker would match every ARN.
    if marker.is_empty() {
        return arns;
    }

    let marker = marker.to_lowercase();
    arns.into_iter()
        .filter(|arn| !arn.to_lowercase().contains(&marker))
        .collect()
}

// arn:aws:ecs:us-east-1:123:service/cluster/web -> web
pub fn service_short_name(arn: &str) -> &str {
    arn.rsplit('/').next().unwrap_or(arn)
}

pub struct InventoryService<C: EcsApi> {
    client: C,
    excluded_marker: String,
}

impl InventoryService<EcsClient> {
    pub async fn new(config: &InventoryConfig) -> Self {
        Self::with_client(EcsClient::from_config(config).await, config)
    }
}

impl<C: EcsApi> InventoryService<C> {
    pub fn with_client(client: C, config: &InventoryConfig) -> Self {
        Self {
            client,
            excluded_marker: config.excluded_marker.clone(),
        }
    }

    pub async fn non_production_clusters(&self) -> Result<Vec<String>, InventoryError> {
        let clusters = self
            .client
            .list_clusters()
            .await
            .inspect_err(|e| error!("{}", e))?;

        Ok(exclude_production(clusters, &self.excluded_marker))
    }

    pub async fn run_inventory(&self) -> Result<InventoryReport, InventoryError> {
        let clusters = self.non_production_clusters().await?;
        info!("Scanning {} non-production clusters", clusters.len());

        let mut running_services = Vec::new();
        let mut failures = Vec::new();
        let mut services_checked = 0;

        for cluster in &clusters {
            let services = match self.client.list_services(cluster).await {
                Ok(services) => services,
                Err(e) => {
                    error!("{}", e);
                    failures.push(e.to_string());
                    continue;
                }
            };

            for service in &services {
                services_checked += 1;
                // Describe failures count as zero running tasks.
                let count = match self.client.running_count(cluster, service).await {
                    Ok(count) => count,
                    Err(e) => {
                        error!("{}; assuming no running tasks", e);
                        failures.push(e.to_string());
                        0
                    }
                };

                if count > 0 {
                    running_services.push(service_short_name(service).to_string());
                }
            }
        }

        Ok(InventoryReport {
            running_services,
            failures,
            clusters_scanned: clusters.len(),
            services_checked,
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}

pub async fn handle_invocation<C: EcsApi>(service: &InventoryService<C>) -> Option<Response> {
    match service.run_inventory().await {
        Ok(report) => {
            if !report.failures.is_empty() {
                warn!(
                    "Inventory completed with {} skipped errors",
                    report.failures.len()
                );
            }
            info!(
                clusters_scanned = report.clusters_scanned,
                services_checked = report.services_checked,
                timestamp = %report.timestamp,
                "Running tasks: {:?}",
                report.running_services
            );
            None
        }
        Err(e) => {
            error!("Inventory failed: {}", e);
            Some(build_response(500, e.to_string()))
        }
    }
}

pub async fn function_handler<C: EcsApi>(
    event: LambdaEvent<Value>,
    service: &InventoryService<C>,
) -> Result<Option<Response>, lambda_runtime::Error> {
    let request = Request::from_event(event.payload);
    debug!(
        request_id = %event.context.request_id,
        "Request payload (not acted upon): {:?}",
        request
    );

    Ok(handle_invocation(service).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::MockEcsApi;

    fn service_with(mock: MockEcsApi) -> InventoryService<MockEcsApi> {
        InventoryService::with_client(mock, &InventoryConfig::default())
    }

    #[test]
    fn test_exclude_production_is_case_insensitive() {
        let arns = vec![
            "arn:aws:ecs:us-east-1:1:cluster/cluster-a".to_string(),
            "arn:aws:ecs:us-east-1:1:cluster/PROD".to_string(),
            "arn:aws:ecs:us-east-1:1:cluster/prod-cluster".to_string(),
            "arn:aws:ecs:us-east-1:1:cluster/Production-prod-1".to_string(),
            "arn:aws:ecs:us-east-1:1:cluster/staging".to_string(),
        ];

        assert_eq!(
            exclude_production(arns, "prod"),
            vec![
                "arn:aws:ecs:us-east-1:1:cluster/cluster-a".to_string(),
                "arn:aws:ecs:us-east-1:1:cluster/staging".to_string(),
            ]
        );
    }

    #[test]
    fn test_exclude_production_custom_marker() {
        let arns = vec!["live-1".to_string(), "dev-1".to_string()];
        assert_eq!(exclude_production(arns, "LIVE"), vec!["dev-1".to_string()]);
    }

    #[test]
    fn test_exclude_production_empty_marker_keeps_all() {
        let arns = vec!["dev".to_string(), "prod".to_string()];
        assert_eq!(exclude_production(arns.clone(), ""), arns);
    }

    #[tokio::test]
    async fn test_empty_marker_scans_every_cluster() {
        let mut mock = MockEcsApi::new();
        mock.expect_list_clusters()
            .returning(|| Ok(vec!["dev".to_string(), "prod".to_string()]));
        mock.expect_list_services().times(2).returning(|_| Ok(Vec::new()));

        let config = InventoryConfig::builder().excluded_marker("").build();
        let service = InventoryService::with_client(mock, &config);

        let report = service.run_inventory().await.unwrap();
        assert_eq!(report.clusters_scanned, 2);
    }

    #[test]
    fn test_service_short_name() {
        assert_eq!(
            service_short_name("arn:aws:ecs:region:acct:service/my-cluster/my-service"),
            "my-service"
        );
        assert_eq!(service_short_name("svc/a"), "a");
        assert_eq!(service_short_name("plain"), "plain");
        assert_eq!(service_short_name("trailing/"), "");
    }

    #[tokio::test]
    async fn test_production_cluster_never_queried() {
        let mut mock = MockEcsApi::new();
        mock.expect_list_clusters()
            .times(1)
            .returning(|| Ok(vec!["c1".to_string(), "prod-c1".to_string()]));
        mock.expect_list_services()
            .times(1)
            .returning(|cluster| {
                assert_eq!(cluster, "c1");
                Ok(vec!["svc/a".to_string()])
            });
        mock.expect_running_count()
            .times(1)
            .returning(|_, _| Ok(2));

        let report = service_with(mock).run_inventory().await.unwrap();
        assert_eq!(report.running_services, vec!["a".to_string()]);
        assert_eq!(report.clusters_scanned, 1);
        assert_eq!(report.services_checked, 1);
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_zero_running_tasks_excluded() {
        let mut mock = MockEcsApi::new();
        mock.expect_list_clusters()
            .returning(|| Ok(vec!["dev".to_string()]));
        mock.expect_list_services()
            .returning(|_| Ok(vec!["svc/busy".to_string(), "svc/idle".to_string()]));
        mock.expect_running_count().returning(|_, service| {
            if service.ends_with("busy") {
                Ok(3)
            } else {
                Ok(0)
            }
        });

        let report = service_with(mock).run_inventory().await.unwrap();
        assert_eq!(report.running_services, vec!["busy".to_string()]);
        assert_eq!(report.services_checked, 2);
    }

    #[tokio::test]
    async fn test_describe_failure_counts_as_zero() {
        let mut mock = MockEcsApi::new();
        mock.expect_list_clusters()
            .returning(|| Ok(vec!["dev".to_string()]));
        mock.expect_list_services()
            .returning(|_| Ok(vec!["svc/broken".to_string()]));
        mock.expect_running_count().returning(|cluster, service| {
            Err(InventoryError::DescribeService {
                cluster: cluster.to_string(),
                service: service.to_string(),
                message: "throttled".to_string(),
            })
        });

        let report = service_with(mock).run_inventory().await.unwrap();
        assert!(report.running_services.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("throttled"));
    }

    #[tokio::test]
    async fn test_list_clusters_failure_returns_500() {
        let mut mock = MockEcsApi::new();
        mock.expect_list_clusters()
            .returning(|| Err(InventoryError::ListClusters("access denied".to_string())));
        mock.expect_list_services().never();

        let response = handle_invocation(&service_with(mock)).await.unwrap();
        assert_eq!(response.status_code, 500);
        assert!(response.body.contains("access denied"));
    }

    #[tokio::test]
    async fn test_success_returns_nothing() {
        let mut mock = MockEcsApi::new();
        mock.expect_list_clusters().returning(|| Ok(Vec::new()));

        assert_eq!(handle_invocation(&service_with(mock)).await, None);
    }
}
