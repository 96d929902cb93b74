#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InventoryError {
    #[error("Failed to list clusters: {0}")]
    ListClusters(String),
    #[error("Failed to list services in cluster {cluster}: {message}")]
    ListServices { cluster: String, message: String },
    #[error("Failed to describe service {service} in cluster {cluster}: {message}")]
    DescribeService {
        cluster: String,
        service: String,
        message: String,
    },
    #[error("No record returned for service {service} in cluster {cluster}")]
    MissingServiceRecord { cluster: String, service: String },
}
