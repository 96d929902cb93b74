use aws_config::{BehaviorVersion, Region, SdkConfig};
use bon::Builder;

pub const DEFAULT_EXCLUDED_MARKER: &str = "prod";

#[derive(Builder, Debug, Clone, PartialEq)]
pub struct InventoryConfig {
    /// Region for the ECS client. `None` defers to the SDK's own provider chain.
    pub region: Option<String>,

    #[builder(into, default = DEFAULT_EXCLUDED_MARKER.to_string())]
    pub excluded_marker: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl InventoryConfig {
    pub fn from_env() -> Self {
        Self::builder()
            .maybe_region(std::env::var("AWS_REGION").ok())
            .build()
    }

    pub async fn sdk_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        loader.load().await
    }
}
