use ecs_inventory::{function_handler, InventoryConfig, InventoryService};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    run(service_fn(|event: LambdaEvent<Value>| async move {
        let config = InventoryConfig::from_env();
        let service = InventoryService::new(&config).await;
        function_handler(event, &service).await
    }))
    .await
}
