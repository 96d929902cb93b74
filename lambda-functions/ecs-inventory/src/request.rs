use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Request {
    pub desired_tasks: Option<i64>,
    pub cluster_names: Option<String>,
    pub environment: Option<String>,
}

impl Request {
    // API Gateway proxy events carry the JSON as text under `body`.
    pub fn from_event(event: Value) -> Self {
        let parsed = event
            .get("body")
            .and_then(Value::as_str)
            .and_then(|text| serde_json::from_str::<Value>(text).ok());
        let body = parsed.unwrap_or(event);

        serde_json::from_value(body).unwrap_or_default()
    }

    pub fn desired_tasks(&self) -> Option<i64> {
        self.desired_tasks
    }

    pub fn cluster_names(&self) -> Option<Vec<String>> {
        self.cluster_names.as_deref().map(split_list)
    }

    pub fn environments(&self) -> Option<Vec<String>> {
        self.environment.as_deref().map(split_list)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}
