use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

pub fn build_response(status_code: u16, message: impl Into<String>) -> Response {
    let body = json!({ "message": message.into() });
    Response {
        status_code,
        body: body.to_string(),
    }
}
