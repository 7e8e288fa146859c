use serde::{Deserialize, Serialize};

/// Response to a successful run creation
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct CreatedRun {
    pub id: i32,
}

/// Response to any failed API request
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}
