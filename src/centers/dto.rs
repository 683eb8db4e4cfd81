use serde::{Deserialize, Serialize};

use super::repo_types::Center;

#[derive(Debug, Deserialize)]
pub struct RegisterCenterRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CenterResponse {
    pub message: String,
    #[serde(rename = "tuitionCenter")]
    pub center: Center,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct CenterListResponse {
    #[serde(rename = "tuitionCenters")]
    pub centers: Vec<Center>,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct SingleCenterResponse {
    #[serde(rename = "tuitionCenter")]
    pub center: Center,
    pub success: bool,
}
