//! 表彰服务：发送表彰、月度排行榜、仪表盘聚合。

use super::{ApiClient, ApiError, into_json};
use kudos_shared::{CreateRecognitionRequest, DashboardData, RankingsResponse};

pub async fn create_recognition(
    api: &ApiClient,
    payload: &CreateRecognitionRequest,
) -> Result<(), ApiError> {
    api.post_json("/recognitions", payload).await?;
    Ok(())
}

/// GET /rankings?month=..&year=..
pub async fn fetch_rankings(
    api: &ApiClient,
    month: u32,
    year: i32,
) -> Result<RankingsResponse, ApiError> {
    let response = api
        .get(&format!("/rankings?month={}&year={}", month, year))
        .await?;
    into_json(response).await
}

pub async fn fetch_dashboard(api: &ApiClient) -> Result<DashboardData, ApiError> {
    let response = api.get("/recognitions/dashboard").await?;
    into_json(response).await
}
