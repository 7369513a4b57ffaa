use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HomeResponse {
    #[serde(rename = "Hello")]
    pub hello: &'static str,
}

/// GET / -- static greeting.
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse { hello: "World" })
}
