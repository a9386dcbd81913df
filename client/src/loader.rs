use estate_map_shared::Dataset;

use crate::error::MapError;

/// Fetch and parse the listings document.
pub async fn fetch_dataset(url: &str) -> Result<Dataset, MapError> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| MapError::Fetch(e.to_string()))?;

    if !resp.ok() {
        return Err(MapError::Status(resp.status()));
    }

    let body = resp
        .text()
        .await
        .map_err(|e| MapError::Fetch(e.to_string()))?;
    parse_dataset(&body)
}

pub fn parse_dataset(body: &str) -> Result<Dataset, MapError> {
    Dataset::from_json(body).map_err(|e| MapError::Parse(e.to_string()))
}
