//! Area hierarchy endpoint. Reference data is fetched once per session; the
//! client's response cache serves repeats within the TTL.

use crate::types::AreaCatalog;

use super::client::ApiClient;
use super::wire::{ApiError, StatusEnvelope};

pub async fn catalog(client: &ApiClient) -> Result<AreaCatalog, ApiError> {
    let envelope: StatusEnvelope<AreaCatalog> = client.get_cached("areas").await?;
    envelope.into_data("areas")
}
