use crate::{
    api::{ApiClient, read_json, unreachable},
    app_error::AppError,
    models::Delivery,
};

pub async fn list_deliveries(client: &ApiClient) -> Result<Vec<Delivery>, AppError> {
    let response = client
        .http()
        .get(client.endpoint("/deliveries"))
        .send()
        .await
        .map_err(unreachable)?;

    read_json(response).await
}
