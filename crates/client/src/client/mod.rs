mod calculations;
mod shipments;

use std::future::Future;

use api_types::{
    calculation::{Calculation, CalculationNew},
    shipment::Shipment,
};
use reqwest::{Response, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ClientError, Result};

/// Collection endpoint every resource path is rooted at.
pub const SHIPMENTS_PATH: &str = "api/profit/shipments";

/// Backend operations the views depend on.
///
/// [`Client`] talks to the real backend; tests drive the views with an
/// in-memory implementation.
pub trait ProfitApi {
    fn list_shipments(&self) -> impl Future<Output = Result<Vec<Shipment>>> + Send;
    fn create_shipment(&self) -> impl Future<Output = Result<Shipment>> + Send;
    fn delete_shipment(&self, id: i64) -> impl Future<Output = Result<()>> + Send;
    fn list_calculations(
        &self,
        shipment_id: i64,
    ) -> impl Future<Output = Result<Vec<Calculation>>> + Send;
    fn create_calculation(
        &self,
        shipment_id: i64,
        payload: CalculationNew,
    ) -> impl Future<Output = Result<Calculation>> + Send;
    fn delete_calculation(
        &self,
        shipment_id: i64,
        calculation_id: i64,
    ) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|err| ClientError::Client(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn shipments_url(&self) -> String {
        self.url(SHIPMENTS_PATH)
    }

    fn calculations_url(&self, shipment_id: i64) -> String {
        self.url(&format!("{SHIPMENTS_PATH}/{shipment_id}/calculations"))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("GET {url}");
        let res = self.http.get(url).send().await?;
        decode(res).await
    }

    async fn post_json<B, T>(&self, url: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("POST {url}");
        let mut req = self.http.post(url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let res = req.send().await?;
        decode(res).await
    }

    async fn delete(&self, url: &str) -> Result<()> {
        tracing::debug!("DELETE {url}");
        let res = self.http.delete(url).send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(());
        }
        Err(ClientError::server(status))
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json::<T>().await?);
    }
    Err(ClientError::server(status))
}

/// Runs `call`, and runs it once more if the first attempt fails.
///
/// Only the outcome of the last attempt reaches the caller, so a recovered
/// read yields its payload exactly once.
async fn retry_once<T, F, Fut>(operation: &str, mut call: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match call().await {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::warn!("{operation} failed, retrying once: {err}");
            call().await
        }
    }
}

impl ProfitApi for Client {
    async fn list_shipments(&self) -> Result<Vec<Shipment>> {
        Client::list_shipments(self).await
    }

    async fn create_shipment(&self) -> Result<Shipment> {
        Client::create_shipment(self).await
    }

    async fn delete_shipment(&self, id: i64) -> Result<()> {
        Client::delete_shipment(self, id).await
    }

    async fn list_calculations(&self, shipment_id: i64) -> Result<Vec<Calculation>> {
        Client::list_calculations(self, shipment_id).await
    }

    async fn create_calculation(
        &self,
        shipment_id: i64,
        payload: CalculationNew,
    ) -> Result<Calculation> {
        Client::create_calculation(self, shipment_id, payload).await
    }

    async fn delete_calculation(&self, shipment_id: i64, calculation_id: i64) -> Result<()> {
        Client::delete_calculation(self, shipment_id, calculation_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        let err = Client::new("not a url").unwrap_err();
        assert!(err.to_string().starts_with("Client Error: invalid base_url"));
    }

    #[test]
    fn joins_paths_without_double_slashes() {
        let client = Client::new("http://127.0.0.1:8080/").unwrap();
        assert_eq!(
            client.shipments_url(),
            "http://127.0.0.1:8080/api/profit/shipments"
        );
        assert_eq!(
            client.calculations_url(7),
            "http://127.0.0.1:8080/api/profit/shipments/7/calculations"
        );
    }

    #[tokio::test]
    async fn retry_once_stops_after_second_failure() {
        let attempts = &AtomicUsize::new(0);
        let res: Result<()> = retry_once("op", move || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(ClientError::Client("down".to_string()))
        })
        .await;
        assert!(res.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn retry_once_skips_retry_on_success() {
        let attempts = &AtomicUsize::new(0);
        let res = retry_once("op", move || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Ok(5)
        })
        .await;
        assert_eq!(res, Ok(5));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
