use api_types::shipment::Shipment;

use super::{Client, retry_once};
use crate::error::Result;

impl Client {
    pub async fn list_shipments(&self) -> Result<Vec<Shipment>> {
        let url = self.shipments_url();
        retry_once("list shipments", || self.get_json(&url)).await
    }

    /// Asks the backend for a new shipment; the backend assigns its id.
    pub async fn create_shipment(&self) -> Result<Shipment> {
        self.post_json::<(), _>(&self.shipments_url(), None).await
    }

    pub async fn delete_shipment(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}/{id}", self.shipments_url())).await
    }
}
