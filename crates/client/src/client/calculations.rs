use api_types::calculation::{Calculation, CalculationNew};

use super::{Client, retry_once};
use crate::error::Result;

impl Client {
    pub async fn list_calculations(&self, shipment_id: i64) -> Result<Vec<Calculation>> {
        let url = self.calculations_url(shipment_id);
        retry_once("list calculations", || self.get_json(&url)).await
    }

    pub async fn create_calculation(
        &self,
        shipment_id: i64,
        payload: CalculationNew,
    ) -> Result<Calculation> {
        self.post_json(&self.calculations_url(shipment_id), Some(&payload))
            .await
    }

    pub async fn delete_calculation(&self, shipment_id: i64, calculation_id: i64) -> Result<()> {
        self.delete(&format!(
            "{}/{calculation_id}",
            self.calculations_url(shipment_id)
        ))
        .await
    }
}
