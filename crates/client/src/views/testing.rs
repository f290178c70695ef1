use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use api_types::{
    calculation::{Calculation, CalculationNew},
    shipment::Shipment,
};

use crate::{
    client::ProfitApi,
    error::{ClientError, Result},
    notification::{Notification, NotificationKind, Notifier},
};

/// In-memory backend that records every call it receives.
#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

#[derive(Default)]
pub(crate) struct FakeState {
    pub shipments: Vec<Shipment>,
    pub calculations: Vec<Calculation>,
    pub next_id: i64,
    /// Returned (once) by the next call instead of doing any work.
    pub fail_next: Option<ClientError>,
    /// Makes every call hang forever.
    pub hang: bool,
    pub calls: Vec<String>,
}

impl FakeApi {
    pub fn with_shipments(ids: &[i64]) -> Self {
        let api = Self::default();
        {
            let mut state = api.state();
            state.shipments = ids.iter().map(|&id| Shipment { id }).collect();
            state.next_id = ids.iter().copied().max().unwrap_or(0);
        }
        api
    }

    pub fn add_calculation(&self, shipment_id: i64, income: f64, cost: f64) -> i64 {
        let mut state = self.state();
        state.next_id += 1;
        let id = state.next_id;
        state.calculations.push(Calculation {
            id,
            shipment_id,
            income,
            cost,
            profit_or_loss: income - cost,
        });
        id
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    async fn begin(&self, call: String) -> Result<()> {
        let hang = self.state().hang;
        if hang {
            std::future::pending::<()>().await;
        }
        let mut state = self.state();
        state.calls.push(call);
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl ProfitApi for FakeApi {
    async fn list_shipments(&self) -> Result<Vec<Shipment>> {
        self.begin("list_shipments".to_string()).await?;
        Ok(self.state().shipments.clone())
    }

    async fn create_shipment(&self) -> Result<Shipment> {
        self.begin("create_shipment".to_string()).await?;
        let mut state = self.state();
        state.next_id += 1;
        let shipment = Shipment { id: state.next_id };
        state.shipments.push(shipment);
        Ok(shipment)
    }

    async fn delete_shipment(&self, id: i64) -> Result<()> {
        self.begin(format!("delete_shipment {id}")).await?;
        let mut state = self.state();
        state.shipments.retain(|s| s.id != id);
        state.calculations.retain(|c| c.shipment_id != id);
        Ok(())
    }

    async fn list_calculations(&self, shipment_id: i64) -> Result<Vec<Calculation>> {
        self.begin(format!("list_calculations {shipment_id}"))
            .await?;
        Ok(self
            .state()
            .calculations
            .iter()
            .filter(|c| c.shipment_id == shipment_id)
            .cloned()
            .collect())
    }

    async fn create_calculation(
        &self,
        shipment_id: i64,
        payload: CalculationNew,
    ) -> Result<Calculation> {
        self.begin(format!("create_calculation {shipment_id}"))
            .await?;
        let id = self.add_calculation(shipment_id, payload.income, payload.cost);
        let state = self.state();
        state
            .calculations
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ClientError::Client("lost calculation".to_string()))
    }

    async fn delete_calculation(&self, shipment_id: i64, calculation_id: i64) -> Result<()> {
        self.begin(format!("delete_calculation {shipment_id}/{calculation_id}"))
            .await?;
        self.state().calculations.retain(|c| c.id != calculation_id);
        Ok(())
    }
}

/// Notifier that only records what it is asked to show.
#[derive(Clone, Default)]
pub(crate) struct RecordingNotifier {
    shown: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    fn shown(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.shown.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn messages(&self, kind: NotificationKind) -> Vec<String> {
        self.shown()
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn show_notification(&self, notification: Notification) {
        self.shown().push(notification);
    }

    fn remove_notification(&self, notification: &Notification) {
        self.shown().retain(|n| n.id() != notification.id());
    }

    fn clear_all(&self) {
        self.shown().clear();
    }

    fn notifications(&self) -> Vec<Notification> {
        self.shown().clone()
    }
}
