use api_types::shipment::Shipment;
use chrono::{DateTime, Local};

use crate::{
    cancel::CancellationToken,
    client::ProfitApi,
    error::ClientError,
    notification::Notifier,
    routes::Route,
    validation::validate_shipment_id,
};

pub struct ShipmentsView<A, N> {
    api: A,
    notifier: N,
    token: CancellationToken,
    pub shipments: Vec<Shipment>,
    pub loading: bool,
    pub selected: usize,
    pub last_refresh: Option<DateTime<Local>>,
}

impl<A: ProfitApi, N: Notifier> ShipmentsView<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            token: CancellationToken::new(),
            shipments: Vec::new(),
            loading: false,
            selected: 0,
            last_refresh: None,
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Stops the view from applying results of calls still in flight.
    pub fn teardown(&self) {
        self.token.cancel();
    }

    pub async fn load(&mut self) {
        self.loading = true;
        let Some(res) = self.token.run(self.api.list_shipments()).await else {
            return;
        };
        self.loading = false;

        match res {
            Ok(shipments) => {
                self.shipments = shipments;
                self.selected = self.selected.min(self.shipments.len().saturating_sub(1));
                self.last_refresh = Some(Local::now());
            }
            Err(err) => self.report(err),
        }
    }

    /// Creates a shipment and reloads the list. Returns the new shipment.
    pub async fn add_shipment(&mut self) -> Option<Shipment> {
        self.loading = true;
        let res = self.token.run(self.api.create_shipment()).await?;
        self.loading = false;

        match res {
            Ok(shipment) => {
                self.notifier
                    .show_success(format!("Shipment {} created", shipment.id));
                self.load().await;
                Some(shipment)
            }
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    pub async fn delete_shipment(&mut self, id: i64) -> bool {
        let check = validate_shipment_id(id as f64);
        if !check.is_valid {
            self.notifier.show_warning(check.errors.join("; "));
            return false;
        }

        self.loading = true;
        let Some(res) = self.token.run(self.api.delete_shipment(id)).await else {
            return false;
        };
        self.loading = false;

        match res {
            Ok(()) => {
                self.notifier.show_success(format!("Shipment {id} deleted"));
                self.load().await;
                true
            }
            Err(err) => {
                self.report(err);
                false
            }
        }
    }

    pub async fn delete_selected(&mut self) -> bool {
        match self.selected_shipment() {
            Some(shipment) => self.delete_shipment(shipment.id).await,
            None => false,
        }
    }

    pub fn selected_shipment(&self) -> Option<Shipment> {
        self.shipments.get(self.selected).copied()
    }

    /// Route of the selected shipment's detail screen.
    pub fn open_selected(&self) -> Option<Route> {
        self.selected_shipment()
            .map(|shipment| Route::ShipmentDetail(shipment.id))
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.shipments.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn report(&self, err: ClientError) {
        self.notifier.show_error(err.to_string());
    }
}
