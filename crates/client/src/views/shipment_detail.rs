use std::cmp::Ordering;

use api_types::calculation::{Calculation, CalculationNew};
use chrono::{DateTime, Local};

use crate::{
    cancel::CancellationToken,
    client::ProfitApi,
    error::ClientError,
    notification::Notifier,
    validation::{parse_number, validate_calculation, validate_calculation_id, validate_shipment_id},
};

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 100];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Income,
    Cost,
    ProfitOrLoss,
}

impl SortColumn {
    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Income => "Income",
            Self::Cost => "Cost",
            Self::ProfitOrLoss => "Profit/Loss",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Id => Self::Income,
            Self::Income => Self::Cost,
            Self::Cost => Self::ProfitOrLoss,
            Self::ProfitOrLoss => Self::Id,
        }
    }

    fn compare(self, a: &Calculation, b: &Calculation) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Income => a.income.total_cmp(&b.income),
            Self::Cost => a.cost.total_cmp(&b.cost),
            Self::ProfitOrLoss => a.profit_or_loss.total_cmp(&b.profit_or_loss),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

/// Validation messages shown next to the form inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub income: Vec<String>,
    pub cost: Vec<String>,
}

impl FieldErrors {
    fn from_messages(errors: &[String]) -> Self {
        let mut fields = Self::default();
        for err in errors {
            if err.starts_with("Income") {
                fields.income.push(err.clone());
            } else {
                fields.cost.push(err.clone());
            }
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.cost.is_empty()
    }
}

/// Calculations of one shipment: the add form plus a filterable, sortable,
/// paginated table.
pub struct ShipmentDetailView<A, N> {
    api: A,
    notifier: N,
    token: CancellationToken,
    pub shipment_id: i64,
    pub calculations: Vec<Calculation>,
    pub loading: bool,
    pub income: String,
    pub cost: String,
    pub field_errors: FieldErrors,
    pub last_refresh: Option<DateTime<Local>>,
    filter: String,
    sort: Option<SortState>,
    page_index: usize,
    page_size: usize,
    pub selected: usize,
}

impl<A: ProfitApi, N: Notifier> ShipmentDetailView<A, N> {
    pub fn new(api: A, notifier: N, shipment_id: i64) -> Self {
        Self::with_page_size(api, notifier, shipment_id, PAGE_SIZE_OPTIONS[0])
    }

    /// Page sizes outside [`PAGE_SIZE_OPTIONS`] fall back to the smallest.
    pub fn with_page_size(api: A, notifier: N, shipment_id: i64, page_size: usize) -> Self {
        let page_size = if PAGE_SIZE_OPTIONS.contains(&page_size) {
            page_size
        } else {
            PAGE_SIZE_OPTIONS[0]
        };
        Self {
            api,
            notifier,
            token: CancellationToken::new(),
            shipment_id,
            calculations: Vec::new(),
            loading: false,
            income: "0".to_string(),
            cost: "0".to_string(),
            field_errors: FieldErrors::default(),
            last_refresh: None,
            filter: String::new(),
            sort: None,
            page_index: 0,
            page_size,
            selected: 0,
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn teardown(&self) {
        self.token.cancel();
    }

    pub async fn load(&mut self) {
        if !self.check_shipment_id() {
            return;
        }

        self.loading = true;
        let Some(res) = self
            .token
            .run(self.api.list_calculations(self.shipment_id))
            .await
        else {
            return;
        };
        self.loading = false;

        match res {
            Ok(calculations) => {
                self.calculations = calculations;
                self.last_refresh = Some(Local::now());
                self.clamp_page();
            }
            Err(err) => self.report(err),
        }
    }

    /// Validates the form and, when it passes, creates the calculation.
    ///
    /// Invalid input is reported inline and through one warning; nothing is
    /// sent to the backend in that case.
    pub async fn add_calculation(&mut self) -> Option<Calculation> {
        let income = parse_number(&self.income);
        let cost = parse_number(&self.cost);

        let check = validate_calculation(income, cost);
        self.field_errors = FieldErrors::from_messages(&check.errors);
        if !check.is_valid {
            self.notifier.show_warning(check.errors.join("; "));
            return None;
        }
        if !self.check_shipment_id() {
            return None;
        }

        self.loading = true;
        let res = self
            .token
            .run(
                self.api
                    .create_calculation(self.shipment_id, CalculationNew { income, cost }),
            )
            .await?;
        self.loading = false;

        match res {
            Ok(calculation) => {
                self.income = "0".to_string();
                self.cost = "0".to_string();
                self.notifier
                    .show_success(format!("Calculation {} added", calculation.id));
                self.load().await;
                Some(calculation)
            }
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    pub async fn delete_calculation(&mut self, id: i64) -> bool {
        let check = validate_calculation_id(id as f64);
        if !check.is_valid {
            self.notifier.show_warning(check.errors.join("; "));
            return false;
        }

        self.loading = true;
        let Some(res) = self
            .token
            .run(self.api.delete_calculation(self.shipment_id, id))
            .await
        else {
            return false;
        };
        self.loading = false;

        match res {
            Ok(()) => {
                self.notifier
                    .show_success(format!("Calculation {id} deleted"));
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
        let id = self.visible_rows().get(self.selected).map(|calc| calc.id);
        match id {
            Some(id) => self.delete_calculation(id).await,
            None => false,
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Narrows the table to rows whose id contains `text`; resets to the
    /// first page.
    pub fn apply_filter(&mut self, text: &str) {
        self.filter = text.trim().to_lowercase();
        self.first_page();
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    /// Sorts by `column`, flipping direction when it is already the sort key.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sort = Some(match self.sort {
            Some(SortState {
                column: current,
                direction: SortDirection::Asc,
            }) if current == column => SortState {
                column,
                direction: SortDirection::Desc,
            },
            _ => SortState {
                column,
                direction: SortDirection::Asc,
            },
        });
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size).max(1)
    }

    pub fn next_page(&mut self) {
        if self.page_index + 1 < self.page_count() {
            self.page_index += 1;
            self.selected = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page_index > 0 {
            self.page_index -= 1;
            self.selected = 0;
        }
    }

    pub fn cycle_page_size(&mut self) {
        let pos = PAGE_SIZE_OPTIONS
            .iter()
            .position(|&size| size == self.page_size)
            .unwrap_or(0);
        self.page_size = PAGE_SIZE_OPTIONS[(pos + 1) % PAGE_SIZE_OPTIONS.len()];
        self.first_page();
    }

    /// Rows matching the filter, in sort order, before pagination.
    pub fn filtered(&self) -> Vec<&Calculation> {
        let mut rows: Vec<&Calculation> = self
            .calculations
            .iter()
            .filter(|calc| calc.id.to_string().contains(&self.filter))
            .collect();

        if let Some(sort) = self.sort {
            rows.sort_by(|a, b| {
                let ord = sort.column.compare(a, b);
                match sort.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }
        rows
    }

    /// Rows on the current page.
    pub fn visible_rows(&self) -> Vec<&Calculation> {
        self.filtered()
            .into_iter()
            .skip(self.page_index * self.page_size)
            .take(self.page_size)
            .collect()
    }

    /// Message for an empty table caused by the filter.
    pub fn no_data_message(&self) -> Option<String> {
        if self.filter.is_empty() || !self.filtered().is_empty() {
            return None;
        }
        Some(format!("No data matching the filter \"{}\"", self.filter))
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible_rows().len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn first_page(&mut self) {
        self.page_index = 0;
        self.selected = 0;
    }

    fn clamp_page(&mut self) {
        self.page_index = self.page_index.min(self.page_count() - 1);
        self.selected = self
            .selected
            .min(self.visible_rows().len().saturating_sub(1));
    }

    fn check_shipment_id(&self) -> bool {
        let check = validate_shipment_id(self.shipment_id as f64);
        if !check.is_valid {
            self.notifier.show_warning(check.errors.join("; "));
        }
        check.is_valid
    }

    fn report(&self, err: ClientError) {
        self.notifier.show_error(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        notification::NotificationKind,
        views::testing::{FakeApi, RecordingNotifier},
    };

    type View = ShipmentDetailView<FakeApi, RecordingNotifier>;

    fn view(api: &FakeApi, shipment_id: i64) -> (View, RecordingNotifier) {
        let notifier = RecordingNotifier::default();
        (
            ShipmentDetailView::new(api.clone(), notifier.clone(), shipment_id),
            notifier,
        )
    }

    fn ids(rows: &[&Calculation]) -> Vec<i64> {
        rows.iter().map(|calc| calc.id).collect()
    }

    #[tokio::test]
    async fn load_lists_only_this_shipment() {
        let api = FakeApi::with_shipments(&[1, 2]);
        api.add_calculation(1, 100.0, 40.0);
        api.add_calculation(2, 10.0, 20.0);
        let (mut view, _) = view(&api, 1);

        view.load().await;
        assert_eq!(view.calculations.len(), 1);
        assert_eq!(view.calculations[0].profit_or_loss, 60.0);
        assert_eq!(api.calls(), vec!["list_calculations 1"]);
    }

    #[tokio::test]
    async fn invalid_shipment_id_skips_backend() {
        let api = FakeApi::default();
        let (mut view, notifier) = view(&api, 0);

        view.load().await;
        assert!(api.calls().is_empty());
        assert_eq!(
            notifier.messages(NotificationKind::Warning),
            vec!["Shipment ID must be a positive number"]
        );
    }

    #[tokio::test]
    async fn add_calculation_resets_form_and_reloads() {
        let api = FakeApi::with_shipments(&[1]);
        let (mut view, notifier) = view(&api, 1);
        view.income = "1000.50".to_string();
        view.cost = "500.25".to_string();

        let created = view.add_calculation().await.unwrap();
        assert_eq!(created.income, 1000.5);
        assert_eq!(view.income, "0");
        assert_eq!(view.cost, "0");
        assert_eq!(view.calculations.len(), 1);
        assert_eq!(
            api.calls(),
            vec!["create_calculation 1", "list_calculations 1"]
        );
        assert_eq!(notifier.messages(NotificationKind::Success).len(), 1);
    }

    #[tokio::test]
    async fn invalid_form_reports_inline_and_warns_once() {
        let api = FakeApi::with_shipments(&[1]);
        let (mut view, notifier) = view(&api, 1);
        view.income = "-100".to_string();
        view.cost = "abc".to_string();

        assert!(view.add_calculation().await.is_none());
        assert!(api.calls().is_empty());
        assert_eq!(view.field_errors.income, vec!["Income cannot be negative"]);
        assert_eq!(view.field_errors.cost, vec!["Cost must be a valid number"]);
        assert_eq!(
            notifier.messages(NotificationKind::Warning),
            vec!["Income cannot be negative; Cost must be a valid number"]
        );
        assert_eq!(view.income, "-100");
    }

    #[tokio::test]
    async fn create_failure_keeps_form_and_view_usable() {
        let api = FakeApi::with_shipments(&[1]);
        api.state().fail_next = Some(ClientError::Client("connection refused".to_string()));
        let (mut view, notifier) = view(&api, 1);
        view.income = "10".to_string();

        assert!(view.add_calculation().await.is_none());
        assert!(!view.loading);
        assert_eq!(view.income, "10");
        assert_eq!(
            notifier.messages(NotificationKind::Error),
            vec!["Client Error: connection refused"]
        );
    }

    #[tokio::test]
    async fn delete_calculation_reloads() {
        let api = FakeApi::with_shipments(&[1]);
        let first = api.add_calculation(1, 5.0, 1.0);
        api.add_calculation(1, 6.0, 1.0);
        let (mut view, _) = view(&api, 1);
        view.load().await;

        assert!(view.delete_calculation(first).await);
        assert_eq!(view.calculations.len(), 1);
        assert!(!view.delete_calculation(-3).await);
    }

    #[tokio::test]
    async fn filter_matches_id_substring_and_resets_page() {
        let api = FakeApi::with_shipments(&[1]);
        for _ in 0..12 {
            api.add_calculation(1, 1.0, 1.0);
        }
        let (mut view, _) = view(&api, 1);
        view.load().await;
        view.next_page();
        assert_eq!(view.page_index(), 1);

        view.apply_filter(" 1 ");
        assert_eq!(view.page_index(), 0);
        assert_eq!(ids(&view.filtered()), vec![10, 11, 12, 13]);

        view.apply_filter("99");
        assert!(view.filtered().is_empty());
        assert_eq!(
            view.no_data_message().as_deref(),
            Some("No data matching the filter \"99\"")
        );
    }

    #[tokio::test]
    async fn sort_toggles_direction_on_same_column() {
        let api = FakeApi::with_shipments(&[1]);
        api.add_calculation(1, 300.0, 100.0);
        api.add_calculation(1, 100.0, 500.0);
        api.add_calculation(1, 200.0, 200.0);
        let (mut view, _) = view(&api, 1);
        view.load().await;

        view.toggle_sort(SortColumn::ProfitOrLoss);
        assert_eq!(ids(&view.visible_rows()), vec![3, 4, 2]);

        view.toggle_sort(SortColumn::ProfitOrLoss);
        assert_eq!(ids(&view.visible_rows()), vec![2, 4, 3]);

        view.toggle_sort(SortColumn::Income);
        assert_eq!(
            view.sort(),
            Some(SortState {
                column: SortColumn::Income,
                direction: SortDirection::Asc,
            })
        );
        assert_eq!(ids(&view.visible_rows()), vec![3, 4, 2]);
    }

    #[tokio::test]
    async fn paginates_with_page_size_options() {
        let api = FakeApi::with_shipments(&[1]);
        for _ in 0..12 {
            api.add_calculation(1, 1.0, 1.0);
        }
        let (mut view, _) = view(&api, 1);
        view.load().await;

        assert_eq!(view.page_size(), 5);
        assert_eq!(view.page_count(), 3);
        view.next_page();
        view.next_page();
        view.next_page();
        assert_eq!(view.page_index(), 2);
        assert_eq!(view.visible_rows().len(), 2);

        view.cycle_page_size();
        assert_eq!(view.page_size(), 10);
        assert_eq!(view.page_index(), 0);
        assert_eq!(view.page_count(), 2);

        view.prev_page();
        assert_eq!(view.page_index(), 0);
    }

    #[test]
    fn unknown_page_size_falls_back() {
        let view = ShipmentDetailView::with_page_size(
            FakeApi::default(),
            RecordingNotifier::default(),
            1,
            7,
        );
        assert_eq!(view.page_size(), 5);
    }

    #[tokio::test]
    async fn teardown_during_request_discards_response() {
        let api = FakeApi::with_shipments(&[1]);
        api.add_calculation(1, 1.0, 0.0);
        api.state().hang = true;
        let (mut view, notifier) = view(&api, 1);
        let token = view.token();

        tokio::join!(view.load(), async { token.cancel() });
        assert!(view.calculations.is_empty());
        assert!(notifier.notifications().is_empty());
    }
}
