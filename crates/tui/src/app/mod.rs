use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use profit_client::{
    Client, NotificationCenter, Notifier, Route,
    views::{ShipmentDetailView, ShipmentsView, SortColumn},
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{self, keymap::AppAction},
};

pub type Shipments = ShipmentsView<Client, NotificationCenter>;
pub type ShipmentDetail = ShipmentDetailView<Client, NotificationCenter>;

/// Which part of the detail screen receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailFocus {
    Table,
    Income,
    Cost,
    Filter,
}

impl DetailFocus {
    fn next(self) -> Self {
        match self {
            Self::Table => Self::Income,
            Self::Income => Self::Cost,
            Self::Cost => Self::Filter,
            Self::Filter => Self::Table,
        }
    }
}

pub struct AppState {
    pub route: Route,
    pub shipments: Shipments,
    /// Present while the detail route is shown; torn down on navigation.
    pub detail: Option<ShipmentDetail>,
    pub focus: DetailFocus,
    pub filter_input: String,
    pub notifier: NotificationCenter,
    pub base_url: String,
}

pub struct App {
    config: AppConfig,
    client: Client,
    start: Route,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let start =
            Route::parse(&config.route).ok_or_else(|| AppError::Route(config.route.clone()))?;
        let notifier = NotificationCenter::new();

        let state = AppState {
            route: Route::Shipments,
            shipments: ShipmentsView::new(client.clone(), notifier.clone()),
            detail: None,
            focus: DetailFocus::Table,
            filter_input: String::new(),
            notifier,
            base_url: client.base_url().to_string(),
        };

        Ok(Self {
            config,
            client,
            start,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        self.navigate(self.start).await;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        self.state.shipments.teardown();
        if let Some(detail) = self.state.detail.take() {
            detail.teardown();
        }
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        // Short tick so expired notifications disappear without input.
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key).await
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        let action = ui::keymap::map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.route {
            Route::Shipments => self.handle_shipments_key(action).await,
            Route::ShipmentDetail(_) => self.handle_detail_key(action).await,
        }
    }

    /// Tears down the current detail view (if any) and loads `route`.
    async fn navigate(&mut self, route: Route) {
        tracing::debug!("navigating to {}", route.path());
        if let Some(detail) = self.state.detail.take() {
            detail.teardown();
        }
        self.state.route = route;
        self.state.focus = DetailFocus::Table;
        self.state.filter_input.clear();

        match route {
            Route::Shipments => self.state.shipments.load().await,
            Route::ShipmentDetail(id) => {
                let mut detail = ShipmentDetailView::with_page_size(
                    self.client.clone(),
                    self.state.notifier.clone(),
                    id,
                    self.config.page_size,
                );
                detail.load().await;
                self.state.detail = Some(detail);
            }
        }
    }

    async fn handle_shipments_key(&mut self, action: AppAction) {
        let shipments = &mut self.state.shipments;
        match action {
            AppAction::Up | AppAction::Input('k') => shipments.select_prev(),
            AppAction::Down | AppAction::Input('j') => shipments.select_next(),
            AppAction::Submit => {
                if let Some(route) = shipments.open_selected() {
                    self.navigate(route).await;
                }
            }
            AppAction::Input('a') => {
                shipments.add_shipment().await;
            }
            AppAction::Input('d') => {
                shipments.delete_selected().await;
            }
            AppAction::Input('r') => shipments.load().await,
            AppAction::Input('x') => self.state.notifier.clear_all(),
            AppAction::Input('q') => self.should_quit = true,
            _ => {}
        }
    }

    async fn handle_detail_key(&mut self, action: AppAction) {
        let Some(detail) = self.state.detail.as_mut() else {
            return;
        };
        let mut next_route = None;

        match self.state.focus {
            DetailFocus::Income | DetailFocus::Cost => {
                let field = if self.state.focus == DetailFocus::Income {
                    &mut detail.income
                } else {
                    &mut detail.cost
                };
                match action {
                    AppAction::Input(ch) => field.push(ch),
                    AppAction::Backspace => {
                        field.pop();
                    }
                    AppAction::Submit => {
                        detail.add_calculation().await;
                    }
                    AppAction::NextField => self.state.focus = self.state.focus.next(),
                    AppAction::Cancel => self.state.focus = DetailFocus::Table,
                    _ => {}
                }
            }
            DetailFocus::Filter => match action {
                AppAction::Input(ch) => {
                    self.state.filter_input.push(ch);
                    detail.apply_filter(&self.state.filter_input);
                }
                AppAction::Backspace => {
                    self.state.filter_input.pop();
                    detail.apply_filter(&self.state.filter_input);
                }
                AppAction::NextField | AppAction::Submit | AppAction::Cancel => {
                    self.state.focus = DetailFocus::Table
                }
                _ => {}
            },
            DetailFocus::Table => match action {
                AppAction::Up | AppAction::Input('k') => detail.select_prev(),
                AppAction::Down | AppAction::Input('j') => detail.select_next(),
                AppAction::Right | AppAction::Input('n') => detail.next_page(),
                AppAction::Left | AppAction::Input('p') => detail.prev_page(),
                AppAction::Input('z') => detail.cycle_page_size(),
                AppAction::Input(ch @ '1'..='4') => detail.toggle_sort(sort_column_for(ch)),
                AppAction::Input('d') => {
                    detail.delete_selected().await;
                }
                AppAction::Input('r') => detail.load().await,
                AppAction::Input('/') => self.state.focus = DetailFocus::Filter,
                AppAction::Input('a') | AppAction::NextField => {
                    self.state.focus = DetailFocus::Income
                }
                AppAction::Input('x') => self.state.notifier.clear_all(),
                AppAction::Input('b') | AppAction::Cancel => next_route = Some(Route::Shipments),
                AppAction::Input('q') => self.should_quit = true,
                _ => {}
            },
        }

        if let Some(route) = next_route {
            self.navigate(route).await;
        }
    }
}

fn sort_column_for(key: char) -> SortColumn {
    match key {
        '2' => SortColumn::Income,
        '3' => SortColumn::Cost,
        '4' => SortColumn::ProfitOrLoss,
        _ => SortColumn::Id,
    }
}
