//! Wiring: repositories, the realtime hub, command handlers and the router.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;

use crate::adapters::http::bookings::BookingHandlers;
use crate::adapters::http::inventory::InventoryHandlers;
use crate::adapters::http::leads::LeadHandlers;
use crate::adapters::http::messages::MessageHandlers;
use crate::adapters::http::reports::ReportHandlers;
use crate::adapters::http::{api_router, with_common_layers, with_rest_layers, ApiHandlers};
use crate::adapters::memory::{
    InMemoryBookingRepository, InMemoryLeadRepository, InMemoryMessageRepository,
    InMemoryProductRepository,
};
use crate::adapters::realtime::{realtime_router, RealtimeError, RealtimeHub, RealtimeState, TransportHandle};
use crate::application::handlers::booking::{
    CreateBookingHandler, DeleteBookingHandler, GetBookingHandler, ListBookingsHandler,
    UpdateBookingHandler,
};
use crate::application::handlers::inventory::{
    AdjustStockHandler, CreateProductHandler, DeleteProductHandler, ListMovementsHandler,
    ListProductsHandler,
};
use crate::application::handlers::lead::{
    CreateLeadHandler, DeleteLeadHandler, GetLeadHandler, ListLeadsHandler, UpdateLeadHandler,
};
use crate::application::handlers::messaging::{
    GetConversationHandler, MarkConversationReadHandler, SendMessageHandler,
};
use crate::application::handlers::reporting::{GetDashboardHandler, GetSummaryReportHandler};
use crate::application::ChangeNotifier;
use crate::config::{AppConfig, ConfigError, ValidationError};
use crate::ports::{
    BookingRepository, LeadRepository, MessageRepository, NotificationPublisher,
    ProductRepository,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("realtime setup failed: {0}")]
    Realtime(#[from] RealtimeError),

    #[error("tracing setup failed: {0}")]
    Tracing(#[from] tracing_subscriber::util::TryInitError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The four stores every handler reads or writes.
#[derive(Clone)]
pub struct Repositories {
    pub leads: Arc<dyn LeadRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub messages: Arc<dyn MessageRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            leads: Arc::new(InMemoryLeadRepository::new()),
            bookings: Arc::new(InMemoryBookingRepository::new()),
            products: Arc::new(InMemoryProductRepository::new()),
            messages: Arc::new(InMemoryMessageRepository::new()),
        }
    }
}

/// A fully wired application.
pub struct App {
    router: Router,
    hub: Arc<RealtimeHub>,
    transport: TransportHandle,
    repositories: Repositories,
}

impl App {
    /// Wires the application over in-memory repositories.
    pub fn build(config: &AppConfig) -> Result<Self, AppError> {
        Self::with_repositories(config, Repositories::in_memory())
    }

    pub fn with_repositories(config: &AppConfig, repositories: Repositories) -> Result<Self, AppError> {
        let hub = Arc::new(RealtimeHub::new());
        let transport = hub.initialize(&config.realtime)?;

        let publisher: Arc<dyn NotificationPublisher> = hub.clone();
        let handlers = api_handlers(&repositories, ChangeNotifier::new(publisher));

        let api = with_rest_layers(
            api_router(handlers),
            Duration::from_secs(config.server.request_timeout_secs),
        );
        let ws = realtime_router(&config.realtime.ws_path)
            .with_state(RealtimeState::new(transport.clone()));
        let router = with_common_layers(
            api.merge(ws),
            transport.policy(),
            transport.allow_credentials(),
        );

        Ok(Self {
            router,
            hub,
            transport,
            repositories,
        })
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    pub fn hub(&self) -> &Arc<RealtimeHub> {
        &self.hub
    }

    pub fn transport(&self) -> &TransportHandle {
        &self.transport
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repositories
    }
}

fn api_handlers(repos: &Repositories, notifier: ChangeNotifier) -> ApiHandlers {
    let leads = LeadHandlers::new(
        Arc::new(CreateLeadHandler::new(repos.leads.clone(), notifier.clone())),
        Arc::new(UpdateLeadHandler::new(repos.leads.clone(), notifier.clone())),
        Arc::new(DeleteLeadHandler::new(repos.leads.clone(), notifier.clone())),
        Arc::new(GetLeadHandler::new(repos.leads.clone())),
        Arc::new(ListLeadsHandler::new(repos.leads.clone())),
    );

    let bookings = BookingHandlers::new(
        Arc::new(CreateBookingHandler::new(
            repos.bookings.clone(),
            repos.leads.clone(),
            notifier.clone(),
        )),
        Arc::new(UpdateBookingHandler::new(
            repos.bookings.clone(),
            repos.leads.clone(),
            notifier.clone(),
        )),
        Arc::new(DeleteBookingHandler::new(repos.bookings.clone(), notifier.clone())),
        Arc::new(GetBookingHandler::new(repos.bookings.clone())),
        Arc::new(ListBookingsHandler::new(repos.bookings.clone())),
    );

    let inventory = InventoryHandlers::new(
        Arc::new(CreateProductHandler::new(repos.products.clone(), notifier.clone())),
        Arc::new(AdjustStockHandler::new(repos.products.clone(), notifier.clone())),
        Arc::new(DeleteProductHandler::new(repos.products.clone(), notifier.clone())),
        Arc::new(ListProductsHandler::new(repos.products.clone())),
        Arc::new(ListMovementsHandler::new(repos.products.clone())),
    );

    let messages = MessageHandlers::new(
        Arc::new(SendMessageHandler::new(
            repos.messages.clone(),
            repos.leads.clone(),
            notifier.clone(),
        )),
        Arc::new(MarkConversationReadHandler::new(repos.messages.clone(), notifier)),
        Arc::new(GetConversationHandler::new(repos.messages.clone())),
    );

    let reports = ReportHandlers::new(
        Arc::new(GetDashboardHandler::new(
            repos.leads.clone(),
            repos.bookings.clone(),
            repos.products.clone(),
        )),
        Arc::new(GetSummaryReportHandler::new(
            repos.leads.clone(),
            repos.bookings.clone(),
            repos.products.clone(),
            repos.messages.clone(),
        )),
    );

    ApiHandlers {
        leads,
        bookings,
        inventory,
        messages,
        reports,
    }
}
