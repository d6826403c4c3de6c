pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod service;

use crate::client::bridge_tab_client::BridgeTabClient;
use crate::client::file_storage_area::FileStorageArea;
use crate::client::storage_area::{MemoryStorageArea, StorageArea};
use crate::client::tab_client::TabClient;
use crate::controller::{bookmark_controller, command_controller};
use crate::error::TabError;
use crate::service::bookmark_service::BookmarkService;
use crate::service::bookmark_store::BookmarkStore;
use crate::service::command_router::CommandRouter;
use crate::service::scroll_accessor::ScrollAccessor;
use actix_web::dev::ServerHandle;
use actix_web::web::Data;
use actix_web::{App, HttpServer, middleware::Logger, web};
use config::scrollmark_config::ScrollmarkConfig;
use log::info;
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

static SERVER_HANDLE: Lazy<Mutex<Option<ServerHandle>>> = Lazy::new(|| Mutex::new(None));

const API_BASE: &'static str = "/scrollmark-0/";

#[derive(OpenApi)]
#[openapi(paths(
    command_controller::post_command,
    bookmark_controller::post_bookmark,
    bookmark_controller::get_bookmarks,
    bookmark_controller::delete_bookmark,
))]
struct ApiDoc;

/// Services shared by every worker of the HTTP host.
#[derive(Clone)]
pub struct ScrollmarkState {
    pub bookmark_service: Arc<BookmarkService>,
    pub command_router: Arc<CommandRouter>,
}

impl ScrollmarkState {
    pub fn new(storage_area: Arc<dyn StorageArea>, tab_client: Arc<dyn TabClient>, app_config: &ScrollmarkConfig) -> Self {
        let bookmark_store = BookmarkStore::new(storage_area, app_config.storage_write_attempts as usize);
        let bookmark_service = Arc::new(BookmarkService::new(bookmark_store, tab_client.clone()));
        let scroll_accessor = Arc::new(ScrollAccessor::with_tab_client(tab_client, app_config.scroll_timeout()));
        let command_router = Arc::new(CommandRouter::new(bookmark_service.clone(), scroll_accessor));
        ScrollmarkState { bookmark_service, command_router }
    }

    pub fn from_config(app_config: &ScrollmarkConfig) -> Result<Self, TabError> {
        let storage_area: Arc<dyn StorageArea> = if app_config.storage_file.is_empty() {
            Arc::new(MemoryStorageArea::new())
        } else {
            Arc::new(FileStorageArea::new(&app_config.storage_file))
        };
        let tab_client = Arc::new(BridgeTabClient::new(&app_config.bridge_url, app_config.scroll_timeout())?);
        Ok(Self::new(storage_area, tab_client, app_config))
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &ScrollmarkState) {
    cfg
        .app_data(Data::from(state.bookmark_service.clone()))
        .app_data(Data::from(state.command_router.clone()))
        .route(
            format!("{}command", API_BASE).as_str(),
            web::post().to(command_controller::post_command),
        )
        .route(
            format!("{}bookmarks", API_BASE).as_str(),
            web::post().to(bookmark_controller::post_bookmark),
        )
        .route(
            format!("{}bookmarks", API_BASE).as_str(),
            web::get().to(bookmark_controller::get_bookmarks),
        )
        .route(
            format!("{}bookmarks/{{id}}", API_BASE).as_str(),
            web::delete().to(bookmark_controller::delete_bookmark),
        );
}

pub async fn run_server(app_config: ScrollmarkConfig) -> std::io::Result<()> {
    let listen_address = app_config.listen_address;
    let state = ScrollmarkState::from_config(&app_config)
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    info!("Starting listener");

    let server_instance = HttpServer::new(move || {
        let logger = Logger::default();

        App::new()
            .wrap(logger)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(|cfg| configure_routes(cfg, &state))
    })
    .bind(listen_address)?
    .run();

    {
        let mut guard = SERVER_HANDLE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(server_instance.handle());
    }

    server_instance.await
}

pub async fn stop_server() -> Result<(), String> {
    let handle_opt = {
        let mut guard = SERVER_HANDLE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.take()
    };

    if let Some(handle) = handle_opt {
        info!("Stopping server gracefully...");
        handle.stop(true).await;
        info!("Server stopped");
        Ok(())
    } else {
        Err("Server handle not found or already stopped".to_string())
    }
}
