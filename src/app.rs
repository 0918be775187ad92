use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::services::GridService;

/// HTTP server over one shared grid
pub struct Application {
    pub port: u16,
    pub grid_service: GridService,
    pub server_handle: JoinHandle<Result<(), std::io::Error>>,
}

impl Application {
    /// Build the grid from `config`, bind the listener and spawn the server
    ///
    /// Binding happens before returning, so `port` is the real port even when
    /// the configured one is 0.
    pub async fn build(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Initializing application components");

        let grid = config.build_grid()?;
        info!(
            "Grid ready: {} cities x {} years, {} readings seeded",
            grid.city_count(),
            grid.row_count(),
            grid.populated_count()
        );
        let grid_service = GridService::new(grid);

        let app_state = AppState {
            grid_service: grid_service.clone(),
        };
        let app = create_router(app_state).layer(TraceLayer::new_for_http());

        let addr = config.server_addr();
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();
        info!("Starting HTTP server on {}", listener.local_addr()?);

        let server_handle = tokio::spawn(async move { axum::serve(listener, app).await });

        info!("Application initialized successfully");

        Ok(Self {
            port,
            grid_service,
            server_handle,
        })
    }

    /// Run until the server stops (which runs indefinitely unless error)
    pub async fn run_until_stopped(self) -> Result<(), Box<dyn std::error::Error>> {
        self.server_handle.await??;
        Ok(())
    }
}
