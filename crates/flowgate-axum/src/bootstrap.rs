//! Server bootstrap, the composition root.
//!
//! The only place where infrastructure is wired together for the web
//! adapter: the control-plane client and the object-store client are
//! instantiated here and handed to the core services as trait objects.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use flowgate_core::{
    ArtifactService, ControlPlanePort, ObjectStorePort, WorkflowService,
};
use flowgate_kube::{DefaultKubeClient, KubeConfig};
use flowgate_store::{S3ObjectStore, StoreConfig};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Namespace whose workflows the list endpoint serves.
    pub namespace: String,
    /// Control-plane client settings.
    pub kube: KubeConfig,
    /// Object-store client settings.
    pub store: StoreConfig,
    /// Optional path to static assets for SPA serving.
    pub static_dir: Option<PathBuf>,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8001,
            namespace: "default".to_owned(),
            kube: KubeConfig::default(),
            store: StoreConfig::default(),
            static_dir: None,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Set the static directory for SPA serving.
    #[must_use]
    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the web adapter.
///
/// Holds the initialized core services; handlers never touch the
/// concrete clients behind them.
pub struct GatewayContext {
    /// Workflow queries and live log sessions.
    pub workflows: WorkflowService,
    /// Artifact lookup and retrieval.
    pub artifacts: ArtifactService,
    /// Namespace the unscoped list endpoint serves.
    pub namespace: String,
}

impl GatewayContext {
    /// Assemble the context from already-built ports.
    ///
    /// Tests use this directly with fake ports; production wiring goes
    /// through [`bootstrap`].
    pub fn new(
        control_plane: Arc<dyn ControlPlanePort>,
        object_store: Arc<dyn ObjectStorePort>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            workflows: WorkflowService::new(Arc::clone(&control_plane)),
            artifacts: ArtifactService::new(control_plane, object_store),
            namespace: namespace.into(),
        }
    }
}

/// Bootstrap the web adapter: build the concrete clients and wire the
/// core services on top of them.
pub fn bootstrap(config: &ServerConfig) -> Result<GatewayContext> {
    let control_plane: Arc<dyn ControlPlanePort> =
        Arc::new(DefaultKubeClient::new(&config.kube)?);
    let object_store: Arc<dyn ObjectStorePort> =
        Arc::new(S3ObjectStore::new(config.store.clone())?);

    Ok(GatewayContext::new(
        control_plane,
        object_store,
        config.namespace.clone(),
    ))
}

/// Start the web server on the configured port.
///
/// If `config.static_dir` is set, serves static assets with SPA
/// fallback alongside the API; otherwise serves the API only.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config)?;

    let app = if let Some(ref static_dir) = config.static_dir {
        info!("serving static assets from {}", static_dir.display());
        crate::routes::create_spa_router(ctx, static_dir, &config.cors)
    } else {
        crate::routes::create_router(ctx, &config.cors)
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(namespace = %config.namespace, "flowgate listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
