//! CLI entry point, the composition root.
//!
//! Parses arguments, assembles the server configuration, and hands off
//! to the Axum adapter. No infrastructure is wired anywhere else.

#![deny(unused_crate_dependencies)]

mod parser;

use clap::Parser;
use flowgate_axum::{ServerConfig, start_server};
use flowgate_kube::KubeConfig;
use flowgate_store::StoreConfig;
use tracing_subscriber::EnvFilter;

use crate::parser::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            namespace,
            kube_url,
            token,
            api_group,
            api_version,
            store_scheme,
            store_region,
            static_dir,
            api_only,
            allowed_origins,
        } => {
            let kube = KubeConfig::new()
                .with_base_url(kube_url)
                .with_optional_token(token)
                .with_resource(api_group, api_version);
            let store = StoreConfig::default()
                .with_scheme(store_scheme)
                .with_region(store_region);

            let mut config = ServerConfig {
                port,
                namespace,
                kube,
                store,
                static_dir: None,
                cors: flowgate_axum::CorsConfig::AllowAll,
            };
            if !api_only {
                if let Some(dir) = static_dir {
                    config = config.with_static_dir(dir);
                }
            }
            if !allowed_origins.is_empty() {
                config = config.with_allowed_origins(allowed_origins);
            }

            start_server(config).await
        }
    }
}
