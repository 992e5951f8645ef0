//! Command-line parser definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level command-line interface for the workflow gateway.
#[derive(Parser)]
#[command(name = "flowgate")]
#[command(about = "Workflow gateway: API, artifact downloads, live step logs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP gateway server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8001", env = "FLOWGATE_PORT")]
        port: u16,

        /// Namespace whose workflows the list endpoint serves
        #[arg(long, default_value = "default", env = "FLOWGATE_NAMESPACE")]
        namespace: String,

        /// Base URL of the cluster API server
        #[arg(
            long,
            default_value = "http://127.0.0.1:8001",
            env = "FLOWGATE_KUBE_URL"
        )]
        kube_url: String,

        /// Bearer token for the cluster API server
        #[arg(long, env = "FLOWGATE_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// API group of the workflow custom resource
        #[arg(long, default_value = "argoproj.io")]
        api_group: String,

        /// API version of the workflow custom resource
        #[arg(long, default_value = "v1alpha1")]
        api_version: String,

        /// URL scheme for reaching artifact storage endpoints
        #[arg(long, default_value = "http")]
        store_scheme: String,

        /// Region used when signing artifact storage requests
        #[arg(long, default_value = "us-east-1")]
        store_region: String,

        /// Path to built frontend assets to serve with SPA fallback
        #[arg(long, env = "FLOWGATE_STATIC_DIR")]
        static_dir: Option<PathBuf>,

        /// Serve API endpoints only (no static assets)
        #[arg(long)]
        api_only: bool,

        /// Restrict CORS to these origins (repeatable); default allows all
        #[arg(long = "allowed-origin")]
        allowed_origins: Vec<String>,
    },
}
