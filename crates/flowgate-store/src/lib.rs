#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod sign;

pub use client::S3ObjectStore;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
