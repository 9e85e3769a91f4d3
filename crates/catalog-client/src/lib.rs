//! HTTP transport for the metadata catalog REST API
//!
//! This crate only knows endpoints, envelopes and status codes. Entity
//! semantics (identity, references, projections) live in `catalog-sdk`.
//!
//! # Example
//!
//! ```rust,no_run
//! use catalog_client::{CatalogClient, ClientConfig, RetrieveParams};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CatalogClient::new(ClientConfig::from_env())?;
//!
//! let found = client
//!     .get_entity_by_unique_attribute::<serde_json::Value>(
//!         "Table",
//!         "default/snowflake/1700000000/db/schema/orders",
//!         RetrieveParams::with_relationships(false),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod types;

// Re-export main types
pub use client::CatalogClient;
pub use error::{ClientError, Result};
pub use types::*;
