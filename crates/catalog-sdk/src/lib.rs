//! Catalog SDK - typed access to a metadata catalog
//!
//! Typed asset model over the catalog's open entity graph, with the two
//! operations everything else is built on:
//!
//! - **Reference resolution**: reduce any entity to the smallest value that
//!   still identifies it (a reference, or a partial-update skeleton) so that
//!   relationship declarations and updates never ship the full graph.
//! - **Projection-aware fetch**: resolve one GUID or qualifiedName to exactly
//!   one typed asset, telling "not found" apart from "found, wrong type".
//!
//! # Architecture
//!
//! Everything talks to the catalog through the [`Store`] trait:
//! - **HttpStore** (feature `http`, on by default): the REST API via
//!   `catalog-client`
//! - **InMemoryStore**: entities held in-process, for tests and offline use
//!
//! # Example
//!
//! ```rust
//! use catalog_sdk::{AssetClient, AssetType, InMemoryStore, Readme, Table};
//!
//! # async fn example() -> catalog_sdk::Result<()> {
//! let client = AssetClient::new(InMemoryStore::new());
//!
//! let table = Table::builder()
//!     .qualified_name("default/db/schema/orders")
//!     .name("orders")
//!     .build_as::<Table>()?;
//! client.save([table]).await?;
//!
//! let table: Table = client.get("default/db/schema/orders").await?;
//! let readme = Readme::creator(&table, "orders", "<p>All orders</p>")?;
//! client.save([readme]).await?;
//! # Ok(())
//! # }
//! ```

// Entity model
pub mod model;

// Reference resolution
pub mod resolve;

// Projection-aware fetch
pub mod fetch;

// Search requests and typed select
pub mod search;

// Store capability and implementations
pub mod store;

// Concrete asset types
pub mod assets;

// Typed client
pub mod client;

// Error types
pub mod error;

// Re-export model types
pub use model::{
    attr, looks_like_guid, AnnouncementType, AtlanTag, AttributeProjection, AttributeValue,
    Attributes, CertificateStatus, Entity, EntityBuilder, EntityId, EntityReference, EntityStatus,
    HasIdentity, Identifier, SaveSemantic, TagOptions, UniqueAttributes,
};

// Re-export core operations
pub use fetch::fetch;
pub use resolve::{resolve_reference, resolve_updater};

// Re-export assets
pub use assets::{
    ApiQuery, ApiSpec, AssetType, AuthService, CogniteEvent, Column, Database, GlossaryTerm, Link,
    Readme, Schema, Table, Task,
};

// Re-export client and store types
pub use client::AssetClient;
pub use search::{Condition, SearchPage, SearchRequest, Select};
#[cfg(feature = "http")]
pub use store::HttpStore;
pub use store::{InMemoryStore, MutationResult, Store};

// Re-export error types
pub use error::{Result, SdkError};

// Re-export from the transport crate
#[cfg(feature = "http")]
pub use catalog_client::{ClientConfig, ClientError};
