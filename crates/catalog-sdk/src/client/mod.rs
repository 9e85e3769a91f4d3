//! Typed asset client
//!
//! One entry point over any [`Store`](crate::store::Store): typed gets and
//! fetches, typed search, and the partial-update passthroughs shared by every
//! asset type.

mod asset_client;

pub use asset_client::AssetClient;
