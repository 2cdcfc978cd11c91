#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filtering, search and aggregation over massacre records.
//!
//! All functions here are pure and synchronous. They take a borrowed
//! collection and return either a borrowed view, a new collection, or a
//! derived value; the input is never modified. [`DashboardState`] ties them
//! together as an explicit, immutable application state.

pub mod filter;
pub mod state;
pub mod stats;
pub mod timeline;

pub use filter::{filter_by_governor, governors, search};
pub use state::DashboardState;
pub use stats::compute_statistics;
pub use timeline::yearly_timeline;
