#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Massacre map API server binary.
//!
//! Configuration is read from `DATA_PATH`, `BIND_ADDR`, `PORT`,
//! `STATIC_DIR` and `GEOCODE_MISSING`; see
//! [`massacre_map_server::ServerConfig`].

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    massacre_map_server::run_server().await
}
