//! Nómina API Server module
//!
//! Provides the HTTP REST API used by the portal to parse uploaded rosters.
//! Run with `nomina-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server};
