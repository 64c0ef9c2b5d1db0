//! # rpclog-api
//!
//! Read-only administrative API over persisted audit records, built with
//! Axum. Also hosts the retention sweeper task.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::run;
