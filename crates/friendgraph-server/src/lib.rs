//! HTTP API server for the friendgraph user graph.
//!
//! Exposes create/list/link/unlink/delete/friends/age endpoints over a single
//! shared [`GraphService`](service::GraphService). This crate contains the
//! server framework, request schema types, error handling, configuration and
//! route definitions.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
