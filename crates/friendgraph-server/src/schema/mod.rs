//! Request body types.
//!
//! Each sub-module defines the JSON request shapes for one group of
//! endpoints. Responses are plain text and built by the handlers.

pub mod friends;
pub mod users;
