//! Outbound integration with the marketplace backend REST API.

pub mod client;

pub use client::{AccountUser, Authority, BackendClient, BackendError, LoginReply, SignupPayload};
