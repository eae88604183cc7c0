//! Blocking client SDK for the DFIR-IRIS case-management API.
//!
//! # Overview
//! Every call goes through one pipeline: a `RequestBuilder` produces a
//! `RequestSpec`, `IrisClient::do_request` joins it onto the base URL, applies
//! the spec's headers and then the `AuthStrategy`, and hands the native
//! request to a `Transport`. Endpoint methods check for a 200 and decode the
//! JSON envelope into `ApiResponse<T>`.
//!
//! # Design
//! - `IrisClient` is immutable after construction and `Send + Sync`.
//! - `AuthStrategy` and `Transport` are traits, so credentials and networking
//!   can be swapped without touching endpoint code.
//! - Configuration is an explicit `Config` value; there is no global state.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod auth;
pub mod client;
pub mod config;
mod endpoints;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use auth::{ApiKeyAuth, AuthStrategy};
pub use client::{check_status, decode, join_url, IrisClient};
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use http::{HttpResponse, RequestBuilder, RequestSpec};
pub use transport::{Transport, TransportConfig, UreqTransport};
pub use types::{
    ApiMeta, ApiResponse, CaseTemplate, Contact, ContactRequest, CreatedCustomer, CustomAttributes,
    Customer, CustomerRequest, VersionInfo,
};
