//! Endpoint methods on `IrisClient`, grouped by resource.
//!
//! Each method fills a `RequestBuilder`, hands the spec to `do_request` and
//! applies the status-then-decode convention from `client`.

mod api;
mod case_templates;
mod customers;

const JSON: &str = "application/json";
