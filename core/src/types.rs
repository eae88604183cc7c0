//! Wire DTOs for the IRIS API.
//!
//! # Design
//! Every successful response is an envelope: endpoint-specific `data` plus
//! the shared `status`/`message` pair. `ApiResponse<T>` models that once
//! instead of one wrapper per endpoint. Payload structs default any missing
//! field and read a JSON `null` collection as empty, since IRIS omits or
//! nulls fields depending on version. `ApiMeta` itself is mandatory.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Free-form attributes attached to customers and contacts.
pub type CustomAttributes = HashMap<String, serde_json::Value>;

/// Server-reported outcome, independent of the HTTP status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMeta {
    pub message: String,
    pub status: String,
}

/// A decoded response: payload under `data` plus `ApiMeta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(flatten)]
    pub meta: ApiMeta,
}

/// Payload of `/api/versions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionInfo {
    pub api_current: String,
    pub api_min: String,
    pub iris_current: String,
}

/// A case template as returned by the add and update endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseTemplate {
    pub registry: serde_json::Value,
    pub type_description: String,
    pub type_id: i64,
    pub type_name: String,
    pub type_taxonomy: String,
    pub type_validation_expect: String,
    pub type_validation_regex: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(deserialize_with = "null_as_default")]
    pub contacts: Vec<Contact>,
    pub customer_description: String,
    pub customer_id: i64,
    pub customer_name: String,
    pub customer_sla: String,
    pub customer_uuid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_attributes: CustomAttributes,
}

/// The customer record echoed back by `/manage/customers/add`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatedCustomer {
    pub client_uuid: String,
    pub creation_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_attributes: CustomAttributes,
    pub customer_description: String,
    pub customer_id: i64,
    pub customer_name: String,
    pub customer_sla: String,
    pub last_update_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub client_id: i64,
    pub contact_email: String,
    pub contact_mobile_phone: String,
    pub contact_name: String,
    pub contact_note: String,
    pub contact_role: String,
    pub contact_uuid: String,
    pub contact_work_phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_attributes: CustomAttributes,
    pub id: i64,
}

/// Body of the customer add and update endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRequest {
    pub customer_name: String,
    pub customer_description: String,
    pub customer_sla: String,
    #[serde(default)]
    pub custom_attributes: CustomAttributes,
}

impl CustomerRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            customer_name: name.into(),
            ..Self::default()
        }
    }
}

/// Body of the contact add and update endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub contact_name: String,
    pub contact_role: String,
    pub contact_email: String,
    pub contact_mobile_phone: String,
    pub contact_work_phone: String,
    pub contact_note: String,
    #[serde(default)]
    pub custom_attributes: CustomAttributes,
}

impl ContactRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            contact_name: name.into(),
            ..Self::default()
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
