//! In-memory stand-in for the IRIS REST API.
//!
//! Implements the customer, contact, case-template, ping and version routes
//! with IRIS's `{status, message, data}` envelope and bearer-token check.
//! State lives in a `RwLock` and is lost when the server stops.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const API_CURRENT: &str = "2.0.4";
pub const API_MIN: &str = "2.0.0";
pub const IRIS_CURRENT: &str = "v2.4.7";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub client_id: i64,
    pub contact_name: String,
    pub contact_role: String,
    pub contact_email: String,
    pub contact_mobile_phone: String,
    pub contact_work_phone: String,
    pub contact_note: String,
    pub contact_uuid: String,
    pub custom_attributes: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: i64,
    pub customer_name: String,
    pub customer_description: String,
    pub customer_sla: String,
    pub customer_uuid: String,
    pub creation_date: String,
    pub last_update_date: String,
    pub custom_attributes: Map<String, Value>,
    pub contacts: Vec<Contact>,
}

#[derive(Deserialize)]
pub struct CustomerInput {
    pub customer_name: String,
    #[serde(default)]
    pub customer_description: String,
    #[serde(default)]
    pub customer_sla: String,
    #[serde(default)]
    pub custom_attributes: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
pub struct ContactInput {
    pub contact_name: String,
    #[serde(default)]
    pub contact_role: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_mobile_phone: String,
    #[serde(default)]
    pub contact_work_phone: String,
    #[serde(default)]
    pub contact_note: String,
    #[serde(default)]
    pub custom_attributes: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
pub struct TemplateInput {
    pub case_template_json: String,
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    customers: BTreeMap<i64, Customer>,
    templates: BTreeMap<i64, Value>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    store: Arc<RwLock<Store>>,
}

type ApiReply = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn success(message: &str, data: Value) -> ApiReply {
    Ok(Json(json!({ "status": "success", "message": message, "data": data })))
}

fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({ "status": "error", "message": message, "data": [] })),
    )
}

fn not_found(what: &str) -> (StatusCode, Json<Value>) {
    failure(StatusCode::NOT_FOUND, &format!("{what} not found"))
}

fn today() -> String {
    // Fixed date keeps responses deterministic for tests.
    "2024-01-01".to_string()
}

/// Router for the mock API. Every route requires `Authorization: Bearer <token>`.
pub fn app(token: &str) -> Router {
    let state = AppState {
        token: Arc::from(token),
        store: Arc::new(RwLock::new(Store::default())),
    };

    Router::new()
        .route("/api/ping", get(ping))
        .route("/api/versions", get(versions))
        .route("/manage/case-templates/add", post(add_template))
        .route("/manage/case-templates/update/{template_id}", post(update_template))
        .route("/manage/case-templates/delete/{template_id}", post(delete_template))
        .route("/manage/customers/list", get(list_customers))
        .route("/manage/customers/add", post(add_customer))
        .route("/manage/customers/update/{customer_id}", post(update_customer))
        .route("/manage/customers/delete/{customer_id}", post(delete_customer))
        .route("/manage/customers/{customer_id}", get(get_customer))
        .route("/manage/customers/{customer_id}/contacts/add", post(add_contact))
        .route(
            "/manage/customers/{customer_id}/contacts/{contact_id}/update",
            post(update_contact),
        )
        .route(
            "/manage/customers/{customer_id}/contacts/{contact_id}/delete",
            post(delete_contact),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", state.token);
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if presented == Some(expected.as_str()) {
        next.run(request).await
    } else {
        tracing::debug!(path = %request.uri().path(), "rejected request without valid token");
        failure(StatusCode::UNAUTHORIZED, "Authentication required").into_response()
    }
}

async fn ping() -> ApiReply {
    success("pong", json!([]))
}

async fn versions() -> ApiReply {
    success(
        "",
        json!({ "api_current": API_CURRENT, "api_min": API_MIN, "iris_current": IRIS_CURRENT }),
    )
}

fn template_view(id: i64, template: &Value) -> Value {
    let text = |key: &str| template.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
    json!({
        "type_id": id,
        "type_name": text("name"),
        "type_description": text("description"),
        "type_taxonomy": text("classification"),
        "type_validation_expect": "",
        "type_validation_regex": "",
        "registry": template.get("tasks").cloned().unwrap_or(Value::Null),
    })
}

fn parse_template(input: &TemplateInput) -> Result<Value, (StatusCode, Json<Value>)> {
    let template: Value = serde_json::from_str(&input.case_template_json)
        .map_err(|_| failure(StatusCode::BAD_REQUEST, "Invalid JSON"))?;
    if template.get("name").and_then(Value::as_str).is_none() {
        return Err(failure(StatusCode::BAD_REQUEST, "Template needs a name"));
    }
    Ok(template)
}

async fn add_template(State(state): State<AppState>, Json(input): Json<TemplateInput>) -> ApiReply {
    let template = parse_template(&input)?;
    let mut store = state.store.write().await;
    let id = store.next_id();
    let view = template_view(id, &template);
    store.templates.insert(id, template);
    success("Added successfully", view)
}

async fn update_template(
    State(state): State<AppState>,
    Path(template_id): Path<i64>,
    Json(input): Json<TemplateInput>,
) -> ApiReply {
    let template = parse_template(&input)?;
    let mut store = state.store.write().await;
    let slot = store
        .templates
        .get_mut(&template_id)
        .ok_or_else(|| not_found("Case template"))?;
    *slot = template;
    success("Updated successfully", template_view(template_id, slot))
}

async fn delete_template(State(state): State<AppState>, Path(template_id): Path<i64>) -> ApiReply {
    let mut store = state.store.write().await;
    store
        .templates
        .remove(&template_id)
        .ok_or_else(|| not_found("Case template"))?;
    success("Deleted", json!([]))
}

async fn list_customers(State(state): State<AppState>) -> ApiReply {
    let store = state.store.read().await;
    let customers: Vec<&Customer> = store.customers.values().collect();
    success("", json!(customers))
}

async fn get_customer(State(state): State<AppState>, Path(customer_id): Path<i64>) -> ApiReply {
    let store = state.store.read().await;
    let customer = store
        .customers
        .get(&customer_id)
        .ok_or_else(|| not_found("Customer"))?;
    success("", json!(customer))
}

async fn add_customer(State(state): State<AppState>, Json(input): Json<CustomerInput>) -> ApiReply {
    if input.customer_name.trim().is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "customer_name is required"));
    }
    let mut store = state.store.write().await;
    if store
        .customers
        .values()
        .any(|c| c.customer_name == input.customer_name)
    {
        return Err(failure(StatusCode::BAD_REQUEST, "Customer already exists"));
    }

    let id = store.next_id();
    let customer = Customer {
        customer_id: id,
        customer_name: input.customer_name,
        customer_description: input.customer_description,
        customer_sla: input.customer_sla,
        customer_uuid: Uuid::new_v4().to_string(),
        creation_date: today(),
        last_update_date: today(),
        custom_attributes: input.custom_attributes.unwrap_or_default(),
        contacts: Vec::new(),
    };
    store.customers.insert(id, customer.clone());

    success(
        "Added successfully",
        json!({
            "customer_id": customer.customer_id,
            "customer_name": customer.customer_name,
            "customer_description": customer.customer_description,
            "customer_sla": customer.customer_sla,
            "client_uuid": customer.customer_uuid,
            "creation_date": customer.creation_date,
            "last_update_date": customer.last_update_date,
            "custom_attributes": customer.custom_attributes,
        }),
    )
}

async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
    Json(input): Json<CustomerInput>,
) -> ApiReply {
    let mut store = state.store.write().await;
    let customer = store
        .customers
        .get_mut(&customer_id)
        .ok_or_else(|| not_found("Customer"))?;
    customer.customer_name = input.customer_name;
    customer.customer_description = input.customer_description;
    customer.customer_sla = input.customer_sla;
    if let Some(attributes) = input.custom_attributes {
        customer.custom_attributes = attributes;
    }
    customer.last_update_date = today();
    success("Updated successfully", json!(customer))
}

async fn delete_customer(State(state): State<AppState>, Path(customer_id): Path<i64>) -> ApiReply {
    let mut store = state.store.write().await;
    store
        .customers
        .remove(&customer_id)
        .ok_or_else(|| not_found("Customer"))?;
    success("Deleted", json!([]))
}

fn apply_contact(contact: &mut Contact, input: ContactInput) {
    contact.contact_name = input.contact_name;
    contact.contact_role = input.contact_role;
    contact.contact_email = input.contact_email;
    contact.contact_mobile_phone = input.contact_mobile_phone;
    contact.contact_work_phone = input.contact_work_phone;
    contact.contact_note = input.contact_note;
    if let Some(attributes) = input.custom_attributes {
        contact.custom_attributes = attributes;
    }
}

async fn add_contact(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
    Json(input): Json<ContactInput>,
) -> ApiReply {
    let mut store = state.store.write().await;
    let id = store.next_id();
    let customer = store
        .customers
        .get_mut(&customer_id)
        .ok_or_else(|| not_found("Customer"))?;

    let mut contact = Contact {
        id,
        client_id: customer_id,
        contact_uuid: Uuid::new_v4().to_string(),
        ..Contact::default()
    };
    apply_contact(&mut contact, input);
    customer.contacts.push(contact.clone());
    success("Added successfully", json!(contact))
}

async fn update_contact(
    State(state): State<AppState>,
    Path((customer_id, contact_id)): Path<(i64, i64)>,
    Json(input): Json<ContactInput>,
) -> ApiReply {
    let mut store = state.store.write().await;
    let contact = store
        .customers
        .get_mut(&customer_id)
        .and_then(|c| c.contacts.iter_mut().find(|ct| ct.id == contact_id))
        .ok_or_else(|| not_found("Contact"))?;
    apply_contact(contact, input);
    success("Updated successfully", json!(contact))
}

async fn delete_contact(
    State(state): State<AppState>,
    Path((customer_id, contact_id)): Path<(i64, i64)>,
) -> ApiReply {
    let mut store = state.store.write().await;
    let contacts = &mut store
        .customers
        .get_mut(&customer_id)
        .ok_or_else(|| not_found("Customer"))?
        .contacts;
    let before = contacts.len();
    contacts.retain(|c| c.id != contact_id);
    if contacts.len() == before {
        return Err(not_found("Contact"));
    }
    success("Deleted", json!([]))
}
