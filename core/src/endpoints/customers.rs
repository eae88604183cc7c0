use super::JSON;
use crate::client::{to_json_body, IrisClient};
use crate::error::ApiResult;
use crate::http::RequestBuilder;
use crate::types::{ApiResponse, Contact, ContactRequest, CreatedCustomer, Customer, CustomerRequest};

impl IrisClient {
    /// Every customer registered on the instance.
    pub fn get_customers(&self) -> ApiResult<ApiResponse<Vec<Customer>>> {
        let spec = RequestBuilder::new()
            .method("GET")
            .path("/manage/customers/list")
            .build();
        self.send(spec)
    }

    pub fn get_customer(&self, customer_id: i64) -> ApiResult<ApiResponse<Customer>> {
        let spec = RequestBuilder::new()
            .method("GET")
            .path(format!("/manage/customers/{customer_id}"))
            .build();
        self.send(spec)
    }

    pub fn add_customer(&self, customer: &CustomerRequest) -> ApiResult<ApiResponse<CreatedCustomer>> {
        let spec = RequestBuilder::new()
            .method("POST")
            .path("/manage/customers/add")
            .header("Content-Type", JSON)
            .body(to_json_body(customer)?)
            .build();
        self.send(spec)
    }

    pub fn update_customer(
        &self,
        customer_id: i64,
        customer: &CustomerRequest,
    ) -> ApiResult<ApiResponse<Customer>> {
        let spec = RequestBuilder::new()
            .method("POST")
            .path(format!("/manage/customers/update/{customer_id}"))
            .header("Content-Type", JSON)
            .body(to_json_body(customer)?)
            .build();
        self.send(spec)
    }

    pub fn delete_customer(&self, customer_id: i64) -> ApiResult<()> {
        let spec = RequestBuilder::new()
            .method("POST")
            .path(format!("/manage/customers/delete/{customer_id}"))
            .header("Content-Type", JSON)
            .build();
        self.send_expecting_ok(spec)
    }

    pub fn add_customer_contact(
        &self,
        customer_id: i64,
        contact: &ContactRequest,
    ) -> ApiResult<ApiResponse<Contact>> {
        let spec = RequestBuilder::new()
            .method("POST")
            .path(format!("/manage/customers/{customer_id}/contacts/add"))
            .header("Content-Type", JSON)
            .body(to_json_body(contact)?)
            .build();
        self.send(spec)
    }

    pub fn update_customer_contact(
        &self,
        customer_id: i64,
        contact_id: i64,
        contact: &ContactRequest,
    ) -> ApiResult<ApiResponse<Contact>> {
        let spec = RequestBuilder::new()
            .method("POST")
            .path(format!("/manage/customers/{customer_id}/contacts/{contact_id}/update"))
            .header("Content-Type", JSON)
            .body(to_json_body(contact)?)
            .build();
        self.send(spec)
    }

    pub fn delete_customer_contact(&self, customer_id: i64, contact_id: i64) -> ApiResult<()> {
        let spec = RequestBuilder::new()
            .method("POST")
            .path(format!("/manage/customers/{customer_id}/contacts/{contact_id}/delete"))
            .header("Content-Type", JSON)
            .build();
        self.send_expecting_ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::auth::ApiKeyAuth;
    use crate::error::ApiError;
    use crate::test_utils::RecordingTransport;

    use super::*;

    fn client(transport: &Arc<RecordingTransport>) -> IrisClient {
        IrisClient::new("https://iris.example.com", ApiKeyAuth::new("abc123"), transport.clone())
    }

    fn sent_json(transport: &RecordingTransport) -> serde_json::Value {
        let sent = transport.take();
        serde_json::from_slice(sent[0].body()).unwrap()
    }

    #[test]
    fn list_customers() {
        let transport = RecordingTransport::ok(
            r#"{"status":"success","message":"","data":[
                {"customer_id":1,"customer_name":"IrisInitialClient","customer_uuid":"u-1","contacts":[]},
                {"customer_id":2,"customer_name":"Acme","custom_attributes":null}
            ]}"#,
        );
        let customers = client(&transport).get_customers().unwrap();
        assert_eq!(customers.data.len(), 2);
        assert_eq!(customers.data[1].customer_name, "Acme");
        assert_eq!(transport.take()[0].uri().path(), "/manage/customers/list");
    }

    #[test]
    fn get_customer_reads_data() {
        let transport = RecordingTransport::ok(
            r#"{"status":"success","message":"","data":{"customer_id":7,"customer_name":"Acme",
                "contacts":[{"id":3,"client_id":7,"contact_name":"SOC"}],
                "custom_attributes":{"tier":"gold"}}}"#,
        );
        let customer = client(&transport).get_customer(7).unwrap();
        assert_eq!(customer.data.customer_id, 7);
        assert_eq!(customer.data.contacts[0].contact_name, "SOC");
        assert_eq!(customer.data.custom_attributes["tier"], "gold");
        assert_eq!(transport.take()[0].uri().path(), "/manage/customers/7");
    }

    #[test]
    fn add_customer_sends_fields() {
        let transport = RecordingTransport::ok(
            r#"{"status":"success","message":"Added successfully","data":{"customer_id":8,"customer_name":"Acme","client_uuid":"c-8","creation_date":"2024-05-01"}}"#,
        );
        let mut request = CustomerRequest::new("Acme");
        request.custom_attributes.insert("tier".to_string(), json!("gold"));

        let created = client(&transport).add_customer(&request).unwrap();
        assert_eq!(created.data.customer_id, 8);
        assert_eq!(created.data.client_uuid, "c-8");
        assert_eq!(created.meta.message, "Added successfully");

        let body = sent_json(&transport);
        assert_eq!(body["customer_name"], "Acme");
        assert_eq!(body["custom_attributes"]["tier"], "gold");
    }

    #[test]
    fn add_customer_500_skips_decode() {
        let transport = RecordingTransport::new(500, "definitely { not json");
        let err = client(&transport)
            .add_customer(&CustomerRequest::new("Acme"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500 }));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn update_customer_targets_id() {
        let transport = RecordingTransport::ok(r#"{"status":"success","message":"","data":{"customer_id":7,"customer_sla":"4h"}}"#);
        let request = CustomerRequest {
            customer_sla: "4h".to_string(),
            ..CustomerRequest::new("Acme")
        };
        let updated = client(&transport).update_customer(7, &request).unwrap();
        assert_eq!(updated.data.customer_sla, "4h");

        let sent = transport.take();
        assert_eq!(sent[0].method(), "POST");
        assert_eq!(sent[0].uri().path(), "/manage/customers/update/7");
    }

    #[test]
    fn delete_customer_with_empty_body_succeeds() {
        let transport = RecordingTransport::ok("");
        client(&transport).delete_customer(7).unwrap();

        let sent = transport.take();
        assert_eq!(sent[0].uri().path(), "/manage/customers/delete/7");
        assert!(sent[0].body().is_empty());
    }

    #[test]
    fn delete_customer_404_is_status_error() {
        let transport = RecordingTransport::new(404, "");
        let err = client(&transport).delete_customer(7).unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn add_contact_uses_customer_path() {
        let transport = RecordingTransport::ok(
            r#"{"status":"success","message":"","data":{"id":11,"client_id":7,"contact_name":"Wile","contact_work_phone":"+1 555 0100"}}"#,
        );
        let request = ContactRequest {
            contact_work_phone: "+1 555 0100".to_string(),
            ..ContactRequest::new("Wile")
        };
        let contact = client(&transport).add_customer_contact(7, &request).unwrap();
        assert_eq!(contact.data.id, 11);
        assert_eq!(contact.data.contact_work_phone, "+1 555 0100");

        let sent = transport.take();
        assert_eq!(sent[0].uri().path(), "/manage/customers/7/contacts/add");
        let body: serde_json::Value = serde_json::from_slice(sent[0].body()).unwrap();
        assert_eq!(body["contact_work_phone"], "+1 555 0100");
    }

    #[test]
    fn update_contact_reads_data_field() {
        let transport = RecordingTransport::ok(
            r#"{"status":"success","message":"","data":{"id":11,"contact_role":"CISO"}}"#,
        );
        let request = ContactRequest {
            contact_role: "CISO".to_string(),
            ..ContactRequest::new("Wile")
        };
        let contact = client(&transport).update_customer_contact(7, 11, &request).unwrap();
        assert_eq!(contact.data.contact_role, "CISO");
        assert_eq!(transport.take()[0].uri().path(), "/manage/customers/7/contacts/11/update");
    }

    #[test]
    fn delete_contact_non_200_is_error() {
        let transport = RecordingTransport::new(400, "");
        let err = client(&transport).delete_customer_contact(7, 11).unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 400 }));
        assert_eq!(transport.take()[0].uri().path(), "/manage/customers/7/contacts/11/delete");
    }
}
