use serde::Serialize;

use super::JSON;
use crate::client::{to_json_body, IrisClient};
use crate::error::ApiResult;
use crate::http::RequestBuilder;
use crate::types::{ApiResponse, CaseTemplate};

/// IRIS expects the template itself as a JSON document inside a string.
#[derive(Serialize)]
struct TemplateBody<'a> {
    case_template_json: &'a str,
}

impl IrisClient {
    /// Uploads a new case template. `template_json` is sent as-is.
    pub fn add_case_template(&self, template_json: &str) -> ApiResult<ApiResponse<CaseTemplate>> {
        let body = to_json_body(&TemplateBody {
            case_template_json: template_json,
        })?;
        let spec = RequestBuilder::new()
            .method("POST")
            .path("/manage/case-templates/add")
            .header("Content-Type", JSON)
            .body(body)
            .build();
        self.send(spec)
    }

    pub fn update_case_template(
        &self,
        template_id: i64,
        template_json: &str,
    ) -> ApiResult<ApiResponse<CaseTemplate>> {
        let body = to_json_body(&TemplateBody {
            case_template_json: template_json,
        })?;
        let spec = RequestBuilder::new()
            .method("POST")
            .path(format!("/manage/case-templates/update/{template_id}"))
            .header("Content-Type", JSON)
            .body(body)
            .build();
        self.send(spec)
    }

    pub fn delete_case_template(&self, template_id: i64) -> ApiResult<()> {
        let spec = RequestBuilder::new()
            .method("POST")
            .path(format!("/manage/case-templates/delete/{template_id}"))
            .header("Content-Type", JSON)
            .build();
        self.send_expecting_ok(spec)
    }
}
