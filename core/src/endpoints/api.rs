use crate::client::IrisClient;
use crate::error::ApiResult;
use crate::http::RequestBuilder;
use crate::types::{ApiMeta, ApiResponse, VersionInfo};

impl IrisClient {
    /// Current and minimum API versions plus the IRIS release.
    pub fn get_api_version(&self) -> ApiResult<ApiResponse<VersionInfo>> {
        let spec = RequestBuilder::new()
            .method("GET")
            .path("/api/versions")
            .build();
        self.send(spec)
    }

    /// Checks that the server is reachable and the token is accepted.
    /// A healthy server answers with message `pong`.
    pub fn ping(&self) -> ApiResult<ApiMeta> {
        let spec = RequestBuilder::new().method("GET").path("/api/ping").build();
        self.send(spec)
    }
}
