use reqwasm::http::{Request, RequestCredentials};

use crate::api::{ApiRequest, ApiResponse, Method, Transport};
use crate::errors::{UiError, UiResult};

/// `fetch` through reqwasm. Only the status of the response is looked at.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> UiResult<ApiResponse> {
        let mut req = match request.method {
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            req = req.header(name, value);
        }
        if request.include_credentials {
            req = req.credentials(RequestCredentials::Include);
        }
        if let Some(body) = request.body {
            req = req.body(body);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| UiError::Network(e.to_string()))?;
        Ok(ApiResponse {
            status: resp.status(),
        })
    }
}
