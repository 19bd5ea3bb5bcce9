//! Usage: HTTP delivery of `{user_id, token}` registrations to the backend.

use crate::backend_sync::{TokenRegistrar, TokenRegistration};

const MAX_LOGGED_BODY_CHARS: usize = 512;

pub(crate) fn build_http_client() -> Result<reqwest::Client, String> {
    // No request timeout: backend sync relies on the transport defaults.
    reqwest::Client::builder()
        .user_agent(format!("ondemand-shell/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| format!("HTTP_CLIENT_INIT: {e}"))
}

fn truncate_for_log(body: &str) -> String {
    if body.chars().count() <= MAX_LOGGED_BODY_CHARS {
        return body.to_string();
    }
    let mut out: String = body.chars().take(MAX_LOGGED_BODY_CHARS).collect();
    out.push('…');
    out
}

pub(crate) struct HttpTokenRegistrar {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpTokenRegistrar {
    pub(crate) fn new(client: reqwest::Client, endpoint: &str) -> Result<Self, String> {
        let endpoint = reqwest::Url::parse(endpoint.trim())
            .map_err(|e| format!("SEC_INVALID_INPUT: invalid backend_url={endpoint}: {e}"))?;
        Ok(Self { client, endpoint })
    }
}

impl TokenRegistrar for HttpTokenRegistrar {
    async fn register(&self, registration: &TokenRegistration) -> Result<String, String> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(registration)
            .send()
            .await
            .map_err(|e| format!("BACKEND_NETWORK: {e}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("BACKEND_NETWORK: failed to read response body: {e}"))?;

        if !status.is_success() {
            return Err(format!(
                "BACKEND_REJECTED: status={} body={}",
                status.as_u16(),
                truncate_for_log(&body)
            ));
        }

        Ok(truncate_for_log(&body))
    }
}
