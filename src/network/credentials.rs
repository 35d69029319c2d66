use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::config::EnvSnapshot;

/// Token giả cho phát triển cục bộ. Backend dev mode chấp nhận giá trị này.
pub const MOCK_TOKEN: &str = "mock-development-token";

/// Audience cố định mà mọi token managed identity được scope tới.
const TOKEN_RESOURCE: &str = "https://management.azure.com/";

/// Endpoint IMDS dùng khi không có endpoint App Service trong môi trường.
const IMDS_TOKEN_ENDPOINT: &str = "http://169.254.169.254/metadata/identity/oauth2/token";
const APP_SERVICE_API_VERSION: &str = "2019-08-01";
const IMDS_API_VERSION: &str = "2018-02-01";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Credential gọi REST endpoint của managed identity để đổi lấy access token.
/// Host chịu trách nhiệm cache/refresh phía sau endpoint; client không track expiry.
pub struct ManagedCredential {
    http: reqwest::Client,
    endpoint: String,
    api_version: &'static str,
    client_id: Option<String>,
    identity_header: Option<String>,
}

impl ManagedCredential {
    fn new(http: reqwest::Client, env: &EnvSnapshot) -> Self {
        match &env.identity_endpoint {
            // App Service / Functions: endpoint + secret header do host cấp
            Some(endpoint) => Self {
                http,
                endpoint: endpoint.clone(),
                api_version: APP_SERVICE_API_VERSION,
                client_id: env.client_id.clone(),
                identity_header: env.identity_header.clone(),
            },
            // VM/container: IMDS yêu cầu header `Metadata: true`
            None => Self {
                http,
                endpoint: IMDS_TOKEN_ENDPOINT.to_string(),
                api_version: IMDS_API_VERSION,
                client_id: env.client_id.clone(),
                identity_header: None,
            },
        }
    }

    async fn request_token(&self) -> Result<String, reqwest::Error> {
        let mut request = self
            .http
            .get(&self.endpoint)
            .query(&[("resource", TOKEN_RESOURCE), ("api-version", self.api_version)]);

        if let Some(client_id) = &self.client_id {
            request = request.query(&[("client_id", client_id.as_str())]);
        }

        request = match &self.identity_header {
            Some(secret) => request.header("X-IDENTITY-HEADER", secret.as_str()),
            None => request.header("Metadata", "true"),
        };

        let response = request.send().await?.error_for_status()?;
        let body: TokenResponse = response.json().await?;
        Ok(body.access_token)
    }
}

/// Nguồn token, chọn đúng một lần lúc khởi tạo từ snapshot môi trường.
enum TokenSource {
    Managed(OnceCell<ManagedCredential>),
    Mock,
}

pub struct CredentialResolver {
    env: EnvSnapshot,
    http: reqwest::Client,
    source: TokenSource,
}

impl CredentialResolver {
    pub fn new(http: reqwest::Client, env: EnvSnapshot) -> Self {
        let source = if env.is_managed() {
            TokenSource::Managed(OnceCell::new())
        } else {
            TokenSource::Mock
        };
        Self { env, http, source }
    }

    pub fn is_managed(&self) -> bool {
        matches!(self.source, TokenSource::Managed(_))
    }

    /// Lấy access token. Không bao giờ lỗi về phía caller: mọi thất bại khi
    /// dựng credential hay gọi endpoint đều rơi về [`MOCK_TOKEN`].
    pub async fn get_token(&self) -> String {
        let cell = match &self.source {
            TokenSource::Managed(cell) => cell,
            TokenSource::Mock => {
                log::warn!("Using mock token for local development");
                return MOCK_TOKEN.to_string();
            }
        };

        // Credential dựng lười và đúng một lần, kể cả khi nhiều call đua nhau.
        let credential = cell
            .get_or_init(|| async { ManagedCredential::new(self.http.clone(), &self.env) })
            .await;

        match credential.request_token().await {
            Ok(token) => token,
            Err(err) => {
                log::warn!("Managed identity token request failed, using mock token: {err}");
                MOCK_TOKEN.to_string()
            }
        }
    }

    #[cfg(test)]
    fn credential_initialized(&self) -> bool {
        match &self.source {
            TokenSource::Managed(cell) => cell.initialized(),
            TokenSource::Mock => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn managed_env() -> EnvSnapshot {
        // Port 1 từ chối kết nối ngay, nên test không chờ timeout
        EnvSnapshot {
            identity_endpoint: Some("http://127.0.0.1:1/msi/token".to_string()),
            identity_header: Some("header-secret".to_string()),
            ..EnvSnapshot::default()
        }
    }

    #[tokio::test]
    async fn dev_environment_returns_mock_token_without_building_credential() {
        let resolver = CredentialResolver::new(reqwest::Client::new(), EnvSnapshot::default());

        assert!(!resolver.is_managed());
        assert_eq!(resolver.get_token().await, MOCK_TOKEN);
        assert_eq!(resolver.get_token().await, MOCK_TOKEN);
        assert!(!resolver.credential_initialized());
    }

    #[tokio::test]
    async fn unreachable_managed_endpoint_recovers_to_mock_token() {
        let resolver = CredentialResolver::new(reqwest::Client::new(), managed_env());

        assert!(resolver.is_managed());
        assert_eq!(resolver.get_token().await, MOCK_TOKEN);
        assert_eq!(resolver.get_token().await, MOCK_TOKEN);
        // Dựng một lần, lần gọi sau dùng lại
        assert!(resolver.credential_initialized());
    }
}
