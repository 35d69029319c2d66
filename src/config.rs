use std::env;

/// Backend mặc định khi chạy Azure Functions host cục bộ.
pub const DEFAULT_FUNCTION_URL: &str = "http://localhost:7071";
pub const FUNCTION_URL_VAR: &str = "FUNCTION_APP_URL";

/// Resolve the function base URL: CLI flag wins, then the environment
/// variable, then the local default.
pub fn resolve_function_url(cli_value: Option<String>) -> String {
    function_url_from(cli_value, env::var(FUNCTION_URL_VAR).ok())
}

fn function_url_from(cli_value: Option<String>, env_value: Option<String>) -> String {
    cli_value
        .or(env_value)
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| {
            log::info!("No function URL configured, using {DEFAULT_FUNCTION_URL}");
            DEFAULT_FUNCTION_URL.to_string()
        })
}

/// Ảnh chụp các biến môi trường liên quan managed identity.
/// Đọc đúng một lần lúc khởi động rồi truyền xuống, không đọc lại ở call site.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    /// App Service site name (`WEBSITE_SITE_NAME`).
    pub site_name: Option<String>,
    /// Managed identity client id (`AZURE_CLIENT_ID`).
    pub client_id: Option<String>,
    /// Token endpoint (`IDENTITY_ENDPOINT`, hoặc `MSI_ENDPOINT` đời cũ).
    pub identity_endpoint: Option<String>,
    /// Secret header đi kèm endpoint App Service (`IDENTITY_HEADER`).
    pub identity_header: Option<String>,
}

impl EnvSnapshot {
    pub fn capture() -> Self {
        Self {
            site_name: non_empty_var("WEBSITE_SITE_NAME"),
            client_id: non_empty_var("AZURE_CLIENT_ID"),
            identity_endpoint: non_empty_var("IDENTITY_ENDPOINT")
                .or_else(|| non_empty_var("MSI_ENDPOINT")),
            identity_header: non_empty_var("IDENTITY_HEADER"),
        }
    }

    /// Đang chạy trong môi trường Azure (App Service / Managed Identity)?
    /// Chỉ cần một signal là đủ.
    pub fn is_managed(&self) -> bool {
        self.site_name.is_some() || self.client_id.is_some() || self.identity_endpoint.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
