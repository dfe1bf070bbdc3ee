use std::time::Duration;

use reqwest::Client;

use crate::error::ClientError;

/// Shared `reqwest` client with connect and whole-request timeouts.
pub fn build_http_client(
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<Client, ClientError> {
    let client = Client::builder()
        .pool_max_idle_per_host(5)
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()?;
    Ok(client)
}

/// Join a base URL and a path without doubling or dropping the slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
