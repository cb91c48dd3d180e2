// Router Dashboard - REST Client
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! HTTP client for the router's diagnostics and core APIs.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use super::paths;
use crate::config::ConnectionSettings;
use crate::models::{
    DiskUsage, Gateway, InterfaceInfo, InterfaceNames, MemoryUsage, ServiceAction, ServiceStatus,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Authenticated client for one router.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl ApiClient {
    /// Create a client from connection settings.
    pub fn new(connection: &ConnectionSettings) -> Result<Self> {
        if !connection.is_configured() {
            bail!("Router URL and API credentials are not configured");
        }

        reqwest::Url::parse(&connection.base_url)
            .with_context(|| format!("Invalid router URL {:?}", connection.base_url))?;

        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .danger_accept_invalid_certs(connection.accept_invalid_certs)
            .user_agent(format!("router-dashboard/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: connection.base_url.trim_end_matches('/').to_string(),
            api_key: connection.api_key.clone(),
            api_secret: connection.api_secret.clone(),
        })
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Browser URL of the firewall log filtered by one rule.
    pub fn rule_log_url(&self, rid: &str) -> Result<String> {
        let mut url = reqwest::Url::parse(&self.url(paths::FIREWALL_LOG_PAGE))
            .context("Invalid firewall log URL")?;
        url.query_pairs_mut().append_pair("rid", rid);
        Ok(url.into())
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        debug!("GET {}", path);
        let response = self
            .http
            .get(self.url(path))
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", path))?
            .error_for_status()
            .with_context(|| format!("Router rejected {}", path))?;

        response
            .json()
            .await
            .with_context(|| format!("Invalid JSON from {}", path))
    }

    async fn post_json(&self, path: &str) -> Result<Value> {
        debug!("POST {}", path);
        let response = self
            .http
            .post(self.url(path))
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(&serde_json::json!({}))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", path))?
            .error_for_status()
            .with_context(|| format!("Router rejected {}", path))?;

        response
            .json()
            .await
            .with_context(|| format!("Invalid JSON from {}", path))
    }

    /// Memory figures; `None` when the router reports no totals.
    pub async fn memory(&self) -> Result<Option<MemoryUsage>> {
        let value = self.get_json(paths::SYSTEM_RESOURCES).await?;
        Ok(MemoryUsage::from_resources(&value))
    }

    /// Filesystem usage; `None` when the response has no device list.
    pub async fn disks(&self) -> Result<Option<DiskUsage>> {
        let value = self.get_json(paths::SYSTEM_DISK).await?;
        DiskUsage::from_disk_info(&value).context("Invalid disk size in systemDisk response")
    }

    /// CPU model string.
    pub async fn cpu_type(&self) -> Result<String> {
        let value = self.get_json(paths::CPU_TYPE).await?;
        Ok(match value {
            Value::String(s) => s,
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        })
    }

    /// Interface identifier to description map.
    pub async fn interface_names(&self) -> Result<InterfaceNames> {
        let value = self.get_json(paths::INTERFACE_NAMES).await?;
        Ok(InterfaceNames::from_response(&value))
    }

    /// Configured physical interfaces.
    pub async fn interfaces(&self) -> Result<Vec<InterfaceInfo>> {
        let value = self.get_json(paths::INTERFACES_INFO).await?;
        Ok(InterfaceInfo::list_from_response(&value))
    }

    /// All services with their running state.
    pub async fn services(&self) -> Result<Vec<ServiceStatus>> {
        let value = self.get_json(paths::SERVICES).await?;
        Ok(ServiceStatus::list_from_response(&value))
    }

    /// Start, stop or restart one service.
    pub async fn service_command(&self, action: ServiceAction, id: &str) -> Result<()> {
        let path = format!("{}/{}/{}", paths::SERVICE_COMMAND, action.command(), id);
        info!("Running service command: {} {}", action.command(), id);
        let value = self.post_json(&path).await?;

        if let Some(result) = value.get("result").and_then(Value::as_str) {
            if result.eq_ignore_ascii_case("failed") {
                bail!("Router reported failure for {} {}", action.command(), id);
            }
        }
        Ok(())
    }

    /// Gateway health.
    pub async fn gateways(&self) -> Result<Vec<Gateway>> {
        let value = self.get_json(paths::GATEWAYS).await?;
        Ok(Gateway::list_from_response(&value))
    }

    /// Open a server-sent events endpoint and return the streaming response.
    pub async fn open_stream(&self, path: &str) -> Result<reqwest::Response> {
        debug!("Opening event stream {}", path);
        self.http
            .get(self.url(path))
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await
            .with_context(|| format!("Failed to open event stream {}", path))?
            .error_for_status()
            .with_context(|| format!("Router rejected event stream {}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> ConnectionSettings {
        ConnectionSettings {
            base_url: "https://fw.lan/".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            accept_invalid_certs: true,
            reconnect_delay: None,
        }
    }

    #[test]
    fn test_urls() {
        let client = ApiClient::new(&connection()).unwrap();
        assert_eq!(
            client.url(paths::SYSTEM_DISK),
            "https://fw.lan/api/diagnostics/system/systemDisk"
        );
        assert_eq!(
            client.rule_log_url("abc123").unwrap(),
            "https://fw.lan/ui/diagnostics/firewall/log?rid=abc123"
        );
    }

    #[test]
    fn test_rule_log_url_encodes_rid() {
        let client = ApiClient::new(&connection()).unwrap();
        assert_eq!(
            client.rule_log_url("a b&c#d").unwrap(),
            "https://fw.lan/ui/diagnostics/firewall/log?rid=a+b%26c%23d"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut conn = connection();
        conn.base_url = "fw.lan".to_string();
        assert!(ApiClient::new(&conn).is_err());
    }

    #[test]
    fn test_unconfigured_connection_rejected() {
        let mut conn = connection();
        conn.api_secret.clear();
        assert!(ApiClient::new(&conn).is_err());
    }
}
