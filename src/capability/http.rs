//! HTTP-backed capability
//!
//! Reads fetch a URL as text. Resource creation posts to a repository
//! hosting API (GitHub-compatible) and needs an API token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::capability::{Capability, CapabilityOutcome, CapabilityRequest};
use crate::core::error::{AgentError, Result};

const DEFAULT_RESOURCE_API: &str = "https://api.github.com/user/repos";

pub struct HttpCapability {
    name: String,
    client: Client,
    resource_api_url: String,
    token: Option<String>,
    timeout: Duration,
}

#[derive(Serialize)]
struct CreateResourceBody<'a> {
    name: &'a str,
    description: &'a str,
    private: bool,
}

#[derive(Deserialize)]
struct CreateResourceResponse {
    html_url: Option<String>,
    message: Option<String>,
}

impl HttpCapability {
    /// Every request made through this capability fails after `timeout`
    pub fn new(name: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgentError::Capability(format!("Could not build HTTP client: {}", e)))?;
        Ok(Self {
            name: name.into(),
            client,
            resource_api_url: DEFAULT_RESOURCE_API.into(),
            token,
            timeout,
        })
    }

    /// Token from the config, falling back to `RESOURCE_API_TOKEN`
    pub fn from_token_or_env(name: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let token = token.or_else(|| std::env::var("RESOURCE_API_TOKEN").ok());
        Self::new(name, token, timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn with_resource_api_url(mut self, url: impl Into<String>) -> Self {
        self.resource_api_url = url.into();
        self
    }

    async fn read(&self, address: &str) -> Result<CapabilityOutcome> {
        tracing::info!(address, "Reading external resource");
        let response = self
            .client
            .get(address)
            .send()
            .await
            .map_err(|e| AgentError::Capability(format!("Exception fetching {}: {}", address, e)))?;

        if !response.status().is_success() {
            return Ok(CapabilityOutcome::failed(format!(
                "Error fetching {}: {}",
                address,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AgentError::Capability(e.to_string()))?;
        Ok(CapabilityOutcome::succeeded(body))
    }

    async fn create_resource(&self, name: &str, description: &str) -> Result<CapabilityOutcome> {
        let Some(token) = &self.token else {
            tracing::warn!("Resource API token not configured");
            return Ok(CapabilityOutcome::failed("Resource API token not configured."));
        };

        tracing::info!(name, "Creating remote resource");
        let response = self
            .client
            .post(&self.resource_api_url)
            .header("Authorization", format!("token {}", token))
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", "aetherius")
            .json(&CreateResourceBody {
                name,
                description,
                private: false,
            })
            .send()
            .await
            .map_err(|e| AgentError::Capability(format!("Exception creating resource: {}", e)))?;

        let ok = response.status().is_success();
        let body: CreateResourceResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Capability(e.to_string()))?;

        if ok {
            Ok(CapabilityOutcome::succeeded(format!(
                "Resource created: {}",
                body.html_url.unwrap_or_default()
            )))
        } else {
            Ok(CapabilityOutcome::failed(format!(
                "Failed to create resource: {}",
                body.message.unwrap_or_else(|| "unknown error".into())
            )))
        }
    }
}

#[async_trait]
impl Capability for HttpCapability {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, request: &CapabilityRequest) -> Result<CapabilityOutcome> {
        match request {
            CapabilityRequest::Read { address } => self.read(address).await,
            CapabilityRequest::CreateResource { name, description } => {
                self.create_resource(name, description).await
            }
        }
    }
}
