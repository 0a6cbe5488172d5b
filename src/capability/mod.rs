//! Capabilities - externally supplied asynchronous operations
//!
//! Environment entries may expose a capability. The agent only calls one
//! when the chosen action delegates to it, and every failure (missing
//! capability, rejected call) is folded into an unsuccessful action result.

pub mod http;

pub use http::HttpCapability;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use crate::core::actions::CapabilityRequest;
use crate::core::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityOutcome {
    pub success: bool,
    pub feedback: String,
}

impl CapabilityOutcome {
    pub fn succeeded(feedback: impl Into<String>) -> Self {
        Self {
            success: true,
            feedback: feedback.into(),
        }
    }

    pub fn failed(feedback: impl Into<String>) -> Self {
        Self {
            success: false,
            feedback: feedback.into(),
        }
    }
}

#[async_trait]
pub trait Capability: Send + Sync {
    fn name(&self) -> &str;

    async fn invoke(&self, request: &CapabilityRequest) -> Result<CapabilityOutcome>;
}
