//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulated time in milliseconds
///
/// The agent clock advances by the configured cycle interval, never by wall
/// time, so every expiry check is reproducible.
pub type SimTime = u64;

/// Identifier of a concept known to the creativity system
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConceptId(pub String);

impl ConceptId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConceptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a component registered with the emergence system
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Clamp a scalar to the unit interval
pub fn unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f32>() / values.len() as f32)
    }
}

/// Population variance
pub fn variance(values: &[f32]) -> Option<f32> {
    let m = mean(values)?;
    Some(values.iter().map(|v| (v - m).powi(2)).sum::<f32>() / values.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_clamps() {
        assert_eq!(unit(1.4), 1.0);
        assert_eq!(unit(-0.2), 0.0);
        assert_eq!(unit(0.3), 0.3);
    }

    #[test]
    fn test_mean_and_variance() {
        assert_eq!(mean(&[]), None);
        assert!((mean(&[0.2, 0.4]).unwrap() - 0.3).abs() < 1e-6);
        assert!(variance(&[0.5, 0.5, 0.5]).unwrap().abs() < 1e-6);
        assert!((variance(&[0.0, 1.0]).unwrap() - 0.25).abs() < 1e-6);
    }
}
