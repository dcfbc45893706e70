use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "horizontal" | "h" => Some(Self::Horizontal),
            "vertical" | "v" => Some(Self::Vertical),
            _ => None,
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Horizontal
    }
}

/// One published port plus the entity that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortEntry {
    pub port: u32,
    #[serde(alias = "containerId")]
    pub owner_id: String,
    #[serde(alias = "containerName")]
    pub owner_label: String,
    #[serde(alias = "imageName")]
    pub owner_image: String,
}

/// The payload handed over by the data-fetching collaborator.
///
/// `max_port` is declared by the producer and may exceed the largest entry;
/// scaling always uses `effective_max`, so a stale declaration can never
/// push an entry past the axis ceiling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub ports: Vec<PortEntry>,
    #[serde(default)]
    pub max_port: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("duplicate port value {port} in dataset")]
    DuplicatePort { port: u32 },
}

impl Dataset {
    /// Boundary validation. Port values must be unique within one dataset;
    /// a producer that reports the same value twice gets a hard rejection
    /// rather than an arbitrary pick.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let mut seen: Vec<u32> = self.ports.iter().map(|entry| entry.port).collect();
        seen.sort_unstable();
        for pair in seen.windows(2) {
            if pair[0] == pair[1] {
                return Err(DatasetError::DuplicatePort { port: pair[0] });
            }
        }
        Ok(())
    }

    /// Largest value the axis has to accommodate.
    pub fn effective_max(&self) -> u32 {
        let actual = self.ports.iter().map(|entry| entry.port).max().unwrap_or(0);
        self.max_port.max(actual)
    }
}
