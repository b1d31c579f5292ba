use serde::{Deserialize, Serialize};
use std::fmt;

/// Which handler group a service instance mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Inference,
    Training,
}

impl Variant {
    pub fn from_training_flag(is_training: bool) -> Self {
        if is_training {
            Self::Training
        } else {
            Self::Inference
        }
    }

    /// Fixed label hashed by the variant's handler.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inference => "inference",
            Self::Training => "training",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Inference => "/inference",
            Self::Training => "/training",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inference => write!(f, "Inference"),
            Self::Training => write!(f, "Training"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    pub is_training: bool,
}

impl ServiceConfig {
    pub fn new(is_training: bool) -> Self {
        Self { is_training }
    }

    pub fn variant(&self) -> Variant {
        Variant::from_training_flag(self.is_training)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: Status,
    pub result: String,
}

impl StatusResponse {
    pub fn ok(result: String) -> Self {
        Self {
            status: Status::Ok,
            result,
        }
    }
}
