//! Model value object representing an inference model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Inference models known to work with the split prompts (Value Object)
///
/// Identifiers follow the Together AI naming scheme. Any other identifier is
/// carried through as [`Model::Custom`] so OpenAI-compatible endpoints with
/// their own catalogue keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Llama33_70BInstructTurbo,
    Llama31_70BInstructTurbo,
    Llama31_8BInstructTurbo,
    Qwen25_72BInstructTurbo,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Llama33_70BInstructTurbo => "meta-llama/Llama-3.3-70B-Instruct-Turbo",
            Model::Llama31_70BInstructTurbo => "meta-llama/Meta-Llama-3.1-70B-Instruct-Turbo",
            Model::Llama31_8BInstructTurbo => "meta-llama/Meta-Llama-3.1-8B-Instruct-Turbo",
            Model::Qwen25_72BInstructTurbo => "Qwen/Qwen2.5-72B-Instruct-Turbo",
            Model::Custom(s) => s,
        }
    }

    /// Check if the identifier is blank
    pub fn is_blank(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

impl Default for Model {
    /// Returns the default model (Llama 3.3 70B Instruct Turbo)
    fn default() -> Self {
        Model::Llama33_70BInstructTurbo
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "meta-llama/Llama-3.3-70B-Instruct-Turbo" => Model::Llama33_70BInstructTurbo,
            "meta-llama/Meta-Llama-3.1-70B-Instruct-Turbo" => Model::Llama31_70BInstructTurbo,
            "meta-llama/Meta-Llama-3.1-8B-Instruct-Turbo" => Model::Llama31_8BInstructTurbo,
            "Qwen/Qwen2.5-72B-Instruct-Turbo" => Model::Qwen25_72BInstructTurbo,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse();
        Ok(model)
    }
}
