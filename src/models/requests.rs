use serde::{Deserialize, Serialize};

use crate::core::MAX_NAME_LENGTH;

/// Body of a draw request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawRequest {
    /// Name of the participant drawing; `nome` is accepted for older clients
    #[serde(default, alias = "nome")]
    pub name: String,
}

impl DrawRequest {
    /// Trim the name and reject oversized input
    ///
    /// A blank name is passed through so that the draw engine reports it
    /// with its own error kind.
    pub fn validate_name(name: &str) -> Result<String, String> {
        let cleaned = name.trim();

        if cleaned.chars().count() > MAX_NAME_LENGTH {
            return Err(format!(
                "Name must be {} characters or less",
                MAX_NAME_LENGTH
            ));
        }

        Ok(cleaned.to_string())
    }

    /// Create a new DrawRequest with validated name
    pub fn new(name: String) -> Result<Self, String> {
        let validated_name = Self::validate_name(&name)?;
        Ok(Self {
            name: validated_name,
        })
    }
}
