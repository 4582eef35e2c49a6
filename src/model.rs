use std::fmt;

use serde::{Deserialize, Serialize};

/// Chat models offered on the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatModel {
    #[default]
    #[serde(rename = "llama-3.1-8b-instant")]
    Llama31_8bInstant,
    #[serde(rename = "llama-3.3-70b-versatile")]
    Llama33_70bVersatile,
}

impl ChatModel {
    pub const ALL: [ChatModel; 2] = [ChatModel::Llama31_8bInstant, ChatModel::Llama33_70bVersatile];

    /// Model id sent to the completion API.
    pub fn id(self) -> &'static str {
        match self {
            ChatModel::Llama31_8bInstant => "llama-3.1-8b-instant",
            ChatModel::Llama33_70bVersatile => "llama-3.3-70b-versatile",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            ChatModel::Llama31_8bInstant => "Fast and small",
            ChatModel::Llama33_70bVersatile => "Larger and slower, better for long articles",
        }
    }
}

impl fmt::Display for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_the_model_id() {
        let json = serde_json::to_string(&ChatModel::Llama33_70bVersatile).unwrap();
        assert_eq!(json, "\"llama-3.3-70b-versatile\"");

        let model: ChatModel = serde_json::from_str("\"llama-3.1-8b-instant\"").unwrap();
        assert_eq!(model, ChatModel::Llama31_8bInstant);
    }

    #[test]
    fn unknown_ids_do_not_deserialize() {
        assert!(serde_json::from_str::<ChatModel>("\"gpt-4\"").is_err());
    }

    #[test]
    fn fast_model_is_the_default() {
        assert_eq!(ChatModel::default(), ChatModel::ALL[0]);
    }
}
