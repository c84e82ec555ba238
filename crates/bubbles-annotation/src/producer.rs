use crate::block::BlockState;
use bubbles_core::BlockId;
use serde::{Deserialize, Serialize};

/// Output of the code generator. Statement blocks produce a single string,
/// value blocks produce `[code, precedence, ...]`; only the first entry is code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedCode {
    Single(String),
    Many(Vec<String>),
}

impl GeneratedCode {
    pub fn into_primary(self) -> Option<String> {
        match self {
            GeneratedCode::Single(code) => Some(code),
            GeneratedCode::Many(parts) => parts.into_iter().next(),
        }
    }
}

impl From<String> for GeneratedCode {
    fn from(code: String) -> Self {
        GeneratedCode::Single(code)
    }
}

impl From<&str> for GeneratedCode {
    fn from(code: &str) -> Self {
        GeneratedCode::Single(code.to_string())
    }
}

impl From<Vec<String>> for GeneratedCode {
    fn from(parts: Vec<String>) -> Self {
        GeneratedCode::Many(parts)
    }
}

pub trait CodeProducer {
    fn block_to_code(&self, block: &BlockState) -> GeneratedCode;
}

/// Sink for code to evaluate, e.g. a connected REPL. Fire-and-forget.
pub trait ExecutionChannel {
    fn submit(&mut self, code: &str, block: BlockId);
}
