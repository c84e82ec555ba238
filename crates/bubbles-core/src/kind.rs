use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed set of annotation flavours a block can carry, one of each at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnnotationKind {
    Comment,
    Watch,
    DoIt,
    Yail,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KindConversionError {
    #[error("Invalid annotation tag: {0:?}")]
    InvalidTag(char),
    #[error("Invalid annotation tag string: {0:?}")]
    InvalidTagString(String),
}

impl AnnotationKind {
    pub const ALL: [AnnotationKind; 4] = [
        AnnotationKind::Comment,
        AnnotationKind::Watch,
        AnnotationKind::DoIt,
        AnnotationKind::Yail,
    ];

    /// Single character drawn inside the collapsed icon.
    pub const fn tag(self) -> char {
        match self {
            AnnotationKind::Comment => '?',
            AnnotationKind::Watch => 'W',
            AnnotationKind::DoIt => 'D',
            AnnotationKind::Yail => 'Y',
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            AnnotationKind::Comment => "Comment",
            AnnotationKind::Watch => "Watch",
            AnnotationKind::DoIt => "Do It",
            AnnotationKind::Yail => "Yail",
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl TryFrom<char> for AnnotationKind {
    type Error = KindConversionError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '?' => Ok(AnnotationKind::Comment),
            'W' => Ok(AnnotationKind::Watch),
            'D' => Ok(AnnotationKind::DoIt),
            'Y' => Ok(AnnotationKind::Yail),
            _ => Err(KindConversionError::InvalidTag(value)),
        }
    }
}

impl FromStr for AnnotationKind {
    type Err = KindConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(tag), None) => AnnotationKind::try_from(tag),
            _ => Err(KindConversionError::InvalidTagString(s.to_string())),
        }
    }
}
