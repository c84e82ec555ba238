use crate::AnnotationKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Button commands an annotation panel can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Remove,
    Hide,
    Clear,
    /// Watch only: stop or resume logging.
    ToggleLogging,
    /// Watch only: flip between newest-first and oldest-first.
    ReverseOrder,
    /// Do It only: evaluate the block again.
    Reevaluate,
    /// Yail only: regenerate the displayed code.
    Regenerate,
}

impl Command {
    /// Telemetry name of the command.
    pub const fn name(self) -> &'static str {
        match self {
            Command::Remove => "Remove",
            Command::Hide => "Hide",
            Command::Clear => "Clear",
            Command::ToggleLogging => "ToggleLogging",
            Command::ReverseOrder => "ReverseOrder",
            Command::Reevaluate => "Reevaluate",
            Command::Regenerate => "Regenerate",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn remove_label(kind: AnnotationKind) -> &'static str {
    match kind {
        AnnotationKind::Comment => "Remove Comment",
        AnnotationKind::Watch => "Remove Watch",
        AnnotationKind::DoIt => "Remove Do It",
        AnnotationKind::Yail => "Remove Yail",
    }
}

pub fn logging_label(logging_enabled: bool) -> &'static str {
    if logging_enabled {
        "Turn Watch Off"
    } else {
        "Turn Watch On"
    }
}

// "Bottom"/"Top" names where the next click moves new entries to.
pub fn order_label(newest_first: bool) -> &'static str {
    if newest_first {
        "Print From Bottom"
    } else {
        "Print From Top"
    }
}
