use crate::error::AnnotationError;
use crate::shell::TextDirection;
use bubbles_core::BubbleSize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationSettings {
    /// Size of a newly created annotation panel.
    pub default_size: BubbleSize,
    pub border_width: f32,
    /// Height reserved above the text area for the button row.
    pub button_row_height: f32,
    /// Line written into a watch log when logging is turned off.
    pub separator: String,
    pub right_to_left: bool,
}

impl Default for AnnotationSettings {
    fn default() -> Self {
        Self {
            default_size: BubbleSize::default(),
            border_width: 6.0,
            button_row_height: 24.0,
            separator: "------".to_string(),
            right_to_left: false,
        }
    }
}

impl AnnotationSettings {
    pub fn text_direction(&self) -> TextDirection {
        if self.right_to_left {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bubbles").join("settings.json"))
    }

    /// Load from the user config dir, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        tracing::info!("Loading settings from {:?}", path);
        if !path.exists() {
            tracing::info!("Settings file not found, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::info!("Settings loaded successfully: {:?}", settings);
                settings
            }
            Err(e) => {
                tracing::error!("Failed to load settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, AnnotationError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnnotationError::Settings(format!("read {}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| AnnotationError::Settings(format!("parse {}: {e}", path.display())))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AnnotationError> {
        if let Some(dir) = path.parent()
            && !dir.exists()
        {
            std::fs::create_dir_all(dir)
                .map_err(|e| AnnotationError::Settings(format!("create {}: {e}", dir.display())))?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AnnotationError::Settings(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| AnnotationError::Settings(format!("write {}: {e}", path.display())))
    }
}
