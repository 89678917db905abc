//! Drawing tool selection.

/// Drawing tool selection.
///
/// The active tool decides what a pan that starts away from any text label
/// creates. Text labels can be dragged, resized and tapped with any tool, or
/// with none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Freehand curve following the pointer
    Curve,
    /// Straight arrow from the pan start to the pointer
    Arrow,
    /// Text labels only; pans on empty canvas do nothing
    Text,
}

impl Tool {
    /// Parses a tool name ("curve", "arrow", "text"), case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "curve" => Some(Tool::Curve),
            "arrow" => Some(Tool::Arrow),
            "text" => Some(Tool::Text),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Curve => "curve",
            Tool::Arrow => "arrow",
            Tool::Text => "text",
        }
    }
}
