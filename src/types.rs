use serde::{Deserialize, Serialize};

/// Colour the eraser paints with; matches the white drawing sheet.
pub const ERASER_COLOR: &str = "#ffffff";
pub const GLOW_BLUR: f64 = 10.0;
pub const NO_SHADOW: &str = "transparent";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// What the surface paints with. Only affects colour, never geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
}

/// Configuration a parent screen hands to the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawConfig {
    pub color: String,
    pub line_width: f64,
    pub tool: Tool,
    pub magic_mode: bool,
}

impl DrawConfig {
    pub fn new(color: impl Into<String>, line_width: f64, tool: Tool, magic_mode: bool) -> Self {
        Self {
            color: color.into(),
            line_width,
            tool,
            magic_mode,
        }
    }

    /// Resolve the context style this configuration should produce.
    pub fn resolve(&self) -> ResolvedStyle {
        let erasing = self.tool == Tool::Eraser;
        let stroke_color = if erasing {
            ERASER_COLOR.to_string()
        } else {
            self.color.clone()
        };

        let (shadow_blur, shadow_color) = if self.magic_mode && !erasing {
            (GLOW_BLUR, self.color.clone())
        } else {
            (0.0, NO_SHADOW.to_string())
        };

        ResolvedStyle {
            stroke_color,
            line_width: self.line_width,
            shadow_blur,
            shadow_color,
        }
    }
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self::new("#000000", 5.0, Tool::Brush, false)
    }
}

/// Concrete 2D-context state derived from a [`DrawConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub stroke_color: String,
    pub line_width: f64,
    pub shadow_blur: f64,
    pub shadow_color: String,
}

impl ResolvedStyle {
    pub fn has_glow(&self) -> bool {
        self.shadow_blur > 0.0
    }
}

/// Toolbar entries of the studio. Everything except the eraser draws as a brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Pencil,
    Marker,
    Highlighter,
    Eraser,
}

impl ToolKind {
    pub fn surface_tool(&self) -> Tool {
        match self {
            ToolKind::Eraser => Tool::Eraser,
            _ => Tool::Brush,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToolKind::Pencil => "✏️",
            ToolKind::Marker => "🖊️",
            ToolKind::Highlighter => "🖍️",
            ToolKind::Eraser => "🧽",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolPreset {
    pub kind: ToolKind,
    pub label: String,
    pub width: f64,
    #[serde(default = "full_opacity")]
    pub opacity: f64,
}

fn full_opacity() -> f64 {
    1.0
}

impl ToolPreset {
    pub fn new(kind: ToolKind, label: &str, width: f64, opacity: f64) -> Self {
        Self {
            kind,
            label: label.to_string(),
            width,
            opacity,
        }
    }
}
