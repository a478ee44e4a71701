use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::{ToolKind, ToolPreset};

/// Id of the optional `<script type="application/json">` element that can
/// override the studio defaults.
pub const CONFIG_ELEMENT_ID: &str = "studio-config";

/// Tunables for the free-drawing studio. Every field has a default, so an
/// override only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub title: String,
    pub palette: Vec<String>,
    pub tools: Vec<ToolPreset>,
    pub initial_color: String,
    pub initial_width: f64,
    pub width_step: f64,
    pub min_width: f64,
    pub max_width: f64,
    pub curator: CuratorConfig,
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CuratorConfig {
    pub enabled: bool,
    pub greeting: String,
    pub avatar_message: String,
    pub praise_probability: f64,
    pub praise: Vec<String>,
    pub color_feedback: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub guide_text: String,
}

impl StudioConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: StudioConfig = serde_json::from_str(json)?;
        config.normalize();
        Ok(config)
    }

    /// Read the override embedded in the page, if any. A malformed override
    /// is logged and ignored.
    pub fn load() -> Self {
        let embedded = gloo_utils::document()
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content());

        match embedded {
            Some(json) if !json.trim().is_empty() => Self::from_json(&json).unwrap_or_else(|e| {
                log::warn!("ignoring invalid studio config: {}", e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn tool(&self, kind: ToolKind) -> Option<&ToolPreset> {
        self.tools.iter().find(|preset| preset.kind == kind)
    }

    pub fn clamp_width(&self, width: f64) -> f64 {
        width.clamp(self.min_width, self.max_width)
    }

    fn normalize(&mut self) {
        if self.min_width <= 0.0 {
            self.min_width = 1.0;
        }
        if self.max_width < self.min_width {
            self.max_width = self.min_width;
        }
        self.initial_width = self.clamp_width(self.initial_width);
        self.curator.praise_probability = self.curator.praise_probability.clamp(0.0, 1.0);
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "자유 드로잉".to_string(),
            palette: [
                "#000000", "#FF5252", "#E91E63", "#9C27B0", "#3F51B5", "#2196F3", "#00BCD4",
                "#009688", "#4CAF50", "#8BC34A", "#CDDC39", "#FFEB3B", "#FFC107", "#FF9800",
                "#FF5722", "#795548", "#9E9E9E", "#607D8B", "#FFFFFF",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            tools: vec![
                ToolPreset::new(ToolKind::Pencil, "연필", 3.0, 1.0),
                ToolPreset::new(ToolKind::Marker, "마커", 8.0, 1.0),
                ToolPreset::new(ToolKind::Highlighter, "형광펜", 20.0, 0.5),
                ToolPreset::new(ToolKind::Eraser, "지우개", 20.0, 1.0),
            ],
            initial_color: "#000000".to_string(),
            initial_width: 5.0,
            width_step: 3.0,
            min_width: 1.0,
            max_width: 40.0,
            curator: CuratorConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}

impl Default for CuratorConfig {
    fn default() -> Self {
        let feedback: [(&str, &[&str]); 7] = [
            (
                "#FF5252",
                &[
                    "와, 열정적인 빨간색이네요! 힘이 솟는 것 같아요 🌹",
                    "잘 익은 사과처럼 탐스러운 색깔이에요!",
                    "화면이 환해지는 느낌이에요.",
                ],
            ),
            (
                "#FFEB3B",
                &[
                    "개나리처럼 화사한 노란색이 참 고와요 🌼",
                    "따뜻한 햇살 같은 색깔이네요.",
                    "기분이 좋아지는 밝은 색이에요!",
                ],
            ),
            (
                "#4CAF50",
                &[
                    "싱그러운 풀내음이 나는 것 같아요 🌿",
                    "눈이 편안해지는 초록색이네요.",
                    "숲속에 온 것처럼 상쾌해요.",
                ],
            ),
            (
                "#2196F3",
                &[
                    "시원한 파란색을 보니 마음이 뻥 뚫리네요 🌊",
                    "가을 하늘처럼 맑은 색깔이에요.",
                    "차분하고 깊이 있는 색이네요.",
                ],
            ),
            (
                "#000000",
                &[
                    "또렷하고 힘찬 검은색이네요 ✍️",
                    "선이 분명해서 그림이 살아나요.",
                    "기본에 충실한 멋진 선택이에요.",
                ],
            ),
            (
                "#9C27B0",
                &["우아하고 고상한 보라색이네요 🍇", "신비로운 느낌이 드는 색깔이에요."],
            ),
            (
                "#FF9800",
                &["잘 익은 감처럼 먹음직스러운 색이네요 🍊", "따뜻하고 정겨운 주황색이에요."],
            ),
        ];

        Self {
            enabled: true,
            greeting: "어르신, 오늘은 어떤 멋진 그림을 그려주실 건가요? 😊".to_string(),
            avatar_message: "저를 누르셨군요! 제가 그림 그리기를 도와드릴게요 ❤️".to_string(),
            praise_probability: 0.3,
            praise: [
                "선이 참 시원시원하시네요! 👏",
                "망설임 없이 그리시는 모습이 멋져요.",
                "어쩜 이렇게 손끝이 섬세하세요?",
                "그림에서 에너지가 느껴져요! ✨",
                "정말 독창적인 작품이 나올 것 같아요.",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            color_feedback: feedback
                .iter()
                .map(|(color, lines)| {
                    (
                        color.to_string(),
                        lines.iter().map(|s| s.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            lang: "ko-KR".to_string(),
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
            guide_text: "자유 드로잉 화면입니다. 왼쪽에서 도구를, 오른쪽에서 색깔과 굵기를 고르고 가운데에 그림을 그려보세요."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_and_tools() {
        let config = StudioConfig::default();
        assert_eq!(config.palette.len(), 19);
        assert_eq!(config.palette.first().map(String::as_str), Some("#000000"));
        assert_eq!(config.tool(ToolKind::Marker).map(|t| t.width), Some(8.0));
        assert_eq!(config.tool(ToolKind::Highlighter).map(|t| t.opacity), Some(0.5));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = StudioConfig::from_json(r#"{ "max_width": 24, "title": "노을 그리기" }"#).unwrap();
        assert_eq!(config.max_width, 24.0);
        assert_eq!(config.title, "노을 그리기");
        assert_eq!(config.width_step, 3.0);
        assert_eq!(config.palette.len(), 19);
        assert!(config.curator.enabled);
    }

    #[test]
    fn test_nested_override() {
        let json = r#"{
            "curator": { "praise_probability": 1.5, "praise": ["좋아요"] },
            "tools": [{ "kind": "pencil", "label": "붓", "width": 6 }]
        }"#;
        let config = StudioConfig::from_json(json).unwrap();
        assert_eq!(config.curator.praise_probability, 1.0);
        assert_eq!(config.curator.praise, vec!["좋아요".to_string()]);
        assert!(!config.curator.color_feedback.is_empty());
        assert_eq!(config.tools.len(), 1);
        assert_eq!(config.tools[0].opacity, 1.0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(StudioConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_widths_are_normalized() {
        let config =
            StudioConfig::from_json(r#"{ "min_width": 0, "max_width": -3, "initial_width": 9 }"#)
                .unwrap();
        assert_eq!(config.min_width, 1.0);
        assert_eq!(config.max_width, 1.0);
        assert_eq!(config.initial_width, 1.0);
    }

    #[test]
    fn test_clamp_width() {
        let config = StudioConfig::default();
        assert_eq!(config.clamp_width(0.0), 1.0);
        assert_eq!(config.clamp_width(43.0), 40.0);
        assert_eq!(config.clamp_width(11.0), 11.0);
    }
}
