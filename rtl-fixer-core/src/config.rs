//! Fixer configuration: selectors, class names, ids and timings
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

use crate::mode::Mode;
use crate::selector::{SelectorError, SelectorList};

const DEFAULT_FIXER_DATA: &str = include_str!("../data/fixer.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("content selector list is empty")]
    NoContentSelectors,
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("alignment classes must differ (both are `{0}`)")]
    AlignmentClash(String),
    #[error("invalid selector for {field}: {source}")]
    Selector {
        field: &'static str,
        #[source]
        source: SelectorError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub fixed_text: String,
    pub align_right: String,
    pub align_justify: String,
    pub header_fix: String,
    pub button_active: String,
    pub button_justify_icon: String,
    pub button_animate: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            fixed_text: "rtl-fixed-text".to_string(),
            align_right: "rtl-align-right".to_string(),
            align_justify: "rtl-align-justify".to_string(),
            header_fix: "rtl-header-fix".to_string(),
            button_active: "rtl-toggle-active".to_string(),
            button_justify_icon: "rtl-toggle-justify".to_string(),
            button_animate: "rtl-toggle-pulse".to_string(),
        }
    }
}

impl ClassNames {
    /// Every class the scanner may leave on a content element.
    #[must_use]
    pub fn content_classes(&self) -> [&str; 3] {
        [
            self.fixed_text.as_str(),
            self.align_right.as_str(),
            self.align_justify.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub button: String,
    pub style: String,
    pub font_link: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            button: "rtl-fixer-toggle".to_string(),
            style: "rtl-fixer-style".to_string(),
            font_link: "rtl-fixer-font".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixerConfig {
    pub content_selectors: Vec<String>,
    pub toolbar_anchor_selector: String,
    pub header_fix_selector: String,
    pub classes: ClassNames,
    pub ids: ElementIds,
    pub initial_mode: Mode,
    pub initial_delay_ms: u32,
    pub animation_ms: u32,
    pub font_url: String,
    pub font_family: String,
    pub log_level: String,
}

impl Default for FixerConfig {
    fn default() -> Self {
        Self {
            content_selectors: [
                ".postArticle-content",
                "section.eh",
                "p",
                "h1",
                "h2",
                "h3",
                "h4",
                "header",
                "ol",
                "ul",
                "li",
                "blockquote",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            toolbar_anchor_selector: "[aria-label=\"responses\"]".to_string(),
            header_fix_selector: ".avatar, .followState".to_string(),
            classes: ClassNames::default(),
            ids: ElementIds::default(),
            initial_mode: Mode::RightAlign,
            initial_delay_ms: 1500,
            animation_ms: 600,
            font_url: String::new(),
            font_family: "sans-serif".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl FixerConfig {
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_FIXER_DATA).unwrap_or_default()
    }

    /// Process-wide copy of the bundled configuration.
    #[must_use]
    pub fn shared() -> &'static Self {
        static CONFIG: OnceLock<FixerConfig> = OnceLock::new();
        CONFIG.get_or_init(Self::load_from_static)
    }

    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result fails [`FixerConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Content selectors joined into one comma-separated selector list.
    #[must_use]
    pub fn content_selector(&self) -> String {
        self.content_selectors.join(", ")
    }

    /// Check the invariants the scanner and controller rely on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_selectors.iter().all(|s| s.trim().is_empty()) {
            return Err(ConfigError::NoContentSelectors);
        }
        let required = [
            ("toolbar_anchor_selector", &self.toolbar_anchor_selector),
            ("classes.fixed_text", &self.classes.fixed_text),
            ("classes.align_right", &self.classes.align_right),
            ("classes.align_justify", &self.classes.align_justify),
            ("classes.header_fix", &self.classes.header_fix),
            ("classes.button_animate", &self.classes.button_animate),
            ("ids.button", &self.ids.button),
            ("ids.style", &self.ids.style),
            ("ids.font_link", &self.ids.font_link),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField { field });
            }
        }
        if self.classes.align_right == self.classes.align_justify {
            return Err(ConfigError::AlignmentClash(
                self.classes.align_right.clone(),
            ));
        }

        let selectors = [
            ("content_selectors", self.content_selector()),
            (
                "toolbar_anchor_selector",
                self.toolbar_anchor_selector.clone(),
            ),
            ("header_fix_selector", self.header_fix_selector.clone()),
            ("classes.fixed_text", format!(".{}", self.classes.fixed_text)),
            ("classes.align_right", format!(".{}", self.classes.align_right)),
            ("classes.align_justify", format!(".{}", self.classes.align_justify)),
            ("classes.header_fix", format!(".{}", self.classes.header_fix)),
            ("ids.button", format!("#{}", self.ids.button)),
        ];
        for (field, selector) in selectors {
            if field == "header_fix_selector" && selector.trim().is_empty() {
                continue;
            }
            SelectorList::parse(&selector)
                .map_err(|source| ConfigError::Selector { field, source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_is_valid() {
        let config = FixerConfig::load_from_static();
        config.validate().unwrap();
        assert_eq!(config.initial_mode, Mode::RightAlign);
        assert!(config.content_selectors.iter().any(|s| s == "p"));
        assert_eq!(config.classes.fixed_text, "rtl-fixed-text");
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = FixerConfig::from_json(r#"{ "initial_mode": "justify" }"#).unwrap();
        assert_eq!(config.initial_mode, Mode::Justify);
        assert_eq!(config.classes, ClassNames::default());
        assert_eq!(config.ids, ElementIds::default());
    }

    #[test]
    fn rejects_empty_selectors() {
        let err = FixerConfig::from_json(r#"{ "content_selectors": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoContentSelectors));
    }

    #[test]
    fn rejects_clashing_alignment_classes() {
        let err = FixerConfig::from_json(
            r#"{ "classes": { "align_right": "same", "align_justify": "same" } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("same"));
    }

    #[test]
    fn rejects_unparseable_selector() {
        let err =
            FixerConfig::from_json(r#"{ "toolbar_anchor_selector": "!responses" }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Selector {
                field: "toolbar_anchor_selector",
                ..
            }
        ));
    }

    #[test]
    fn rejects_class_names_that_cannot_be_queried() {
        let err = FixerConfig::from_json(r#"{ "classes": { "fixed_text": "rtl!fixed" } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Selector {
                field: "classes.fixed_text",
                ..
            }
        ));
    }

    #[test]
    fn accepts_selectors_with_combinators() {
        let config = FixerConfig::from_json(
            r#"{ "content_selectors": [".postArticle-content p", "article > header"] }"#,
        )
        .unwrap();
        assert_eq!(
            config.content_selector(),
            ".postArticle-content p, article > header"
        );
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = FixerConfig::from_json("{ not json").unwrap_err();
        assert!(err.to_string().starts_with("JSON parsing error"));
    }

    #[test]
    fn content_selector_joins_list() {
        let config = FixerConfig {
            content_selectors: vec!["p".into(), "h1".into()],
            ..FixerConfig::default()
        };
        assert_eq!(config.content_selector(), "p, h1");
    }
}
