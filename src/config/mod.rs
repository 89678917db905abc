//! Configuration file support for graffiti.
//!
//! This module handles loading and validating engine settings from the
//! configuration file located at `~/.config/graffiti/config.toml`. Settings
//! include drawing defaults, arrowhead geometry, text layout, the initial
//! canvas size and export defaults.
//!
//! If no config file exists, the defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{ArrowConfig, CanvasConfig, DrawingConfig, ExportConfig, TextConfig};

use crate::background::Viewport;
use crate::draw::{ArrowStyle, BLACK, FontDescriptor, RenderStyle, StrokeStyle, TextStyle, WHITE};
use crate::export::{self, ExportFormat, ExportSaveConfig};
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all engine settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#fff"
/// default_size = 2.0
/// default_font_size = 20.0
///
/// [arrow]
/// head_length = 10.0
/// head_angle_degrees = 30.0
///
/// [text]
/// handle_size = 24.0
///
/// [export]
/// mime = "image/jpeg"
/// quality = 0.8
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Initial tool settings, canvas fill and font
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Arrowhead geometry
    #[serde(default)]
    pub arrow: ArrowConfig,

    /// Text label layout and handles
    #[serde(default)]
    pub text: TextConfig,

    /// Initial canvas size
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Export defaults
    #[serde(default)]
    pub export: ExportConfig,
}

fn clamp_setting(name: &str, value: &mut f64, min: f64, max: f64) {
    if !(min..=max).contains(value) {
        log::warn!(
            "Invalid {} {:.2}, clamping to {:.1}-{:.1} range",
            name,
            value,
            min,
            max
        );
        *value = if value.is_nan() { min } else { value.clamp(min, max) };
    }
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by
    /// the default for strings and colors) and a warning is logged.
    pub fn validate_and_clamp(&mut self) {
        clamp_setting("default_size", &mut self.drawing.default_size, 1.0, 50.0);
        clamp_setting(
            "default_font_size",
            &mut self.drawing.default_font_size,
            8.0,
            200.0,
        );
        clamp_setting("arrow head_length", &mut self.arrow.head_length, 5.0, 50.0);
        if let Some(size) = self.arrow.size.as_mut() {
            clamp_setting("arrow size", size, 1.0, 50.0);
        }
        clamp_setting(
            "arrow head_angle_degrees",
            &mut self.arrow.head_angle_degrees,
            15.0,
            60.0,
        );
        clamp_setting("text line_spacing", &mut self.text.line_spacing, 0.0, 20.0);
        clamp_setting("text padding_ratio", &mut self.text.padding_ratio, 0.0, 2.0);
        clamp_setting("text handle_size", &mut self.text.handle_size, 8.0, 64.0);
        clamp_setting("text body_margin", &mut self.text.body_margin, 0.0, 40.0);
        clamp_setting("text min_dimension", &mut self.text.min_dimension, 1.0, 100.0);
        clamp_setting(
            "canvas viewport_width",
            &mut self.canvas.viewport_width,
            1.0,
            16384.0,
        );
        clamp_setting(
            "canvas viewport_height",
            &mut self.canvas.viewport_height,
            1.0,
            16384.0,
        );
        clamp_setting("export quality", &mut self.export.quality, 0.0, 1.0);

        // Validate font weight is reasonable
        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'bold'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "bold".to_string();
        }

        // Validate font style
        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = "normal".to_string();
        }

        if self.drawing.font_family.trim().is_empty() {
            log::warn!("Empty font_family, falling back to 'Sans'");
            self.drawing.font_family = "Sans".to_string();
        }

        if !export::is_valid_filename_template(&self.export.filename_template) {
            log::warn!(
                "Invalid export filename_template '{}', falling back to default",
                self.export.filename_template
            );
            self.export.filename_template = ExportConfig::default().filename_template;
        }

        for (name, spec, fallback) in [
            ("default_color", &mut self.drawing.default_color, "#fff"),
            ("background_color", &mut self.drawing.background_color, "black"),
            ("selection_color", &mut self.text.selection_color, "white"),
        ] {
            if !spec.is_valid() {
                log::warn!("Invalid {} {:?}, falling back to '{}'", name, spec, fallback);
                *spec = ColorSpec::from(fallback);
            }
        }

        if self.arrow.color.as_ref().is_some_and(|spec| !spec.is_valid()) {
            log::warn!(
                "Invalid arrow color {:?}, falling back to default_color",
                self.arrow.color
            );
            self.arrow.color = None;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/graffiti/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("graffiti");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined, or the
    /// file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses TOML text and validates the result.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(text).context("Invalid config TOML")?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Writes the configuration as TOML to `config_path`, creating parent directories.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema of the configuration file, for external editors.
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).context("Failed to serialize config schema")
    }

    pub fn font(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.drawing.font_family.clone(),
            self.drawing.font_weight.clone(),
            self.drawing.font_style.clone(),
        )
    }

    /// Rendering and layout parameters derived from the config.
    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            background_color: self.drawing.background_color.to_color_or(BLACK),
            arrow: ArrowStyle {
                head_length: self.arrow.head_length,
                head_angle: self.arrow.head_angle_degrees,
            },
            text: TextStyle {
                font: self.font(),
                line_spacing: self.text.line_spacing,
                padding_ratio: self.text.padding_ratio,
                handle_size: self.text.handle_size,
                body_margin: self.text.body_margin,
                min_dimension: self.text.min_dimension,
            },
            selection_color: self.text.selection_color.to_color_or(WHITE),
            show_selection: true,
        }
    }

    /// Initial color and width for curves.
    pub fn curve_stroke(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.drawing.default_color.to_color_or(WHITE),
            size: self.drawing.default_size,
        }
    }

    /// Initial color and width for arrows, falling back to the curve settings.
    pub fn arrow_stroke(&self) -> StrokeStyle {
        let curve = self.curve_stroke();
        StrokeStyle {
            color: self
                .arrow
                .color
                .as_ref()
                .map_or(curve.color, |spec| spec.to_color_or(curve.color)),
            size: self.arrow.size.unwrap_or(curve.size),
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.canvas.viewport_width, self.canvas.viewport_height)
    }

    pub fn export_format(&self) -> ExportFormat {
        ExportFormat::from_mime(&self.export.mime, Some(self.export.quality))
    }

    pub fn export_save_config(&self) -> ExportSaveConfig {
        ExportSaveConfig {
            save_directory: export::expand_tilde(&self.export.save_directory),
            filename_template: self.export.filename_template.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RED;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());

        let style = config.render_style();
        assert_eq!(style, RenderStyle::default());
        assert_eq!(config.viewport(), Viewport::new(800.0, 600.0));
        assert_eq!(config.export_format(), ExportFormat::Png);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::from_toml_str(
            r#"
            [drawing]
            default_size = 500.0
            font_weight = "chunky"

            [arrow]
            head_angle_degrees = 5.0

            [export]
            quality = 3.0
            "#,
        )
        .unwrap();

        assert_eq!(config.drawing.default_size, 50.0);
        assert_eq!(config.drawing.font_weight, "bold");
        assert_eq!(config.arrow.head_angle_degrees, 15.0);
        assert_eq!(config.export.quality, 1.0);
    }

    #[test]
    fn invalid_colors_fall_back() {
        let config = Config::from_toml_str(
            r#"
            [drawing]
            default_color = "not-a-color"
            background_color = [255, 0, 0]
            "#,
        )
        .unwrap();

        assert_eq!(config.drawing.default_color, ColorSpec::from("#fff"));
        assert_eq!(config.render_style().background_color, RED);
    }

    #[test]
    fn bad_filename_template_falls_back() {
        let config = Config::from_toml_str(
            r#"
            [export]
            filename_template = "shot_%Q"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.export.filename_template,
            ExportConfig::default().filename_template
        );
    }

    #[test]
    fn arrow_style_falls_back_to_drawing_defaults() {
        let config = Config::from_toml_str(
            r#"
            [drawing]
            default_color = "red"
            default_size = 4.0

            [arrow]
            color = "nope"
            "#,
        )
        .unwrap();

        assert_eq!(config.arrow.color, None);
        assert_eq!(config.arrow_stroke(), config.curve_stroke());
        assert_eq!(config.arrow_stroke().color, RED);
        assert_eq!(config.arrow_stroke().size, 4.0);
    }

    #[test]
    fn jpeg_export_uses_configured_quality() {
        let config = Config::from_toml_str(
            r#"
            [export]
            mime = "image/jpeg"
            quality = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.export_format(), ExportFormat::Jpeg { quality: 0.5 });
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::from_toml_str("[drawing\nsize = ").is_err());
    }

    #[test]
    fn save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graffiti").join("config.toml");

        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let mut config = Config::default();
        config.text.handle_size = 32.0;
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().text.handle_size, 32.0);
    }

    #[test]
    fn schema_lists_sections() {
        let schema = Config::json_schema().unwrap();
        for section in ["drawing", "arrow", "text", "canvas", "export"] {
            assert!(schema.contains(section), "missing {section}");
        }
    }
}
