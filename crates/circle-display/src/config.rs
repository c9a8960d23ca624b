use crate::animation::{DEFAULT_DURATION, Easing};
use crate::model::{
    DEFAULT_DIM_ALPHA, DEFAULT_START_ANGLE, DEFAULT_STEP_SIZE, DEFAULT_VALUE_WIDTH_PERCENT,
};
use crate::options::{DEFAULT_TEXT_SIZE_DP, Style, Unit};
use directories::ProjectDirs;
use palette::Srgba;
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Expected #rrggbb or #rrggbbaa, got {0:?}")]
    Format(String),
    #[error("Invalid hex digits in {0:?}")]
    Digits(String),
}

/// Color written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr)]
pub struct HexColor(Srgba<f64>);

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(ColorParseError::Format(s.to_string()));
        }

        let channels = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ColorParseError::Digits(s.to_string()))?;

        let c = |i: usize| f64::from(channels[i]) / 255.0;
        let alpha = if channels.len() == 4 { c(3) } else { 1.0 };
        Ok(Self(Srgba::new(c(0), c(1), c(2), alpha)))
    }
}

impl From<Srgba<f64>> for HexColor {
    fn from(color: Srgba<f64>) -> Self {
        Self(color)
    }
}

impl From<HexColor> for Srgba<f64> {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub unit: Unit,
    pub start_angle: f64,
    pub step_size: f64,
    pub value_width_percent: f64,
    pub draw_inner_circle: bool,
    pub draw_text: bool,
    pub touch_enabled: bool,
    pub dim_alpha: u8,
    /// Unset keeps the one-decimal default format.
    pub format_digits: Option<usize>,
    pub custom_text: Option<Vec<String>>,
    pub animation_duration_ms: u64,
    pub easing: Easing,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            unit: Unit::default(),
            start_angle: DEFAULT_START_ANGLE,
            step_size: DEFAULT_STEP_SIZE,
            value_width_percent: DEFAULT_VALUE_WIDTH_PERCENT,
            draw_inner_circle: true,
            draw_text: true,
            touch_enabled: true,
            dim_alpha: DEFAULT_DIM_ALPHA,
            format_digits: None,
            custom_text: None,
            animation_duration_ms: DEFAULT_DURATION.as_millis() as u64,
            easing: Easing::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub arc: HexColor,
    pub inner: HexColor,
    pub text: HexColor,
    pub text_size_dp: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let style = Style::default();
        Self {
            arc: style.arc.into(),
            inner: style.inner.into(),
            text: style.text.into(),
            text_size_dp: DEFAULT_TEXT_SIZE_DP,
        }
    }
}

/// Value shown when the gauge starts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InitialConfig {
    pub value: f64,
    pub total: f64,
    pub animated: bool,
}

impl Default for InitialConfig {
    fn default() -> Self {
        Self {
            value: 75.0,
            total: 100.0,
            animated: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct GaugeConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub initial: InitialConfig,
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "circledisplay", "circle-display")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("CIRCLE_DISPLAY")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config() -> Result<GaugeConfig, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> Result<GaugeConfig, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> GaugeConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            GaugeConfig::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parsing() {
        let cases = vec![
            ("#ffffff", Srgba::new(1.0, 1.0, 1.0, 1.0)),
            ("000000", Srgba::new(0.0, 0.0, 0.0, 1.0)),
            ("#FF000080", Srgba::new(1.0, 0.0, 0.0, 128.0 / 255.0)),
        ];

        for (input, expected) in cases {
            let parsed: Srgba<f64> = input.parse::<HexColor>().unwrap().into();
            assert_eq!(parsed, expected, "{input}");
        }
    }

    #[test]
    fn test_hex_color_errors() {
        assert!(matches!(
            "#fff".parse::<HexColor>(),
            Err(ColorParseError::Format(_))
        ));
        assert!(matches!(
            "#gg0000".parse::<HexColor>(),
            Err(ColorParseError::Digits(_))
        ));
        assert!(matches!(
            "#ää0000".parse::<HexColor>(),
            Err(ColorParseError::Format(_))
        ));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        let d = &config.display;
        assert_eq!(d.unit.as_str(), "%");
        assert_eq!(d.start_angle, 270.0);
        assert_eq!(d.step_size, 1.0);
        assert_eq!(d.value_width_percent, 50.0);
        assert!(d.draw_inner_circle);
        assert!(d.draw_text);
        assert!(d.touch_enabled);
        assert_eq!(d.dim_alpha, 80);
        assert_eq!(d.format_digits, None);
        assert_eq!(d.custom_text, None);
        assert_eq!(d.animation_duration_ms, 3000);
        assert_eq!(d.easing, Easing::AccelerateDecelerate);
        assert_eq!(config.style.text_size_dp, 24.0);
        let inner: Srgba<f64> = config.style.inner.into();
        assert_eq!(inner, Srgba::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_partial_config() {
        let config = parse_config(
            r##"
            [display]
            unit = "km/h"
            step_size = 0.5
            custom_text = ["low", "high"]
            easing = "linear"

            [style]
            arc = "#3366ff"
            "##,
        )
        .unwrap();

        assert_eq!(config.display.unit.as_str(), "km/h");
        assert_eq!(config.display.step_size, 0.5);
        assert_eq!(
            config.display.custom_text,
            Some(vec!["low".to_string(), "high".to_string()])
        );
        assert_eq!(config.display.easing, Easing::Linear);
        assert_eq!(config.display.dim_alpha, 80);
        let arc: Srgba<f64> = config.style.arc.into();
        assert_eq!(arc, Srgba::new(51.0 / 255.0, 102.0 / 255.0, 1.0, 1.0));
    }

    #[test]
    fn test_invalid_color_is_an_error() {
        assert!(parse_config("[style]\narc = \"blue\"").is_err());
    }

    #[test]
    fn test_default_config_file_parses() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.display.animation_duration_ms, 4000);
        assert_eq!(config.display.value_width_percent, 55.0);
        assert_eq!(config.display.format_digits, Some(1));
        assert_eq!(config.display.step_size, 0.5);
        assert_eq!(config.initial.value, 75.0);
        assert_eq!(config.initial.total, 100.0);
        assert!(config.initial.animated);
    }
}
