use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgba;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const DEFAULT_UNIT: &str = "%";
pub const DEFAULT_TEXT_SIZE_DP: f64 = 24.0;
/// Fraction digits of the default `###,###,###,##0.0` pattern.
pub const DEFAULT_DECIMALS: usize = 1;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Unit(String);

impl Unit {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT)
    }
}

/// Fixed-point formatting with `,` thousands separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFormat {
    decimals: usize,
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_DECIMALS,
        }
    }
}

impl ValueFormat {
    pub fn with_digits(decimals: usize) -> Self {
        Self { decimals }
    }

    pub fn decimals(&self) -> usize {
        self.decimals
    }

    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let fixed = format!("{:.*}", self.decimals, value.abs());
        let (int_part, fraction) = match fixed.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (fixed.as_str(), None),
        };

        // "-0.0" reads as noise, only keep the sign when something survives rounding
        let negative = value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');

        let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
        if negative {
            out.push('-');
        }
        out.push_str(&group_thousands(int_part));
        if let Some(f) = fraction {
            out.push('.');
            out.push_str(f);
        }
        out
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions {
    pub unit: Unit,
    pub format: ValueFormat,
    pub draw_inner_circle: bool,
    pub draw_text: bool,
    /// One label per step, replacing the numeric value when set.
    pub custom_text: Option<Vec<String>>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            unit: Unit::default(),
            format: ValueFormat::default(),
            draw_inner_circle: true,
            draw_text: true,
            custom_text: None,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaintRole {
    /// Value arc and the dimmed background ring.
    Arc,
    Inner,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub arc: Srgba<f64>,
    pub inner: Srgba<f64>,
    pub text: Srgba<f64>,
    pub text_size_dp: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            arc: Srgba::new(192.0 / 255.0, 1.0, 140.0 / 255.0, 1.0),
            inner: Srgba::new(1.0, 1.0, 1.0, 1.0),
            text: Srgba::new(0.0, 0.0, 0.0, 1.0),
            text_size_dp: DEFAULT_TEXT_SIZE_DP,
        }
    }
}

impl Style {
    pub fn color(&self, role: PaintRole) -> Srgba<f64> {
        match role {
            PaintRole::Arc => self.arc,
            PaintRole::Inner => self.inner,
            PaintRole::Text => self.text,
        }
    }

    pub fn set_color(&mut self, role: PaintRole, color: Srgba<f64>) {
        match role {
            PaintRole::Arc => self.arc = color,
            PaintRole::Inner => self.inner = color,
            PaintRole::Text => self.text = color,
        }
    }
}
