//! Translation of light-control intents into zone commands.
//!
//! A [`LightChange`] is an ordered list of adjustments on independent axes
//! (color, saturation, intensity, special modes, disco). Each adjustment maps
//! to at most one [`Command`]. Values the bridge cannot express in a given
//! axis (unknown special tokens, disco modes outside 1..=9) are dropped
//! without an error, so a partially valid change still sends its valid parts.

use crate::command::{Command, SpecialMode};

/// Calibration offset added to every hue before encoding.
pub const DEFAULT_HUE_SHIFT: i32 = 10;

/// Color values above this select warm white instead of a hue.
pub const WARM_WHITE_BASE: i32 = 255;

const MAX_PERCENT: i32 = 100;
const DISCO_MODES: std::ops::RangeInclusive<i32> = 1..=9;

/// One control axis with its requested value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Adjustment {
    /// 0..=255 hue (0 red, 85 green, 170 blue), 256..=356 warm white 0..=100 %.
    Color(i32),
    /// 0 = no white mixed in, 100 = full white.
    Saturation(i32),
    /// Brightness in percent.
    Intensity(i32),
    /// `on`, `off`, `night`, `speedup` or `speeddown`.
    Special(String),
    /// Disco program 1..=9.
    Disco(i32),
}

impl Adjustment {
    /// Build an adjustment from an axis name and a textual value.
    ///
    /// Unknown axes and non-numeric values for numeric axes yield `None`.
    pub fn from_pair(axis: &str, value: &str) -> Option<Self> {
        let number = || value.trim().parse::<i32>().ok();
        match axis {
            "color" => number().map(Self::Color),
            "saturation" => number().map(Self::Saturation),
            "intensity" => number().map(Self::Intensity),
            "special" => Some(Self::Special(value.trim().to_owned())),
            "disco" => number().map(Self::Disco),
            _ => None,
        }
    }

    /// Map to a command, or `None` if the value is not representable.
    pub fn to_command(&self, hue_shift: i32) -> Option<Command> {
        match self {
            Self::Color(value) if *value <= WARM_WHITE_BASE => {
                Some(Command::Hue(shift_hue(*value, hue_shift)))
            }
            Self::Color(value) => {
                let warmth = (*value - WARM_WHITE_BASE).min(MAX_PERCENT);
                Some(Command::WarmWhite(warmth as u8))
            }
            // Passed through unclamped, only the low byte reaches the wire.
            Self::Saturation(value) => Some(Command::Saturation(*value as u8)),
            Self::Intensity(value) => {
                Some(Command::Brightness((*value).clamp(0, MAX_PERCENT) as u8))
            }
            Self::Special(token) => SpecialMode::from_token(token).map(Command::Special),
            Self::Disco(mode) if DISCO_MODES.contains(mode) => Some(Command::Disco(*mode as u8)),
            Self::Disco(_) => None,
        }
    }
}

/// Apply the hue calibration offset, wrapping into 0..=255.
pub fn shift_hue(hue: i32, shift: i32) -> u8 {
    (i64::from(hue) + i64::from(shift)).rem_euclid(256) as u8
}

/// An ordered set of adjustments for one zone.
///
/// ```
/// use milight_rs_protocol::LightChange;
///
/// let change = LightChange::new().color(265).intensity(70);
/// assert_eq!(change.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LightChange {
    adjustments: Vec<Adjustment>,
}

impl LightChange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, value: i32) -> Self {
        self.adjustments.push(Adjustment::Color(value));
        self
    }

    pub fn saturation(mut self, value: i32) -> Self {
        self.adjustments.push(Adjustment::Saturation(value));
        self
    }

    pub fn intensity(mut self, value: i32) -> Self {
        self.adjustments.push(Adjustment::Intensity(value));
        self
    }

    pub fn special(mut self, token: &str) -> Self {
        self.adjustments.push(Adjustment::Special(token.to_owned()));
        self
    }

    pub fn disco(mut self, mode: i32) -> Self {
        self.adjustments.push(Adjustment::Disco(mode));
        self
    }

    pub fn push(&mut self, adjustment: Adjustment) {
        self.adjustments.push(adjustment);
    }

    /// Build a change from `(axis, value)` pairs, dropping pairs that
    /// [`Adjustment::from_pair`] does not recognize.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        pairs
            .into_iter()
            .filter_map(|(axis, value)| Adjustment::from_pair(axis, value))
            .collect()
    }

    pub fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }

    pub fn len(&self) -> usize {
        self.adjustments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjustments.is_empty()
    }
}

impl FromIterator<Adjustment> for LightChange {
    fn from_iter<I: IntoIterator<Item = Adjustment>>(iter: I) -> Self {
        Self {
            adjustments: iter.into_iter().collect(),
        }
    }
}

impl Extend<Adjustment> for LightChange {
    fn extend<I: IntoIterator<Item = Adjustment>>(&mut self, iter: I) {
        self.adjustments.extend(iter);
    }
}

/// Translate a change into commands, preserving the caller's order.
pub fn translate(change: &LightChange, hue_shift: i32) -> Vec<Command> {
    change
        .adjustments
        .iter()
        .filter_map(|adjustment| adjustment.to_command(hue_shift))
        .collect()
}
