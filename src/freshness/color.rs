//! Age to urgency color mapping.
//!
//! Fresh activity is green, turns yellow over the first two weeks, then
//! fades to orange-red by day 30 and stays there.

use std::fmt;

/// Days over which red rises from 0 to full while green stays full.
const RED_RAMP_DAYS: f64 = 15.0;

/// Age from which the color is fixed.
const SATURATION_DAYS: f64 = 30.0;

/// Green channel once the color is fixed.
const SATURATED_GREEN: f64 = 80.0;

/// Red and green channels of a cell background. Blue is always zero.
///
/// Channels hold the raw computed values. Use [`UrgencyColor::to_hex`] for
/// a clamped byte representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UrgencyColor {
    /// Red channel, nominally 0 to 255
    pub red: f64,
    /// Green channel, nominally 0 to 255
    pub green: f64,
}

impl UrgencyColor {
    /// `#rrgg00`, each channel truncated toward zero and saturated to a byte.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}00", channel_byte(self.red), channel_byte(self.green))
    }

    /// Inline style fragment: `background-color:#rrgg00;`
    #[must_use]
    pub fn css(&self) -> String {
        format!("background-color:{};", self.to_hex())
    }
}

impl fmt::Display for UrgencyColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// `as` saturates floats into the integer range and maps NaN to 0
fn channel_byte(value: f64) -> u8 {
    value as u8
}

/// Color for an activity age in days.
#[must_use]
pub fn color_from_age(days: f64) -> UrgencyColor {
    if days < RED_RAMP_DAYS {
        UrgencyColor {
            red: 255.0 * (1.0 - 1.20_f64.powf(-days)),
            green: 255.0,
        }
    } else if days < SATURATION_DAYS {
        UrgencyColor {
            red: 255.0,
            green: 255.0 * 1.08_f64.powf(RED_RAMP_DAYS - days),
        }
    } else {
        UrgencyColor {
            red: 255.0,
            green: SATURATED_GREEN,
        }
    }
}
