//! Marker color classes and their RGB threshold predicates.

use serde::{Deserialize, Serialize};

/// The three marker dots, front to rear.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    /// Front marker.
    Red,
    /// Center marker.
    Pink,
    /// Rear marker.
    Green,
}

impl MarkerColor {
    /// Detection order.
    pub const ALL: [MarkerColor; 3] = [MarkerColor::Red, MarkerColor::Pink, MarkerColor::Green];

    /// Does this pixel belong to this marker color?
    #[inline]
    pub fn matches(self, rgb: [u8; 3], thresholds: &ColorThresholds) -> bool {
        match self {
            MarkerColor::Red => red_matches(rgb, thresholds),
            MarkerColor::Pink => pink_matches(rgb, thresholds),
            MarkerColor::Green => green_matches(rgb, thresholds),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MarkerColor::Red => "red",
            MarkerColor::Pink => "pink",
            MarkerColor::Green => "green",
        }
    }
}

/// Tuned classification thresholds over 8-bit RGB.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorThresholds {
    /// The dominant channel must be strictly above this value.
    pub brightness_floor: u8,
    /// Both other channels must stay below `dominant * dominance_ratio`.
    pub dominance_ratio: f32,
    /// Pink needs blue strictly above this.
    pub pink_blue_floor: u8,
    /// Also require red pixels to have blue at or below `pink_blue_floor`,
    /// making red and pink disjoint. Off by default: every pink pixel then
    /// also counts as red.
    pub exclusive_red: bool,
}

impl Default for ColorThresholds {
    fn default() -> Self {
        Self {
            brightness_floor: 110,
            dominance_ratio: 0.5,
            pink_blue_floor: 80,
            exclusive_red: false,
        }
    }
}

/// `dominant` is the max channel, bright enough, and both `others` stay
/// under the dominance ratio.
#[inline]
fn dominates(dominant: u8, others: [u8; 2], t: &ColorThresholds) -> bool {
    if dominant <= t.brightness_floor {
        return false;
    }
    let limit = dominant as f32 * t.dominance_ratio;
    others.iter().all(|&c| c <= dominant && (c as f32) < limit)
}

#[inline]
fn red_dominant([r, g, b]: [u8; 3], t: &ColorThresholds) -> bool {
    dominates(r, [g, b], t)
}

#[inline]
fn red_matches(rgb: [u8; 3], t: &ColorThresholds) -> bool {
    red_dominant(rgb, t) && (!t.exclusive_red || rgb[2] <= t.pink_blue_floor)
}

#[inline]
fn pink_matches(rgb: [u8; 3], t: &ColorThresholds) -> bool {
    red_dominant(rgb, t) && rgb[2] > t.pink_blue_floor
}

#[inline]
fn green_matches([r, g, b]: [u8; 3], t: &ColorThresholds) -> bool {
    dominates(g, [r, b], t)
}

/// Red predicate with default thresholds.
#[inline]
pub fn is_red(rgb: [u8; 3]) -> bool {
    red_matches(rgb, &ColorThresholds::default())
}

/// Pink predicate with default thresholds.
#[inline]
pub fn is_pink(rgb: [u8; 3]) -> bool {
    pink_matches(rgb, &ColorThresholds::default())
}

/// Green predicate with default thresholds.
#[inline]
pub fn is_green(rgb: [u8; 3]) -> bool {
    green_matches(rgb, &ColorThresholds::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_colors_classify() {
        assert!(is_red([230, 20, 20]));
        assert!(!is_pink([230, 20, 20]));
        assert!(is_pink([230, 40, 100]));
        assert!(is_green([20, 200, 30]));
        assert!(!is_green([230, 20, 20]));
    }

    #[test]
    fn pink_pixels_are_also_red_by_default() {
        assert!(is_red([230, 40, 100]));
        assert!(is_pink([230, 40, 100]));

        let exclusive = ColorThresholds {
            exclusive_red: true,
            ..ColorThresholds::default()
        };
        assert!(!MarkerColor::Red.matches([230, 40, 100], &exclusive));
        assert!(MarkerColor::Pink.matches([230, 40, 100], &exclusive));
        assert!(MarkerColor::Red.matches([230, 40, 80], &exclusive));
    }

    #[test]
    fn brightness_floor_is_exclusive() {
        assert!(!is_red([110, 0, 0]));
        assert!(is_red([111, 0, 0]));
        assert!(!is_green([0, 110, 0]));
    }

    #[test]
    fn secondary_channels_must_stay_under_half() {
        // 100 is not < 200 * 0.5
        assert!(!is_red([200, 100, 0]));
        assert!(is_red([200, 99, 0]));
        assert!(!is_green([99, 200, 100]));
    }

    #[test]
    fn pink_needs_blue_above_floor() {
        assert!(!is_pink([240, 10, 80]));
        assert!(is_pink([240, 10, 81]));
        assert!(is_red([240, 10, 80]));
    }

    #[test]
    fn gray_and_white_match_nothing() {
        for rgb in [[255, 255, 255], [128, 128, 128], [0, 0, 0]] {
            for color in MarkerColor::ALL {
                assert!(!color.matches(rgb, &ColorThresholds::default()), "{rgb:?}");
            }
        }
    }

    #[test]
    fn custom_thresholds_shift_decisions() {
        let loose = ColorThresholds {
            brightness_floor: 50,
            ..ColorThresholds::default()
        };
        assert!(!is_green([10, 90, 10]));
        assert!(MarkerColor::Green.matches([10, 90, 10], &loose));
    }
}
