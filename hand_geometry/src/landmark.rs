//! Raw detector output: normalized landmarks plus a handedness label.

/// Number of landmarks the hand model reports per hand.
pub const LANDMARK_COUNT: usize = 21;

/// A single landmark in normalized image space, `[0,1] × [0,1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self { Landmark { x, y } }
}

/// Which hand the detector believes it saw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Parse a detector label such as `"Left"` or `"right"`.
    /// Anything else is treated as an unknown side.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("left") {
            Some(Handedness::Left)
        } else if label.eq_ignore_ascii_case("right") {
            Some(Handedness::Right)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Handedness::Left  => "left",
            Handedness::Right => "right",
        }
    }
}

/// One hand as reported by the landmark detector for a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedHand {
    pub landmarks:  Vec<Landmark>,
    /// `None` when the detector gave no usable classification.
    pub handedness: Option<Handedness>,
    /// Handedness classification score, 0.0–1.0.
    pub score:      f32,
}

impl DetectedHand {
    pub fn new(landmarks: Vec<Landmark>, handedness: Option<Handedness>, score: f32) -> Self {
        DetectedHand { landmarks, handedness, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handedness_label_is_case_insensitive() {
        assert_eq!(Handedness::from_label("Left"),   Some(Handedness::Left));
        assert_eq!(Handedness::from_label("RIGHT"),  Some(Handedness::Right));
        assert_eq!(Handedness::from_label(" right "), Some(Handedness::Right));
    }

    #[test]
    fn unknown_label_is_absent() {
        assert_eq!(Handedness::from_label(""), None);
        assert_eq!(Handedness::from_label("both"), None);
    }
}
