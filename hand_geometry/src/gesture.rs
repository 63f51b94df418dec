//! Open / closed hand classification.
//!
//! A curled middle finger brings its tip back toward the wrist, so the tip
//! ends up closer to the wrist than the knuckle.  Only the middle finger is
//! inspected and the test is sensitive to hand rotation.

use crate::fingers::FingerPointMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandState {
    Open,
    Closed,
}

impl HandState {
    pub fn name(self) -> &'static str {
        match self {
            HandState::Open   => "Open",
            HandState::Closed => "Closed",
        }
    }
}

/// Classify one hand.  `None` in, `None` out.
pub fn classify(fingers: Option<&FingerPointMap>) -> Option<HandState> {
    let f = fingers?;
    let d_top    = f.wrist().distance(f.middle_top());
    let d_bottom = f.wrist().distance(f.middle_bottom());
    if d_bottom > d_top {
        Some(HandState::Closed)
    } else {
        Some(HandState::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingers::{FingerPoint, PixelPoint};

    fn hand(wrist: (i32, i32), tip: (i32, i32), base: (i32, i32)) -> FingerPointMap {
        FingerPointMap::from_fn(|fp| match fp {
            FingerPoint::Wrist        => PixelPoint::new(wrist.0, wrist.1),
            FingerPoint::MiddleTop    => PixelPoint::new(tip.0, tip.1),
            FingerPoint::MiddleBottom => PixelPoint::new(base.0, base.1),
            _ => PixelPoint::new(wrist.0, wrist.1),
        })
    }

    #[test]
    fn extended_finger_is_open() {
        let h = hand((500, 600), (500, 300), (500, 450));
        assert_eq!(classify(Some(&h)), Some(HandState::Open));
    }

    #[test]
    fn curled_finger_is_closed() {
        let h = hand((500, 600), (500, 520), (500, 450));
        assert_eq!(classify(Some(&h)), Some(HandState::Closed));
    }

    #[test]
    fn equal_distances_count_as_open() {
        let h = hand((0, 0), (30, 40), (40, 30));
        assert_eq!(classify(Some(&h)), Some(HandState::Open));
    }

    #[test]
    fn absent_hand_has_no_state() {
        assert_eq!(classify(None), None);
    }
}
