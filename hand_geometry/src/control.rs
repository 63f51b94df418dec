//! Frame-spanning pilot state and the final control vector.
//!
//! ## Update rule
//!
//! [`PilotState`] holds three scalars across frames.  Each frame a
//! [`HandReport`] is folded in with one rule for every axis: a
//! [`AxisReading::Value`] replaces the held scalar, `Absent` and
//! `Indeterminate` keep it.
//!
//! | Hand | State | Effect |
//! |---|---|---|
//! | Left | Open | pitch/roll ← offsets from the reference point |
//! | Left | Closed / missing | pitch/roll held |
//! | Right | Open | throttle ← extension / reach (held if indeterminate) |
//! | Right | Closed | throttle ← 0.0 |
//! | Right | missing | throttle held |

use crate::axes::{self, AxisReading, Attitude};
use crate::fingers::{HandPair, PixelPoint};
use crate::gesture::{self, HandState};

// ════════════════════════════════════════════════════════════════════════════
// ControlVector
// ════════════════════════════════════════════════════════════════════════════

/// The four values sent to the simulator each frame.
///
/// Nominal ranges are -1..1 for the surfaces and 0..1 for throttle, but
/// nothing here clamps.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlVector {
    pub elevator: f32,
    pub aileron:  f32,
    pub rudder:   f32,
    pub throttle: f32,
}

impl ControlVector {
    /// Values in simulator order: elevator, aileron, rudder, throttle.
    pub fn as_array(&self) -> [f32; 4] {
        [self.elevator, self.aileron, self.rudder, self.throttle]
    }
}

/// Linear divisors from raw pixel offsets to surface deflection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlScale {
    pub elevator_divisor: f32,
    pub aileron_divisor:  f32,
}

impl Default for ControlScale {
    fn default() -> Self {
        ControlScale { elevator_divisor: 250.0, aileron_divisor: 300.0 }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandReport — everything one frame says about the hands
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandReport {
    pub left:      Option<HandState>,
    pub right:     Option<HandState>,
    pub throttle:  AxisReading<f32>,
    pub attitude:  AxisReading<Attitude>,
    /// Where the right middle-finger base sits, for labelling the throttle.
    pub throttle_anchor: Option<PixelPoint>,
    pub reference: PixelPoint,
}

impl HandReport {
    /// Classify both hands and read the axes their state enables.
    pub fn assess(pair: &HandPair, reference: PixelPoint) -> Self {
        let left  = gesture::classify(pair.left.as_ref());
        let right = gesture::classify(pair.right.as_ref());

        let attitude = match left {
            Some(HandState::Open)   => axes::pitch_roll(pair.left.as_ref(), reference),
            // closed left hand: present, but not steering
            Some(HandState::Closed) => AxisReading::Indeterminate,
            None                    => AxisReading::Absent,
        };

        let throttle = match right {
            Some(HandState::Open)   => axes::throttle(pair.right.as_ref()),
            Some(HandState::Closed) => AxisReading::Value(0.0),
            None                    => AxisReading::Absent,
        };

        let throttle_anchor = match right {
            Some(HandState::Open) => pair.right.map(|f| f.middle_bottom()),
            _ => None,
        };

        HandReport { left, right, throttle, attitude, throttle_anchor, reference }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PilotState
// ════════════════════════════════════════════════════════════════════════════

/// The last known throttle and attitude, carried from frame to frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PilotState {
    pub throttle: f32,
    /// Vertical pixel offset of the left hand from the reference point.
    pub pitch:    f32,
    /// Horizontal pixel offset of the left hand from the reference point.
    pub roll:     f32,
}

impl PilotState {
    /// Fold one frame's report into the held values.
    pub fn advance(self, report: &HandReport) -> PilotState {
        let mut next = self;
        if let Some(t) = report.throttle.value() {
            next.throttle = t;
        }
        if let Some(a) = report.attitude.value() {
            next.pitch = a.pitch;
            next.roll  = a.roll;
        }
        next
    }

    /// Rescale to simulator units.  Rudder is always zero.
    pub fn controls(&self, scale: &ControlScale) -> ControlVector {
        ControlVector {
            elevator: -self.pitch / scale.elevator_divisor,
            aileron:  -self.roll  / scale.aileron_divisor,
            rudder:   0.0,
            throttle: self.throttle,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::reference_point;
    use crate::fingers::{FingerPoint, FingerPointMap};

    /// Vertical hand: wrist at the bottom, knuckle `reach` above it, fingertip
    /// `ext` above (open) or below (closed) the knuckle.
    fn hand(base: (i32, i32), reach: i32, ext: i32) -> FingerPointMap {
        FingerPointMap::from_fn(|fp| match fp {
            FingerPoint::Wrist        => PixelPoint::new(base.0, base.1 + reach),
            FingerPoint::MiddleBottom => PixelPoint::new(base.0, base.1),
            FingerPoint::MiddleTop    => PixelPoint::new(base.0, base.1 - ext),
            _ => PixelPoint::new(base.0, base.1),
        })
    }

    fn open(base: (i32, i32)) -> FingerPointMap { hand(base, 250, 100) }
    fn closed(base: (i32, i32)) -> FingerPointMap { hand(base, 250, -200) }

    #[test]
    fn empty_pair_holds_everything() {
        let held   = PilotState { throttle: 0.7, pitch: 12.0, roll: -4.0 };
        let report = HandReport::assess(&HandPair::default(), reference_point(1280, 720));
        assert_eq!(held.advance(&report), held);
    }

    #[test]
    fn open_left_updates_attitude() {
        let pair = HandPair { left: Some(open((400, 300))), right: None };
        let report = HandReport::assess(&pair, reference_point(1280, 720));
        let s = PilotState::default().advance(&report);
        assert_eq!(s.roll,  -80.0);
        assert_eq!(s.pitch,  60.0);
    }

    #[test]
    fn closed_left_holds_attitude() {
        let held = PilotState { throttle: 0.0, pitch: 5.0, roll: 7.0 };
        let pair = HandPair { left: Some(closed((400, 300))), right: None };
        let report = HandReport::assess(&pair, reference_point(1280, 720));
        assert_eq!(report.left, Some(HandState::Closed));
        assert_eq!(held.advance(&report), held);
    }

    #[test]
    fn open_right_sets_throttle() {
        let pair = HandPair { left: None, right: Some(open((900, 400))) };
        let report = HandReport::assess(&pair, reference_point(1280, 720));
        assert_eq!(report.throttle, AxisReading::Value(0.5));
        assert_eq!(report.throttle_anchor, Some(PixelPoint::new(900, 400)));
        assert_eq!(PilotState::default().advance(&report).throttle, 0.5);
    }

    #[test]
    fn closed_right_cuts_throttle() {
        let held = PilotState { throttle: 0.9, pitch: 0.0, roll: 0.0 };
        let pair = HandPair { left: None, right: Some(closed((900, 400))) };
        let report = HandReport::assess(&pair, reference_point(1280, 720));
        assert_eq!(held.advance(&report).throttle, 0.0);
    }

    #[test]
    fn indeterminate_throttle_holds() {
        let held = PilotState { throttle: 0.3, pitch: 0.0, roll: 0.0 };
        // reach 50 → denominator 0
        let pair = HandPair { left: None, right: Some(hand((900, 400), 50, 10)) };
        let report = HandReport::assess(&pair, reference_point(1280, 720));
        assert_eq!(report.throttle, AxisReading::Indeterminate);
        assert_eq!(held.advance(&report).throttle, 0.3);
    }

    #[test]
    fn controls_rescale_and_zero_rudder() {
        let s = PilotState { throttle: 0.25, pitch: 50.0, roll: -60.0 };
        let c = s.controls(&ControlScale::default());
        assert_eq!(c.elevator, -0.2);
        assert_eq!(c.aileron,   0.2);
        assert_eq!(c.rudder,    0.0);
        assert_eq!(c.throttle,  0.25);
        assert_eq!(c.as_array(), [-0.2, 0.2, 0.0, 0.25]);
    }

    #[test]
    fn open_left_closed_right() {
        let pair = HandPair {
            left:  Some(open((400, 300))),
            right: Some(closed((900, 400))),
        };
        let report = HandReport::assess(&pair, reference_point(1280, 720));
        let s = PilotState { throttle: 0.8, pitch: 0.0, roll: 0.0 }.advance(&report);
        let c = s.controls(&ControlScale::default());
        assert_eq!(c.throttle, 0.0);
        assert_eq!(c.elevator, -60.0 / 250.0);
        assert_eq!(c.aileron,   80.0 / 300.0);
    }
}
