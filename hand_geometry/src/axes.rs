//! Axis mappers: pixel geometry → raw throttle and attitude scalars.
//!
//! Both mappers are pure.  Anything they used to draw is now the overlay
//! renderer's job; the mappers only report the numbers and the anchor
//! point the overlay needs.

use crate::fingers::{FingerPointMap, PixelPoint};

/// Pixels subtracted from the knuckle-to-wrist distance before it is used
/// as the throttle denominator.
pub const THROTTLE_REACH_OFFSET: f32 = 50.0;

// ════════════════════════════════════════════════════════════════════════════
// AxisReading — per-hand result
// ════════════════════════════════════════════════════════════════════════════

/// Outcome of reading one axis from one hand for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisReading<T> {
    /// A usable value.
    Value(T),
    /// The hand was not detected.
    Absent,
    /// The hand was there but the geometry gave no defined value
    /// (e.g. a zero denominator).
    Indeterminate,
}

impl<T> AxisReading<T> {
    pub fn value(self) -> Option<T> {
        match self {
            AxisReading::Value(v) => Some(v),
            _ => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Throttle
// ════════════════════════════════════════════════════════════════════════════

/// Throttle from the right hand: middle-finger extension divided by the
/// knuckle-to-wrist reach less [`THROTTLE_REACH_OFFSET`].
///
/// A zero denominator, or any non-finite quotient, reads as
/// [`AxisReading::Indeterminate`].  The result is not clamped.
pub fn throttle(fingers: Option<&FingerPointMap>) -> AxisReading<f32> {
    let f = match fingers {
        Some(f) => f,
        None    => return AxisReading::Absent,
    };
    let extension = f.middle_top().distance(f.middle_bottom());
    let reach     = f.middle_bottom().distance(f.wrist()) - THROTTLE_REACH_OFFSET;
    if reach == 0.0 {
        return AxisReading::Indeterminate;
    }
    let value = extension / reach;
    if value.is_finite() {
        AxisReading::Value(value)
    } else {
        AxisReading::Indeterminate
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Pitch / roll
// ════════════════════════════════════════════════════════════════════════════

/// Raw attitude offsets in pixels, not normalized.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Attitude {
    /// Horizontal offset: `reference.x - point.x`.
    pub roll:  f32,
    /// Vertical offset: `reference.y - point.y`.
    pub pitch: f32,
    /// The tracked point (left middle-finger base).
    pub point: PixelPoint,
}

/// Fixed point the left hand is steered around: a quarter across, half down.
pub fn reference_point(width: u32, height: u32) -> PixelPoint {
    PixelPoint::new((width / 4) as i32, (height / 2) as i32)
}

/// Offset of the left middle-finger base from `reference`.
pub fn pitch_roll(fingers: Option<&FingerPointMap>, reference: PixelPoint) -> AxisReading<Attitude> {
    let f = match fingers {
        Some(f) => f,
        None    => return AxisReading::Absent,
    };
    let point = f.middle_bottom();
    AxisReading::Value(Attitude {
        roll:  (reference.x as i64 - point.x as i64) as f32,
        pitch: (reference.y as i64 - point.y as i64) as f32,
        point,
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingers::FingerPoint;

    fn hand(wrist: (i32, i32), tip: (i32, i32), base: (i32, i32)) -> FingerPointMap {
        FingerPointMap::from_fn(|fp| match fp {
            FingerPoint::MiddleTop    => PixelPoint::new(tip.0, tip.1),
            FingerPoint::MiddleBottom => PixelPoint::new(base.0, base.1),
            _ => PixelPoint::new(wrist.0, wrist.1),
        })
    }

    #[test]
    fn zero_extension_gives_zero_throttle() {
        let h = hand((900, 600), (900, 400), (900, 400));
        assert_eq!(throttle(Some(&h)), AxisReading::Value(0.0));
    }

    #[test]
    fn throttle_formula() {
        // extension = 100, reach = 250 - 50 = 200
        let h = hand((900, 650), (900, 300), (900, 400));
        assert_eq!(throttle(Some(&h)), AxisReading::Value(0.5));
    }

    #[test]
    fn throttle_is_not_clamped() {
        // extension = 300, reach = 150 - 50 = 100
        let h = hand((900, 650), (900, 200), (900, 500));
        assert_eq!(throttle(Some(&h)), AxisReading::Value(3.0));
    }

    #[test]
    fn reach_equal_to_offset_is_indeterminate() {
        let h = hand((900, 650), (900, 500), (900, 600));
        assert_eq!(throttle(Some(&h)), AxisReading::Indeterminate);
    }

    #[test]
    fn negative_reach_passes_through() {
        // extension = 10, reach = 25 - 50 = -25
        let h = hand((900, 650), (900, 615), (900, 625));
        assert_eq!(throttle(Some(&h)), AxisReading::Value(-0.4));
    }

    #[test]
    fn absent_hand_reads_absent() {
        assert_eq!(throttle(None), AxisReading::Absent);
        assert_eq!(pitch_roll(None, reference_point(1280, 720)), AxisReading::Absent);
    }

    #[test]
    fn reference_point_uses_integer_division() {
        assert_eq!(reference_point(1280, 720), PixelPoint::new(320, 360));
        assert_eq!(reference_point(1281, 721), PixelPoint::new(320, 360));
    }

    #[test]
    fn point_on_reference_has_zero_attitude() {
        let r = reference_point(1280, 720);
        let h = hand((320, 500), (320, 200), (r.x, r.y));
        let a = pitch_roll(Some(&h), r).value().unwrap();
        assert_eq!((a.roll, a.pitch), (0.0, 0.0));
    }

    #[test]
    fn attitude_is_offset_from_reference() {
        let r = reference_point(1280, 720);
        let h = hand((0, 0), (0, 0), (400, 300));
        let a = pitch_roll(Some(&h), r).value().unwrap();
        assert_eq!(a.roll,  -80.0);
        assert_eq!(a.pitch,  60.0);
        assert_eq!(a.point, PixelPoint::new(400, 300));
    }

    #[test]
    fn saturated_points_still_read() {
        let h = hand((i32::MIN, 0), (i32::MAX, 0), (i32::MAX, i32::MIN));
        assert!(throttle(Some(&h)).value().unwrap().is_finite());
        let a = pitch_roll(Some(&h), reference_point(1280, 720)).value().unwrap();
        assert!(a.roll < -2.0e9 && a.pitch > 2.0e9);
        assert!(crate::gesture::classify(Some(&h)).is_some());
    }
}
