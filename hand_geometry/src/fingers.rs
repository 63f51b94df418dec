//! Finger-point projection: normalized landmarks → named pixel points.
//!
//! Only nine of the 21 landmarks matter to the controller: the wrist and a
//! tip/base pair for each of the four long fingers.  [`project_hands`]
//! turns a frame's detections into at most one [`FingerPointMap`] per side.

use std::fmt;

use crate::landmark::{DetectedHand, Handedness, Landmark};

// ════════════════════════════════════════════════════════════════════════════
// FingerPoint — the nine semantic names
// ════════════════════════════════════════════════════════════════════════════

/// A named hand point the controller cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FingerPoint {
    Wrist,
    IndexTop,
    IndexBottom,
    MiddleTop,
    MiddleBottom,
    RingTop,
    RingBottom,
    PinkyTop,
    PinkyBottom,
}

impl FingerPoint {
    pub const ALL: [FingerPoint; 9] = [
        FingerPoint::Wrist,
        FingerPoint::IndexTop,
        FingerPoint::IndexBottom,
        FingerPoint::MiddleTop,
        FingerPoint::MiddleBottom,
        FingerPoint::RingTop,
        FingerPoint::RingBottom,
        FingerPoint::PinkyTop,
        FingerPoint::PinkyBottom,
    ];

    /// Index of this point in the detector's 21-landmark layout.
    pub fn landmark_index(self) -> usize {
        match self {
            FingerPoint::Wrist        => 0,
            FingerPoint::IndexTop     => 8,
            FingerPoint::IndexBottom  => 5,
            FingerPoint::MiddleTop    => 12,
            FingerPoint::MiddleBottom => 9,
            FingerPoint::RingTop      => 16,
            FingerPoint::RingBottom   => 13,
            FingerPoint::PinkyTop     => 20,
            FingerPoint::PinkyBottom  => 17,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FingerPoint::Wrist        => "wrist",
            FingerPoint::IndexTop     => "index_top",
            FingerPoint::IndexBottom  => "index_bottom",
            FingerPoint::MiddleTop    => "middle_top",
            FingerPoint::MiddleBottom => "middle_bottom",
            FingerPoint::RingTop      => "ring_top",
            FingerPoint::RingBottom   => "ring_bottom",
            FingerPoint::PinkyTop     => "pinky_top",
            FingerPoint::PinkyBottom  => "pinky_bottom",
        }
    }

    fn slot(self) -> usize { self as usize }
}

// ════════════════════════════════════════════════════════════════════════════
// PixelPoint
// ════════════════════════════════════════════════════════════════════════════

/// Integer pixel coordinate in the full-resolution frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self { PixelPoint { x, y } }

    /// Euclidean distance in pixels.  Exact for any pair of points, even
    /// ones projected from wildly out-of-frame landmarks.
    pub fn distance(self, other: PixelPoint) -> f32 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt() as f32
    }

    /// Project a normalized landmark onto a `width × height` frame.
    pub fn from_normalized(lm: Landmark, width: u32, height: u32) -> Self {
        PixelPoint {
            x: (lm.x * width as f32).round() as i32,
            y: (lm.y * height as f32).round() as i32,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ProjectionError
// ════════════════════════════════════════════════════════════════════════════

/// Why a detected hand could not be turned into a [`FingerPointMap`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProjectionError {
    /// The detector returned fewer landmarks than the point needs.
    MissingLandmark { point: FingerPoint, found: usize },
    /// No left/right classification came with the hand.
    MissingHandedness,
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::MissingLandmark { point, found } => write!(
                f, "landmark {} ({}) missing, detector reported {}",
                point.landmark_index(), point.name(), found
            ),
            ProjectionError::MissingHandedness => write!(f, "hand has no handedness classification"),
        }
    }
}

impl std::error::Error for ProjectionError {}

// ════════════════════════════════════════════════════════════════════════════
// FingerPointMap
// ════════════════════════════════════════════════════════════════════════════

/// The nine named points of one hand, in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FingerPointMap {
    points: [PixelPoint; 9],
}

impl FingerPointMap {
    /// Project the nine named landmarks of one hand onto a `width × height` frame.
    pub fn project(landmarks: &[Landmark], width: u32, height: u32) -> Result<Self, ProjectionError> {
        let mut points = [PixelPoint::default(); 9];
        for fp in FingerPoint::ALL {
            let lm = landmarks.get(fp.landmark_index()).ok_or(
                ProjectionError::MissingLandmark { point: fp, found: landmarks.len() }
            )?;
            points[fp.slot()] = PixelPoint::from_normalized(*lm, width, height);
        }
        Ok(FingerPointMap { points })
    }

    /// Build a map directly from pixel points, e.g. for tests or a simulator.
    pub fn from_fn(mut f: impl FnMut(FingerPoint) -> PixelPoint) -> Self {
        let mut points = [PixelPoint::default(); 9];
        for fp in FingerPoint::ALL {
            points[fp.slot()] = f(fp);
        }
        FingerPointMap { points }
    }

    pub fn get(&self, fp: FingerPoint) -> PixelPoint { self.points[fp.slot()] }

    pub fn wrist(&self)         -> PixelPoint { self.get(FingerPoint::Wrist) }
    pub fn middle_top(&self)    -> PixelPoint { self.get(FingerPoint::MiddleTop) }
    pub fn middle_bottom(&self) -> PixelPoint { self.get(FingerPoint::MiddleBottom) }
}

// ════════════════════════════════════════════════════════════════════════════
// HandPair — one slot per side
// ════════════════════════════════════════════════════════════════════════════

/// Exactly two slots, one per side; `None` means "not detected this frame".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandPair {
    pub left:  Option<FingerPointMap>,
    pub right: Option<FingerPointMap>,
}

impl HandPair {
    /// Store `map` on its side, returning whatever was there before.
    fn put(&mut self, side: Handedness, map: FingerPointMap) -> Option<FingerPointMap> {
        match side {
            Handedness::Left  => self.left.replace(map),
            Handedness::Right => self.right.replace(map),
        }
    }
}

fn project_one(hand: &DetectedHand, width: u32, height: u32)
    -> Result<(Handedness, FingerPointMap), ProjectionError>
{
    let map  = FingerPointMap::project(&hand.landmarks, width, height)?;
    let side = hand.handedness.ok_or(ProjectionError::MissingHandedness)?;
    Ok((side, map))
}

/// Project every detected hand and sort the results into a [`HandPair`].
///
/// A hand that cannot be projected is left out and logged at debug level.
/// When two hands claim the same side, the one later in detection order wins.
pub fn project_hands(hands: &[DetectedHand], width: u32, height: u32) -> HandPair {
    let mut pair = HandPair::default();
    for (idx, hand) in hands.iter().enumerate() {
        match project_one(hand, width, height) {
            Ok((side, map)) => {
                if pair.put(side, map).is_some() {
                    log::debug!("hand #{} replaces an earlier {} hand", idx, side.name());
                }
            }
            Err(e) => log::debug!("hand #{} dropped: {}", idx, e),
        }
    }
    pair
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
