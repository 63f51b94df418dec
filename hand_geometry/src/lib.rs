//! # hand_geometry
//!
//! Pure per-frame geometry for turning detected hand landmarks into flight
//! control axes.  Nothing here touches a camera, a window or a socket.
//!
//! ## Pipeline
//!
//! | Stage | Item | Input → Output |
//! |---|---|---|
//! | Projection | [`project_hands`] | normalized landmarks → [`HandPair`] of pixel points |
//! | Classification | [`classify`] | one hand → [`HandState`] (open / closed) |
//! | Throttle | [`throttle`] | right hand → throttle scalar |
//! | Attitude | [`pitch_roll`] | left hand → pixel offsets from the reference point |
//! | Hold & rescale | [`PilotState`] | readings → [`ControlVector`] |
//!
//! ## Quick start
//!
//! ```rust
//! use hand_geometry::{HandPair, HandReport, PilotState, ControlScale, reference_point};
//!
//! let reference = reference_point(1280, 720);
//! let report    = HandReport::assess(&HandPair::default(), reference);
//! let state     = PilotState::default().advance(&report);
//! let controls  = state.controls(&ControlScale::default());
//! assert_eq!(controls.rudder, 0.0);
//! ```

pub mod landmark;
pub mod fingers;
pub mod gesture;
pub mod axes;
pub mod control;

pub use landmark::{Landmark, Handedness, DetectedHand, LANDMARK_COUNT};
pub use fingers::{FingerPoint, PixelPoint, FingerPointMap, HandPair, ProjectionError, project_hands};
pub use gesture::{HandState, classify};
pub use axes::{AxisReading, Attitude, throttle, pitch_roll, reference_point, THROTTLE_REACH_OFFSET};
pub use control::{ControlVector, ControlScale, HandReport, PilotState};
