//! The per-frame pipeline and the main loop.
//!
//! One iteration per captured frame, single-threaded, no overlap:
//!
//! ```text
//!  read ─► mirror ─► detect ─► project ─► classify ─► map ─► advance ─► overlay ─► send
//!   │                  │
//!   └ empty: skip      └ no hands: show frame, keep state
//! ```

use std::sync::mpsc;

use hand_geometry::{
    project_hands, reference_point, ControlScale, ControlVector, HandReport, HandState, PilotState,
};
use xplane_link::XPlaneConnect;

use crate::config::{AppConfig, DetectorMode};
use crate::detector::{LandmarkDetector, MediaPipeDetector, SimDetector};
use crate::error::PilotError;
use crate::frame::{Frame, FrameSource, TestPatternSource};
use crate::link::{ControlLink, NullLink};
use crate::overlay;
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// Pipeline
// ════════════════════════════════════════════════════════════════════════════

/// What one [`Pipeline::step`] did.
#[derive(Debug, PartialEq)]
pub enum StepOutcome {
    /// The source had nothing this time; nothing else happened.
    EmptyFrame,
    /// No hand in view: no controls sent, state untouched.
    NoHands(Frame),
    /// Controls were computed and handed to the link.
    Dispatched(Frame, ControlVector),
}

impl StepOutcome {
    pub fn frame(&self) -> Option<&Frame> {
        match self {
            StepOutcome::EmptyFrame => None,
            StepOutcome::NoHands(f) | StepOutcome::Dispatched(f, _) => Some(f),
        }
    }
}

pub struct Pipeline<S, D, L> {
    source:   S,
    detector: D,
    link:     L,
    scale:    ControlScale,
    state:    PilotState,
}

impl<S: FrameSource, D: LandmarkDetector, L: ControlLink> Pipeline<S, D, L> {
    pub fn new(source: S, detector: D, link: L, scale: ControlScale) -> Self {
        Pipeline { source, detector, link, scale, state: PilotState::default() }
    }

    pub fn state(&self) -> PilotState { self.state }

    pub fn link(&self) -> &L { &self.link }

    /// Run one frame through.  Failures at any boundary are logged and
    /// never end the loop.
    pub fn step(&mut self) -> StepOutcome {
        let mut frame = match self.source.read() {
            Ok(Some(f)) if !f.pixels.is_empty() => f,
            Ok(_) => {
                log::warn!("Ignoring empty camera frame.");
                return StepOutcome::EmptyFrame;
            }
            Err(e) => {
                log::warn!("Ignoring empty camera frame. ({})", e);
                return StepOutcome::EmptyFrame;
            }
        };
        frame.mirror();

        let hands = match self.detector.detect(&frame) {
            Ok(Some(hands)) if !hands.is_empty() => hands,
            Ok(_) => return StepOutcome::NoHands(frame),
            Err(e) => {
                log::warn!("hand detection failed: {}", e);
                return StepOutcome::NoHands(frame);
            }
        };

        let pair = project_hands(&hands, frame.width, frame.height);
        let report = HandReport::assess(&pair, reference_point(frame.width, frame.height));
        log::debug!(
            "hands: left={} right={}",
            report.left.map_or("none", HandState::name),
            report.right.map_or("none", HandState::name),
        );
        self.state = self.state.advance(&report);
        let controls = self.state.controls(&self.scale);

        overlay::draw_report(&mut frame, &report, Some(&controls));

        if let Err(e) = self.link.send_controls(controls) {
            log::warn!("control send failed: {}", e);
        }
        StepOutcome::Dispatched(frame, controls)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Main loop
// ════════════════════════════════════════════════════════════════════════════

/// Build the boundaries `cfg` asks for and run until the window closes or
/// Esc is pressed.  Camera, detector and link are released on return.
pub fn run(cfg: AppConfig) -> Result<(), PilotError> {
    let source = open_source(&cfg)?;

    let mut sim_tx = None;
    let detector: Box<dyn LandmarkDetector> = match cfg.detector_mode {
        DetectorMode::Sim => {
            let (tx, rx) = mpsc::channel();
            sim_tx = Some(tx);
            log::info!("hand detector: keyboard simulation");
            Box::new(SimDetector::new(rx, cfg.width, cfg.height))
        }
        DetectorMode::MediaPipe => {
            Box::new(MediaPipeDetector::spawn(&cfg.helper_command, &cfg.detector)?)
        }
    };

    let link: Box<dyn ControlLink> = if cfg.dry_run {
        log::info!("dry run: controls are not sent");
        Box::new(NullLink::default())
    } else {
        Box::new(XPlaneConnect::open(&cfg.xplane)?)
    };

    let mut vis = Visualizer::new(cfg.width, cfg.height, cfg.preview_factor, sim_tx)?;
    let mut pipeline = Pipeline::new(source, detector, link, cfg.scale);

    while vis.is_open() && vis.poll_input() {
        let outcome = pipeline.step();
        if let Some(frame) = outcome.frame() {
            vis.show(frame)?;
        }
    }

    let s = pipeline.state();
    log::info!(
        "shutting down: throttle={:.2} pitch={:.0} roll={:.0}",
        s.throttle, s.pitch, s.roll
    );
    Ok(())
}

fn open_source(cfg: &AppConfig) -> Result<Box<dyn FrameSource>, PilotError> {
    match &cfg.camera {
        None => {
            log::info!("frame source: test pattern {}x{}", cfg.width, cfg.height);
            Ok(Box::new(TestPatternSource::new(cfg.width, cfg.height)))
        }
        #[cfg(feature = "v4l2")]
        Some(path) => Ok(Box::new(crate::frame::V4l2Source::open(path, cfg.width, cfg.height)?)),
        #[cfg(not(feature = "v4l2"))]
        Some(path) => Err(PilotError::Config(format!(
            "camera {path} requested but built without the `v4l2` feature"
        ))),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
