//! Hand-landmark detection — from a MediaPipe helper process or a keyboard
//! simulation.
//!
//! The public interface is the [`LandmarkDetector`] trait.  The pipeline
//! doesn't need to know whether hands came from a real model or from the
//! simulator.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::mpsc::{Receiver, TryRecvError};

use serde::Deserialize;

use hand_geometry::{DetectedHand, Handedness, Landmark, LANDMARK_COUNT};

use crate::error::PilotError;
use crate::frame::Frame;

// ════════════════════════════════════════════════════════════════════════════
// LandmarkDetector trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can find hands in a frame.
pub trait LandmarkDetector {
    /// `Ok(None)` when no hand is in view.
    fn detect(&mut self, frame: &Frame) -> Result<Option<Vec<DetectedHand>>, PilotError>;
}

impl<D: LandmarkDetector + ?Sized> LandmarkDetector for Box<D> {
    fn detect(&mut self, frame: &Frame) -> Result<Option<Vec<DetectedHand>>, PilotError> {
        (**self).detect(frame)
    }
}

/// Model settings handed to the detector.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorConfig {
    /// 0 is the fast, lower-accuracy hand model.
    pub model_complexity:         u8,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence:  f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            model_complexity:         0,
            min_detection_confidence: 0.5,
            min_tracking_confidence:  0.5,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MediaPipeDetector — helper subprocess
// ════════════════════════════════════════════════════════════════════════════

/// Hand detection through a MediaPipe helper running as a child process.
///
/// # Protocol
///
/// The helper is started as
/// `<command> --model-complexity N --min-detection-confidence C --min-tracking-confidence C`
/// and prints `READY` once the model is loaded.  Then, per frame:
///
/// * **to helper** (stdin): `width: u32`, `height: u32`, `channels: u32`
///   (little-endian, channels = 3) followed by `width*height*3` RGB bytes.
/// * **from helper** (stdout): one JSON line,
///   `{"hands":[{"handedness":"Left","score":0.97,"landmarks":[{"x":0.4,"y":0.6}, …]}]}`
///   with an optional `"error"` string.  `score` is optional and only
///   carried along; the helper applies the confidence thresholds itself.
///
/// The child is killed when the detector is dropped.
pub struct MediaPipeDetector {
    child:  Child,
    stdin:  ChildStdin,
    stdout: BufReader<ChildStdout>,
}

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    handedness: Option<String>,
    /// Handedness classification score, kept as data only.
    #[serde(default)]
    score: Option<f32>,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct ReplyJson {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

impl MediaPipeDetector {
    /// Spawn `command` (program followed by its own arguments) and wait for
    /// it to report `READY`.
    pub fn spawn(command: &[String], cfg: &DetectorConfig) -> Result<Self, PilotError> {
        let (program, args) = command.split_first()
            .ok_or_else(|| PilotError::Config("empty detector helper command".to_string()))?;

        log::info!("starting hand detector helper: {}", command.join(" "));
        let mut child = Command::new(program)
            .args(args)
            .arg("--model-complexity").arg(cfg.model_complexity.to_string())
            .arg("--min-detection-confidence").arg(cfg.min_detection_confidence.to_string())
            .arg("--min-tracking-confidence").arg(cfg.min_tracking_confidence.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| PilotError::Detector(format!("cannot start {program}: {e}")))?;

        let stdin  = child.stdin.take()
            .ok_or_else(|| PilotError::Detector("helper stdin unavailable".to_string()))?;
        let stdout = child.stdout.take()
            .ok_or_else(|| PilotError::Detector("helper stdout unavailable".to_string()))?;

        let mut det = MediaPipeDetector { child, stdin, stdout: BufReader::new(stdout) };

        let ready = det.read_reply_line()?;
        if ready.trim() != "READY" {
            return Err(PilotError::Detector(format!(
                "helper did not signal ready, got {:?}", ready.trim()
            )));
        }
        log::info!("hand detector ready");
        Ok(det)
    }

    fn read_reply_line(&mut self) -> Result<String, PilotError> {
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(PilotError::Detector("helper exited".to_string()));
        }
        Ok(line)
    }

    fn send_frame(&mut self, frame: &Frame) -> Result<(), PilotError> {
        self.stdin.write_all(&frame.width.to_le_bytes())?;
        self.stdin.write_all(&frame.height.to_le_bytes())?;
        self.stdin.write_all(&3u32.to_le_bytes())?;
        self.stdin.write_all(&frame.to_rgb_bytes())?;
        self.stdin.flush()?;
        Ok(())
    }
}

/// Turn one helper reply into detected hands.
///
/// The helper has already applied the detection and tracking thresholds,
/// so every hand it reports is kept.
fn parse_reply(line: &str) -> Result<Option<Vec<DetectedHand>>, PilotError> {
    let reply: ReplyJson = serde_json::from_str(line)?;
    if let Some(err) = reply.error {
        return Err(PilotError::Detector(err));
    }
    let hands: Vec<DetectedHand> = reply.hands.into_iter()
        .map(|h| DetectedHand {
            landmarks:  h.landmarks.iter().map(|l| Landmark::new(l.x, l.y)).collect(),
            handedness: h.handedness.as_deref().and_then(Handedness::from_label),
            score:      h.score.unwrap_or(1.0),
        })
        .collect();
    Ok(if hands.is_empty() { None } else { Some(hands) })
}

impl LandmarkDetector for MediaPipeDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Option<Vec<DetectedHand>>, PilotError> {
        self.send_frame(frame)?;
        let line = self.read_reply_line()?;
        parse_reply(&line)
    }
}

impl Drop for MediaPipeDetector {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        log::info!("hand detector helper stopped");
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimDetector — keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the preview window, for the simulator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Move the left hand by this many pixels.
    Nudge { dx: i32, dy: i32 },
    /// Stretch (positive) or curl (negative) the right middle finger.
    Stretch(i32),
    ToggleLeftFist,
    ToggleRightFist,
    ToggleLeftHand,
    ToggleRightHand,
}

/// Simulated key codes (mapped from minifb keys by the visualizer).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    Up,              // ↑
    Down,            // ↓
    Left,            // ←
    Right,           // →
    ThrottleUp,      // W
    ThrottleDown,    // S
    LeftFist,        // L
    RightFist,       // R
    LeftHand,        // 1
    RightHand,       // 2
}

impl SimKey {
    /// Pixels per key event for movement and stretch.
    pub const STEP: i32 = 8;

    pub fn input(self) -> SimInput {
        match self {
            SimKey::Up           => SimInput::Nudge { dx: 0, dy: -Self::STEP },
            SimKey::Down         => SimInput::Nudge { dx: 0, dy:  Self::STEP },
            SimKey::Left         => SimInput::Nudge { dx: -Self::STEP, dy: 0 },
            SimKey::Right        => SimInput::Nudge { dx:  Self::STEP, dy: 0 },
            SimKey::ThrottleUp   => SimInput::Stretch( Self::STEP),
            SimKey::ThrottleDown => SimInput::Stretch(-Self::STEP),
            SimKey::LeftFist     => SimInput::ToggleLeftFist,
            SimKey::RightFist    => SimInput::ToggleRightFist,
            SimKey::LeftHand     => SimInput::ToggleLeftHand,
            SimKey::RightHand    => SimInput::ToggleRightHand,
        }
    }
}

/// One synthetic hand, described in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SimHand {
    present: bool,
    fist:    bool,
    /// Middle-finger base position.
    knuckle: (i32, i32),
    /// Knuckle → wrist distance.
    reach:   i32,
    /// Knuckle → fingertip distance while open.
    extension: i32,
}

impl SimHand {
    /// Lay out 21 landmarks: wrist below the knuckle, fingers straight up
    /// (or folded back down past the knuckle for a fist).
    fn landmarks(&self, width: u32, height: u32) -> Vec<Landmark> {
        let (kx, ky) = self.knuckle;
        let wrist = (kx, ky + self.reach);
        let ext = if self.fist { -(self.reach * 3 / 4) } else { self.extension };

        let norm = |x: i32, y: i32| Landmark::new(x as f32 / width as f32, y as f32 / height as f32);
        let mut lms = vec![norm(wrist.0, wrist.1); LANDMARK_COUNT];
        // Thumb 1–4, then index/middle/ring/pinky as base,pip,dip,tip.
        for (finger, offset) in [(1usize, -60i32), (5, -25), (9, 0), (13, 25), (17, 50)] {
            for joint in 0..4 {
                let along = if joint == 0 { 0 } else { ext * joint as i32 / 3 };
                lms[finger + joint] = norm(kx + offset, ky - along);
            }
        }
        lms
    }
}

/// Gesture source driven by [`SimInput`] events from the preview window.
///
/// The left hand starts on the reference point, the right hand open with
/// half throttle.
pub struct SimDetector {
    rx:     Receiver<SimInput>,
    left:   SimHand,
    right:  SimHand,
}

impl SimDetector {
    pub fn new(rx: Receiver<SimInput>, width: u32, height: u32) -> Self {
        let (w, h) = (width as i32, height as i32);
        SimDetector {
            rx,
            left:  SimHand { present: true, fist: false, knuckle: (w / 4, h / 2),     reach: 150, extension: 120 },
            right: SimHand { present: true, fist: false, knuckle: (3 * w / 4, h / 2), reach: 150, extension: 50 },
        }
    }

    fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::Nudge { dx, dy } => {
                self.left.knuckle.0 += dx;
                self.left.knuckle.1 += dy;
            }
            SimInput::Stretch(d) => {
                self.right.extension = (self.right.extension + d).clamp(0, 400);
            }
            SimInput::ToggleLeftFist  => self.left.fist  = !self.left.fist,
            SimInput::ToggleRightFist => self.right.fist = !self.right.fist,
            SimInput::ToggleLeftHand  => self.left.present  = !self.left.present,
            SimInput::ToggleRightHand => self.right.present = !self.right.present,
        }
    }
}

impl LandmarkDetector for SimDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Option<Vec<DetectedHand>>, PilotError> {
        loop {
            match self.rx.try_recv() {
                Ok(input) => self.apply(input),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        let mut hands = Vec::new();
        for (hand, side) in [(self.left, Handedness::Left), (self.right, Handedness::Right)] {
            if hand.present {
                hands.push(DetectedHand::new(hand.landmarks(frame.width, frame.height), Some(side), 1.0));
            }
        }
        Ok(if hands.is_empty() { None } else { Some(hands) })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_geometry::{classify, project_hands, HandState};
    use std::sync::mpsc;

    #[test]
    fn parse_reply_keeps_every_reported_hand() {
        let line = r#"{"hands":[
            {"handedness":"Left","score":0.9,"landmarks":[{"x":0.1,"y":0.2}]},
            {"handedness":"Right","score":0.42,"landmarks":[{"x":0.5,"y":0.5}]}
        ]}"#;
        let hands = parse_reply(line).unwrap().unwrap();
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].handedness, Some(Handedness::Left));
        assert_eq!(hands[0].landmarks, vec![Landmark::new(0.1, 0.2)]);
        assert_eq!(hands[1].handedness, Some(Handedness::Right));
        assert_eq!(hands[1].score, 0.42);
    }

    #[test]
    fn parse_reply_without_score_keeps_the_hand() {
        let line = r#"{"hands":[{"handedness":"Right","landmarks":[{"x":0.5,"y":0.5}]}]}"#;
        let hands = parse_reply(line).unwrap().unwrap();
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].handedness, Some(Handedness::Right));
        assert_eq!(hands[0].score, 1.0);
    }

    #[test]
    fn parse_reply_without_hands_is_none() {
        assert_eq!(parse_reply(r#"{"hands":[]}"#).unwrap(), None);
        assert_eq!(parse_reply(r#"{}"#).unwrap(), None);
    }

    #[test]
    fn parse_reply_unknown_label_is_unclassified() {
        let line = r#"{"hands":[{"handedness":"?","score":1.0,"landmarks":[]}]}"#;
        let hands = parse_reply(line).unwrap().unwrap();
        assert_eq!(hands[0].handedness, None);
    }

    #[test]
    fn parse_reply_surfaces_helper_error() {
        let err = parse_reply(r#"{"hands":[],"error":"model missing"}"#).unwrap_err();
        assert!(matches!(err, PilotError::Detector(ref m) if m == "model missing"));
    }

    #[test]
    fn parse_reply_rejects_garbage() {
        assert!(parse_reply("not json").is_err());
    }

    #[test]
    fn spawn_rejects_empty_command() {
        assert!(matches!(
            MediaPipeDetector::spawn(&[], &DetectorConfig::default()),
            Err(PilotError::Config(_))
        ));
    }

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[cfg(unix)]
    #[test]
    fn helper_round_trip() {
        // 2×1 frame: 12-byte header + 6 RGB bytes, then one reply line.
        let helper = sh(r#"echo READY; head -c 18 >/dev/null; echo '{"hands":[{"handedness":"Left","landmarks":[{"x":0.25,"y":0.5}]}]}'; sleep 5"#);
        let mut det = MediaPipeDetector::spawn(&helper, &DetectorConfig::default()).unwrap();
        let hands = det.detect(&Frame::new(2, 1)).unwrap().unwrap();
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].handedness, Some(Handedness::Left));
        assert_eq!(hands[0].landmarks, vec![Landmark::new(0.25, 0.5)]);
    }

    #[cfg(unix)]
    #[test]
    fn helper_sees_header_and_pixels() {
        // Echo the header back as JSON numbers via od, so the layout is checked.
        let helper = sh(concat!(
            "echo READY; ",
            "hdr=$(head -c 12 | od -An -tu4 | tr -s ' ' ' '); ",
            "head -c 6 >/dev/null; ",
            "set -- $hdr; ",
            r#"echo "{\"hands\":[],\"error\":\"$1 $2 $3\"}"; sleep 5"#,
        ));
        let mut det = MediaPipeDetector::spawn(&helper, &DetectorConfig::default()).unwrap();
        let err = det.detect(&Frame::new(2, 1)).unwrap_err();
        assert!(matches!(err, PilotError::Detector(ref m) if m == "2 1 3"), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn helper_that_exits_before_ready_is_an_error() {
        let err = MediaPipeDetector::spawn(&sh("exit 0"), &DetectorConfig::default()).err();
        assert!(matches!(err, Some(PilotError::Detector(ref m)) if m == "helper exited"));
    }

    #[cfg(unix)]
    #[test]
    fn helper_without_handshake_is_rejected() {
        let err = MediaPipeDetector::spawn(&sh("echo HELLO; sleep 5"), &DetectorConfig::default()).err();
        assert!(matches!(err, Some(PilotError::Detector(_))));
    }

    #[cfg(unix)]
    #[test]
    fn helper_exiting_mid_session_fails_detect() {
        let mut det = MediaPipeDetector::spawn(&sh("echo READY"), &DetectorConfig::default()).unwrap();
        assert!(det.detect(&Frame::new(2, 1)).is_err());
    }

    #[test]
    fn missing_helper_program_is_a_detector_error() {
        let cmd = vec!["/nonexistent/hand-helper".to_string()];
        assert!(matches!(
            MediaPipeDetector::spawn(&cmd, &DetectorConfig::default()),
            Err(PilotError::Detector(_))
        ));
    }

    #[test]
    fn sim_hands_start_open_on_both_sides() {
        let (_tx, rx) = mpsc::channel();
        let mut sim = SimDetector::new(rx, 1280, 720);
        let hands = sim.detect(&Frame::new(1280, 720)).unwrap().unwrap();
        let pair = project_hands(&hands, 1280, 720);
        assert_eq!(classify(pair.left.as_ref()),  Some(HandState::Open));
        assert_eq!(classify(pair.right.as_ref()), Some(HandState::Open));
        assert_eq!(pair.left.unwrap().middle_bottom().x, 320);
    }

    #[test]
    fn sim_fist_toggle_closes_hand() {
        let (tx, rx) = mpsc::channel();
        let mut sim = SimDetector::new(rx, 1280, 720);
        tx.send(SimKey::RightFist.input()).unwrap();
        let hands = sim.detect(&Frame::new(1280, 720)).unwrap().unwrap();
        let pair = project_hands(&hands, 1280, 720);
        assert_eq!(classify(pair.right.as_ref()), Some(HandState::Closed));
    }

    #[test]
    fn sim_nudge_moves_left_hand() {
        let (tx, rx) = mpsc::channel();
        let mut sim = SimDetector::new(rx, 1280, 720);
        tx.send(SimKey::Right.input()).unwrap();
        tx.send(SimKey::Up.input()).unwrap();
        let hands = sim.detect(&Frame::new(1280, 720)).unwrap().unwrap();
        let pair = project_hands(&hands, 1280, 720);
        let p = pair.left.unwrap().middle_bottom();
        assert_eq!((p.x, p.y), (320 + SimKey::STEP, 360 - SimKey::STEP));
    }

    #[test]
    fn sim_without_hands_reports_none() {
        let (tx, rx) = mpsc::channel();
        let mut sim = SimDetector::new(rx, 1280, 720);
        tx.send(SimInput::ToggleLeftHand).unwrap();
        tx.send(SimInput::ToggleRightHand).unwrap();
        assert_eq!(sim.detect(&Frame::new(1280, 720)).unwrap(), None);
    }
}
