//! Application configuration and command-line flags.

use hand_geometry::ControlScale;
use xplane_link::XPlaneConfig;

use crate::detector::DetectorConfig;
use crate::error::PilotError;

pub const USAGE: &str = "\
Usage: hand_pilot [options]

  --detector sim|mediapipe   landmark source (default: sim)
  --helper <command>         MediaPipe helper command line
                             (default: \"python3 mediapipe_hands.py\")
  --camera <device>          V4L2 capture device, e.g. /dev/video0
                             (default: synthetic test pattern)
  --xplane <host[:port]>     X-Plane Connect endpoint (default: localhost:49009)
  --dry-run                  compute controls but do not send them
  --verbose                  debug logging
  --help                     this text
";

/// Where hand landmarks come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorMode {
    /// Keyboard-driven synthetic hands.
    Sim,
    /// MediaPipe helper subprocess.
    MediaPipe,
}

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    // ── capture ──────────────────────────────────────────────────────────
    pub width:          u32,
    pub height:         u32,
    /// Preview is shown at `width / preview_factor`.
    pub preview_factor: u32,
    /// `None` selects the synthetic test pattern.
    pub camera:         Option<String>,

    // ── detection ────────────────────────────────────────────────────────
    pub detector_mode:  DetectorMode,
    pub detector:       DetectorConfig,
    pub helper_command: Vec<String>,

    // ── output ───────────────────────────────────────────────────────────
    pub xplane:         XPlaneConfig,
    pub scale:          ControlScale,
    pub dry_run:        bool,
    pub verbose:        bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            width:          1280,
            height:         720,
            preview_factor: 2,
            camera:         None,
            detector_mode:  DetectorMode::Sim,
            detector:       DetectorConfig::default(),
            helper_command: vec!["python3".to_string(), "mediapipe_hands.py".to_string()],
            xplane:         XPlaneConfig::default(),
            scale:          ControlScale::default(),
            dry_run:        false,
            verbose:        false,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, PartialEq)]
pub enum Invocation {
    Run(AppConfig),
    Help,
}

impl AppConfig {
    /// Parse flags (program name already stripped).
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Invocation, PilotError> {
        let mut cfg = AppConfig::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .ok_or_else(|| PilotError::Config(format!("{flag} needs a value")))
            };
            match arg.as_str() {
                "--detector" => {
                    cfg.detector_mode = match value("--detector")?.as_str() {
                        "sim"       => DetectorMode::Sim,
                        "mediapipe" => DetectorMode::MediaPipe,
                        other => return Err(PilotError::Config(format!("unknown detector {other:?}"))),
                    };
                }
                "--helper" => {
                    let cmd: Vec<String> = value("--helper")?
                        .split_whitespace()
                        .map(str::to_string)
                        .collect();
                    if cmd.is_empty() {
                        return Err(PilotError::Config("empty --helper command".to_string()));
                    }
                    cfg.helper_command = cmd;
                }
                "--camera"  => cfg.camera = Some(value("--camera")?),
                "--xplane"  => {
                    let endpoint = value("--xplane")?;
                    cfg.xplane = cfg.xplane.with_endpoint(&endpoint)?;
                }
                "--dry-run" => cfg.dry_run = true,
                "--verbose" | "-v" => cfg.verbose = true,
                "--help" | "-h" => return Ok(Invocation::Help),
                other => return Err(PilotError::Config(format!("unknown argument {other:?}"))),
            }
        }
        Ok(Invocation::Run(cfg))
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info }
    }
}
