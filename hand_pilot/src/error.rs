use std::fmt;

use xplane_link::LinkError;

#[derive(Debug)]
pub enum PilotError {
    Io(std::io::Error),
    /// The preview window could not be created or updated.
    Window(String),
    /// The capture device failed to open or stream.
    Camera(String),
    /// The landmark detector failed or spoke an unexpected protocol.
    Detector(String),
    Link(LinkError),
    /// Bad command-line arguments.
    Config(String),
}

impl fmt::Display for PilotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PilotError::Io(err) => write!(f, "io error: {err}"),
            PilotError::Window(msg) => write!(f, "window error: {msg}"),
            PilotError::Camera(msg) => write!(f, "camera error: {msg}"),
            PilotError::Detector(msg) => write!(f, "detector error: {msg}"),
            PilotError::Link(err) => write!(f, "simulator link error: {err}"),
            PilotError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for PilotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PilotError::Io(err) => Some(err),
            PilotError::Link(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PilotError {
    fn from(err: std::io::Error) -> Self {
        PilotError::Io(err)
    }
}

impl From<LinkError> for PilotError {
    fn from(err: LinkError) -> Self {
        PilotError::Link(err)
    }
}

impl From<minifb::Error> for PilotError {
    fn from(err: minifb::Error) -> Self {
        PilotError::Window(err.to_string())
    }
}

impl From<serde_json::Error> for PilotError {
    fn from(err: serde_json::Error) -> Self {
        PilotError::Detector(format!("bad detector reply: {err}"))
    }
}
