//! The simulator control boundary as the pipeline sees it.

use hand_geometry::ControlVector;
use xplane_link::{LinkError, XPlaneConnect};

/// Anything that accepts a control vector once per frame.
pub trait ControlLink {
    fn send_controls(&mut self, controls: ControlVector) -> Result<(), LinkError>;
}

impl ControlLink for XPlaneConnect {
    fn send_controls(&mut self, c: ControlVector) -> Result<(), LinkError> {
        XPlaneConnect::send_controls(self, c.elevator, c.aileron, c.rudder, c.throttle)
    }
}

/// Used for `--dry-run`: logs what would have been sent.
#[derive(Debug, Default)]
pub struct NullLink {
    pub sent: usize,
}

impl ControlLink for NullLink {
    fn send_controls(&mut self, c: ControlVector) -> Result<(), LinkError> {
        self.sent += 1;
        log::debug!(
            "dry run: elevator={:.3} aileron={:.3} rudder={:.3} throttle={:.3}",
            c.elevator, c.aileron, c.rudder, c.throttle
        );
        Ok(())
    }
}

impl<L: ControlLink + ?Sized> ControlLink for Box<L> {
    fn send_controls(&mut self, c: ControlVector) -> Result<(), LinkError> {
        (**self).send_controls(c)
    }
}
