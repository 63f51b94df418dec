//! The X-Plane Connect `CTRL` datagram.
//!
//! Layout (31 bytes, little-endian):
//!
//! ```text
//!  0..4   "CTRL"
//!  4      0 (reserved)
//!  5..9   elevator     f32
//!  9..13  aileron      f32
//! 13..17  rudder       f32
//! 17..21  throttle     f32
//! 21      gear         i8   (-1 = leave as is)
//! 22..26  flaps        f32  (-998 = leave as is)
//! 26      aircraft     u8   (0 = player aircraft)
//! 27..31  speed brakes f32  (-998 = leave as is)
//! ```

/// Sentinel the plugin reads as "do not change this value".
pub const UNCHANGED: f32 = -998.0;

/// Encoded size of a `CTRL` datagram.
pub const CTRL_PACKET_LEN: usize = 31;

/// One set of control inputs for one aircraft.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CtrlPacket {
    pub elevator:     f32,
    pub aileron:      f32,
    pub rudder:       f32,
    pub throttle:     f32,
    /// Gear handle: 0 up, 1 down, -1 unchanged.
    pub gear:         i8,
    pub flaps:        f32,
    /// Aircraft index, 0 for the player's own aircraft.
    pub aircraft:     u8,
    pub speed_brakes: f32,
}

impl CtrlPacket {
    /// Stick, pedals and throttle for the player aircraft; everything else
    /// left as the simulator has it.
    pub fn new(elevator: f32, aileron: f32, rudder: f32, throttle: f32) -> Self {
        CtrlPacket {
            elevator,
            aileron,
            rudder,
            throttle,
            gear:         -1,
            flaps:        UNCHANGED,
            aircraft:     0,
            speed_brakes: UNCHANGED,
        }
    }

    /// Serialise to the 31-byte wire form.
    pub fn encode(&self) -> [u8; CTRL_PACKET_LEN] {
        let mut out = [0u8; CTRL_PACKET_LEN];
        out[0..4].copy_from_slice(b"CTRL");
        // out[4] stays 0
        out[5..9].copy_from_slice(&self.elevator.to_le_bytes());
        out[9..13].copy_from_slice(&self.aileron.to_le_bytes());
        out[13..17].copy_from_slice(&self.rudder.to_le_bytes());
        out[17..21].copy_from_slice(&self.throttle.to_le_bytes());
        out[21] = self.gear as u8;
        out[22..26].copy_from_slice(&self.flaps.to_le_bytes());
        out[26] = self.aircraft;
        out[27..31].copy_from_slice(&self.speed_brakes.to_le_bytes());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f32_at(buf: &[u8], at: usize) -> f32 {
        f32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
    }

    #[test]
    fn header_and_length() {
        let b = CtrlPacket::new(0.0, 0.0, 0.0, 0.0).encode();
        assert_eq!(b.len(), 31);
        assert_eq!(&b[0..4], b"CTRL");
        assert_eq!(b[4], 0);
    }

    #[test]
    fn axes_in_simulator_order() {
        let b = CtrlPacket::new(-0.25, 0.5, 0.0, 0.75).encode();
        assert_eq!(f32_at(&b, 5),  -0.25);
        assert_eq!(f32_at(&b, 9),   0.5);
        assert_eq!(f32_at(&b, 13),  0.0);
        assert_eq!(f32_at(&b, 17),  0.75);
    }

    #[test]
    fn untouched_fields_use_sentinels() {
        let b = CtrlPacket::new(0.0, 0.0, 0.0, 1.0).encode();
        assert_eq!(b[21], 0xFF);              // gear -1
        assert_eq!(f32_at(&b, 22), UNCHANGED); // flaps
        assert_eq!(b[26], 0);                 // player aircraft
        assert_eq!(f32_at(&b, 27), UNCHANGED); // speed brakes
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let b = CtrlPacket::new(-4.2, 0.0, 0.0, 3.0).encode();
        assert_eq!(f32_at(&b, 5), -4.2);
        assert_eq!(f32_at(&b, 17), 3.0);
    }
}
