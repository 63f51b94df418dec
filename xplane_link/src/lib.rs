//! # xplane_link
//!
//! Sends flight-control inputs to X-Plane through the X-Plane Connect
//! plugin's UDP interface.
//!
//! No external networking crates are required: the `CTRL` datagram is
//! written byte by byte and sent over a plain [`std::net::UdpSocket`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use xplane_link::{XPlaneConfig, XPlaneConnect};
//!
//! let mut xp = XPlaneConnect::open(&XPlaneConfig::default()).unwrap();
//! // elevator, aileron, rudder, throttle
//! xp.send_controls(0.0, 0.1, 0.0, 0.8).unwrap();
//! ```

pub mod error;
pub mod packet;
pub mod client;

pub use error::LinkError;
pub use packet::{CtrlPacket, CTRL_PACKET_LEN, UNCHANGED};
pub use client::{XPlaneConfig, XPlaneConnect, DEFAULT_XPC_PORT};
