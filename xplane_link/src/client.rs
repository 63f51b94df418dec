//! UDP client for the X-Plane Connect plugin.

use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use crate::error::LinkError;
use crate::packet::CtrlPacket;

/// Port the X-Plane Connect plugin listens on.
pub const DEFAULT_XPC_PORT: u16 = 49009;

// ════════════════════════════════════════════════════════════════════════════
// XPlaneConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct XPlaneConfig {
    pub host:       String,
    pub port:       u16,
    /// Local port to bind; 0 lets the OS choose.
    pub local_port: u16,
    /// Socket read/write timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for XPlaneConfig {
    fn default() -> Self {
        XPlaneConfig {
            host:       "localhost".to_string(),
            port:       DEFAULT_XPC_PORT,
            local_port: 0,
            timeout_ms: 100,
        }
    }
}

impl XPlaneConfig {
    /// Parse `host`, `host:port` or `:port`.
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, LinkError> {
        match endpoint.rsplit_once(':') {
            Some((host, port)) => {
                self.port = port.parse()
                    .map_err(|_| LinkError::Resolve(endpoint.to_string()))?;
                if !host.is_empty() {
                    self.host = host.to_string();
                }
            }
            None => self.host = endpoint.to_string(),
        }
        Ok(self)
    }

    fn target(&self) -> Result<SocketAddr, LinkError> {
        let endpoint = format!("{}:{}", self.host, self.port);
        // Prefer IPv4: the plugin binds 0.0.0.0.
        let mut addrs: Vec<SocketAddr> = endpoint.to_socket_addrs()?.collect();
        addrs.sort_by_key(|a| !a.is_ipv4());
        addrs.into_iter().next().ok_or(LinkError::Resolve(endpoint))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// XPlaneConnect
// ════════════════════════════════════════════════════════════════════════════

/// An open control channel to one simulator instance.
///
/// The socket is released when the value is dropped.
#[derive(Debug)]
pub struct XPlaneConnect {
    socket: UdpSocket,
    target: SocketAddr,
}

impl XPlaneConnect {
    pub fn open(cfg: &XPlaneConfig) -> Result<Self, LinkError> {
        let target = cfg.target()?;
        let bind: SocketAddr = if target.is_ipv4() {
            ([0, 0, 0, 0], cfg.local_port).into()
        } else {
            ([0u16; 8], cfg.local_port).into()
        };
        let socket = UdpSocket::bind(bind)?;
        let timeout = Some(Duration::from_millis(cfg.timeout_ms.max(1)));
        socket.set_read_timeout(timeout)?;
        socket.set_write_timeout(timeout)?;
        log::info!("X-Plane link open: {} -> {}", socket.local_addr()?, target);
        Ok(XPlaneConnect { socket, target })
    }

    pub fn target(&self) -> SocketAddr { self.target }

    pub fn local_addr(&self) -> Result<SocketAddr, LinkError> {
        Ok(self.socket.local_addr()?)
    }

    /// Send one encoded packet.  No acknowledgement is read back.
    pub fn send_ctrl(&mut self, packet: &CtrlPacket) -> Result<(), LinkError> {
        let bytes = packet.encode();
        let sent  = self.socket.send_to(&bytes, self.target)?;
        if sent != bytes.len() {
            return Err(LinkError::ShortWrite { sent, expected: bytes.len() });
        }
        Ok(())
    }

    /// Send stick, pedals and throttle for the player aircraft.
    pub fn send_controls(&mut self, elevator: f32, aileron: f32, rudder: f32, throttle: f32)
        -> Result<(), LinkError>
    {
        self.send_ctrl(&CtrlPacket::new(elevator, aileron, rudder, throttle))?;
        log::debug!(
            "controls sent: elevator={:.3} aileron={:.3} rudder={:.3} throttle={:.3}",
            elevator, aileron, rudder, throttle
        );
        Ok(())
    }
}

impl Drop for XPlaneConnect {
    fn drop(&mut self) {
        log::info!("X-Plane link to {} closed", self.target);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
