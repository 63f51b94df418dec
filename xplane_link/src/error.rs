use std::fmt;

#[derive(Debug)]
pub enum LinkError {
    Io(std::io::Error),
    /// The configured host did not resolve to any address.
    Resolve(String),
    /// The socket accepted fewer bytes than the datagram holds.
    ShortWrite { sent: usize, expected: usize },
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Io(err) => write!(f, "io error: {err}"),
            LinkError::Resolve(host) => write!(f, "cannot resolve simulator address {host}"),
            LinkError::ShortWrite { sent, expected } => {
                write!(f, "short write: sent {sent} of {expected} bytes")
            }
        }
    }
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LinkError {
    fn from(err: std::io::Error) -> Self {
        LinkError::Io(err)
    }
}
