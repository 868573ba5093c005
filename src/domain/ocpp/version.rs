//! OCPP protocol version negotiated over the WebSocket subprotocol header.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two OCPP-J protocol revisions this runtime speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OcppVersion {
    /// OCPP 1.6 (JSON / OCPP-J).
    V16,
    /// OCPP 2.0.1.
    V201,
}

impl OcppVersion {
    /// WebSocket subprotocol identifier, as advertised in `Sec-WebSocket-Protocol`.
    pub fn subprotocol(&self) -> &'static str {
        match self {
            Self::V16 => "ocpp1.6",
            Self::V201 => "ocpp2.0.1",
        }
    }

    pub fn from_subprotocol(s: &str) -> Option<Self> {
        match s.trim() {
            "ocpp1.6" => Some(Self::V16),
            "ocpp2.0.1" => Some(Self::V201),
            _ => None,
        }
    }

    /// Supported versions, newest first — used to prefer the highest mutual
    /// match during negotiation.
    pub const ALL: &'static [OcppVersion] = &[Self::V201, Self::V16];

    pub fn version_string(&self) -> &'static str {
        match self {
            Self::V16 => "1.6",
            Self::V201 => "2.0.1",
        }
    }
}

impl fmt::Display for OcppVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OCPP {}", self.version_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subprotocol_roundtrip() {
        for v in OcppVersion::ALL {
            assert_eq!(OcppVersion::from_subprotocol(v.subprotocol()), Some(*v));
        }
    }

    #[test]
    fn unknown_subprotocol_is_none() {
        assert_eq!(OcppVersion::from_subprotocol("ocpp2.1"), None);
    }
}
