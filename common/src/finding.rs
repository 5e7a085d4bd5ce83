//! # Probe Results
//!
//! [`ProbeOutcome`] is what signature probing concludes about one target.
//! A positive outcome becomes a [`Finding`] once ownership data is attached.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Result of probing one endpoint for a dashboard signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Every candidate request failed at the transport level.
    NoResponse,
    /// A request succeeded but its body carries no known signature.
    NoSignature,
    /// The body at `uri` matched a signature.
    Match { uri: String },
}

impl ProbeOutcome {
    pub fn into_uri(self) -> Option<String> {
        match self {
            ProbeOutcome::Match { uri } => Some(uri),
            _ => None,
        }
    }
}

/// Registry ownership data for an address. Empty fields mean unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipInfo {
    pub handle: String,
    pub name: String,
    pub reference: String,
}

/// A confirmed detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub addr: IpAddr,
    pub port: u16,
    pub uri: String,
    pub owner: OwnershipInfo,
}

impl Finding {
    pub fn new(addr: IpAddr, port: u16, uri: String, owner: OwnershipInfo) -> Self {
        Self {
            addr,
            port,
            uri,
            owner,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.addr, self.port)
    }
}

impl fmt::Display for Finding {
    /// The report line: `addr:port<TAB>handle<TAB>name<TAB>reference`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.socket_addr(),
            self.owner.handle,
            self.owner.name,
            self.owner.reference
        )
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
