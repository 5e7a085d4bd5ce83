//! # Scan Target Model
//!
//! A [`Target`] is one `(address, port)` pair, the unit of concurrent work.
//! The dispatcher builds targets from a [`NetworkBlock`] crossed with a
//! [`PortSet`], address-major.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::network::ports::PortSet;
use crate::network::range::NetworkBlock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    pub addr: IpAddr,
    pub port: u16,
}

impl Target {
    pub fn new(addr: IpAddr, port: u16) -> Self {
        Self { addr, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.addr, self.port)
    }
}

impl fmt::Display for Target {
    /// `addr:port`, with IPv6 addresses bracketed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.socket_addr())
    }
}

/// Lazily pairs every host of `block` with every port of `ports`.
pub fn targets<'a>(block: &NetworkBlock, ports: &'a PortSet) -> impl Iterator<Item = Target> + 'a {
    block
        .hosts()
        .flat_map(move |addr| ports.iter().map(move |port| Target::new(addr, port)))
}

/// Total number of targets, saturating for blocks too large to count.
pub fn target_count(block: &NetworkBlock, ports: &PortSet) -> u128 {
    block.size().saturating_mul(ports.size() as u128)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
