//! # Network Block Model
//!
//! A [`NetworkBlock`] is an address plus a prefix length. Its [`Hosts`] iterator
//! walks every address of the block in ascending network order, network and
//! broadcast addresses included, without materializing the range.

use std::fmt;
use std::iter::FusedIterator;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use pnet::ipnetwork::IpNetwork;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkBlock {
    addr: IpAddr,
    prefix: u8,
}

impl NetworkBlock {
    /// Builds a block, rejecting prefixes that are too long for the address family.
    pub fn new(addr: IpAddr, prefix: u8) -> Result<Self> {
        let network = IpNetwork::new(addr, prefix).map_err(|e| Error::InvalidBlock {
            input: format!("{addr}/{prefix}"),
            reason: e.to_string(),
        })?;

        Ok(Self {
            addr: network.ip(),
            prefix: network.prefix(),
        })
    }

    /// A block holding exactly one host (`/32` or `/128`).
    pub fn host(addr: IpAddr) -> Self {
        Self {
            addr,
            prefix: family_bits(&addr),
        }
    }

    /// Number of addresses in the block, `2^(bits - prefix)`.
    ///
    /// Saturates at `u128::MAX` for `::/0`, the only block whose size does not fit.
    pub fn size(&self) -> u128 {
        1u128.checked_shl(self.host_bits()).unwrap_or(u128::MAX)
    }

    pub fn hosts(&self) -> Hosts {
        let network = to_bits(&self.addr) & !self.host_mask();
        Hosts {
            next: Some(network),
            last: network | self.host_mask(),
            ipv6: self.is_ipv6(),
        }
    }

    fn is_ipv6(&self) -> bool {
        self.addr.is_ipv6()
    }

    fn host_bits(&self) -> u32 {
        u32::from(family_bits(&self.addr) - self.prefix)
    }

    fn host_mask(&self) -> u128 {
        match self.host_bits() {
            128 => u128::MAX,
            bits => (1u128 << bits) - 1,
        }
    }
}

impl FromStr for NetworkBlock {
    type Err = Error;

    /// Parses CIDR notation like "192.168.1.0/24" or "2001:db8::/120".
    ///
    /// A bare address is accepted as a single-host block.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidBlock {
            input: s.to_string(),
            reason,
        };

        let Some((ip_str, prefix_str)) = s.trim().split_once('/') else {
            let addr = s
                .trim()
                .parse::<IpAddr>()
                .map_err(|e| invalid(e.to_string()))?;
            return Ok(Self::host(addr));
        };

        let addr = ip_str
            .parse::<IpAddr>()
            .map_err(|e| invalid(format!("invalid address '{ip_str}': {e}")))?;
        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|e| invalid(format!("invalid prefix '{prefix_str}': {e}")))?;

        Self::new(addr, prefix).map_err(|e| match e {
            Error::InvalidBlock { reason, .. } => invalid(reason),
            other => other,
        })
    }
}

impl fmt::Display for NetworkBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

/// Lazy ascending walk over a [`NetworkBlock`].
///
/// Stops after the last address of the block instead of wrapping, so the
/// full `0.0.0.0/0` range terminates.
#[derive(Debug, Clone)]
pub struct Hosts {
    next: Option<u128>,
    last: u128,
    ipv6: bool,
}

impl Iterator for Hosts {
    type Item = IpAddr;

    fn next(&mut self) -> Option<IpAddr> {
        let current = self.next?;
        self.next = (current < self.last).then(|| current + 1);
        Some(from_bits(self.ipv6, current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            None => (0, Some(0)),
            Some(current) => {
                let remaining = (self.last - current).checked_add(1);
                match remaining.and_then(|n| usize::try_from(n).ok()) {
                    Some(n) => (n, Some(n)),
                    None => (usize::MAX, None),
                }
            }
        }
    }
}

impl FusedIterator for Hosts {}

fn family_bits(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

fn to_bits(addr: &IpAddr) -> u128 {
    match addr {
        IpAddr::V4(ipv4_addr) => u128::from(u32::from(*ipv4_addr)),
        IpAddr::V6(ipv6_addr) => u128::from(*ipv6_addr),
    }
}

fn from_bits(ipv6: bool, bits: u128) -> IpAddr {
    if ipv6 {
        IpAddr::V6(Ipv6Addr::from(bits))
    } else {
        IpAddr::V4(Ipv4Addr::from(bits as u32))
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
