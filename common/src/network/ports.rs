//! # Port Set
//!
//! Resolves a port list such as `80-82,443,8001` into the ordered
//! list of ports the dispatcher pairs with every address.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Ports scanned when the port list is empty.
pub const DEFAULT_PORTS: [u16; 4] = [80, 443, 8001, 9001];

/// Resolved ports in input order, ranges expanded ascending.
///
/// Duplicates are kept: `"80,80"` scans port 80 twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSet {
    ports: Vec<u16>,
}

impl PortSet {
    pub fn new(ports: Vec<u16>) -> Self {
        Self { ports }
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + Clone + '_ {
        self.ports.iter().copied()
    }

    pub fn size(&self) -> usize {
        self.ports.len()
    }
}

impl Default for PortSet {
    fn default() -> Self {
        Self::new(DEFAULT_PORTS.to_vec())
    }
}

impl FromStr for PortSet {
    type Err = Error;

    /// Parses comma-separated ports and inclusive `begin-end` ranges.
    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut ports: Vec<u16> = Vec::new();
        for token in s.split(',') {
            let token = token.trim();

            let Some((begin, end)) = token.split_once('-') else {
                ports.push(parse_port(token)?);
                continue;
            };

            let begin = parse_port(begin)?;
            let end = parse_port(end)?;
            if begin > end {
                return Err(Error::ReversedRange { begin, end });
            }
            ports.extend(begin..=end);
        }

        Ok(Self { ports })
    }
}

impl fmt::Display for PortSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.ports.iter().map(u16::to_string).collect();
        write!(f, "{}", joined.join(","))
    }
}

fn parse_port(token: &str) -> Result<u16> {
    let token = token.trim();
    token.parse::<u16>().map_err(|source| Error::InvalidPort {
        token: token.to_string(),
        source,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
