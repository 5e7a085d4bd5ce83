//! # Signature Prober
//!
//! Fingerprints an open endpoint over HTTP. Four candidate URIs are tried in a
//! fixed order and probing stops at the first request that completes: if that
//! body carries no signature the endpoint is reported as unrecognized and the
//! remaining candidates are skipped.

use std::net::SocketAddr;

use k8scan_common::finding::ProbeOutcome;
use tracing::debug;

use crate::network::http::HttpFetcher;

/// Pairs of substrings; a body containing both halves of any pair is a match.
///
/// `"serverAddress` is kept verbatim, missing closing quote included. Like every
/// needle it is lower-cased before matching, see [`matches_signature`].
const SIGNATURES: [(&str, &str); 3] = [
    ("kubernetes", "dashboard"),
    (r#""versions""#, r#""serverAddress"#),
    (r#""paths""#, r#""/api""#),
];

/// Candidate URIs in probing order.
pub fn candidate_uris(addr: SocketAddr) -> [String; 4] {
    [
        format!("http://{addr}"),
        format!("https://{addr}"),
        format!("http://{addr}/api/"),
        format!("https://{addr}/api/"),
    ]
}

/// Checks a response body against every known signature.
///
/// The body is lower-cased before matching and so are the needles, otherwise
/// the mixed-case `"serverAddress` needle could never hit.
pub fn matches_signature(body: &str) -> bool {
    let body = body.to_lowercase();
    SIGNATURES.iter().any(|(first, second)| {
        body.contains(&first.to_lowercase()) && body.contains(&second.to_lowercase())
    })
}

pub struct SignatureProber {
    fetcher: Box<dyn HttpFetcher>,
}

impl SignatureProber {
    pub fn new(fetcher: Box<dyn HttpFetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn classify(&self, addr: SocketAddr) -> ProbeOutcome {
        self.classify_candidates(&candidate_uris(addr)).await
    }

    /// Walks `candidates` in order and classifies the first body received.
    pub async fn classify_candidates(&self, candidates: &[String]) -> ProbeOutcome {
        for uri in candidates {
            match self.fetcher.get(uri).await {
                Ok(body) if matches_signature(&body) => {
                    return ProbeOutcome::Match { uri: uri.clone() };
                }
                Ok(_) => return ProbeOutcome::NoSignature,
                Err(e) => debug!("getting {uri} failed: {e:#}"),
            }
        }

        ProbeOutcome::NoResponse
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
