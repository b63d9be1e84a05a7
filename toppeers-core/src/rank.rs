//! Rank peers by total bytes transferred (send + receive).

use crate::byte_count::ByteCount;
use crate::net_info::Peer;

/// Default number of peers to keep.
pub const DEFAULT_TOP_N: usize = 5;

/// A peer together with its parsed transfer counters.
#[derive(Debug, Clone)]
pub struct RankedPeer<'a> {
    pub peer: &'a Peer,
    pub sent: ByteCount,
    pub received: ByteCount,
    pub total_bytes: i64,
}

impl<'a> RankedPeer<'a> {
    pub fn new(peer: &'a Peer) -> Self {
        let sent = ByteCount::parse(&peer.connection_status.send_monitor.bytes);
        let received = ByteCount::parse(&peer.connection_status.recv_monitor.bytes);
        let total_bytes = sent.value().saturating_add(received.value());
        Self {
            peer,
            sent,
            received,
            total_bytes,
        }
    }
}

/// All peers sorted by total bytes, highest first. Equal totals keep input order.
pub fn rank_peers(peers: &[Peer]) -> Vec<RankedPeer<'_>> {
    let mut ranked: Vec<RankedPeer<'_>> = peers.iter().map(RankedPeer::new).collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.total_bytes.cmp(&a.total_bytes));
    ranked
}

/// The first `min(top_n, peers.len())` entries of [`rank_peers`].
pub fn top_peers(peers: &[Peer], top_n: usize) -> Vec<RankedPeer<'_>> {
    let mut ranked = rank_peers(peers);
    ranked.truncate(top_n);
    ranked
}
