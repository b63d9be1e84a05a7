//! `persistent_peers`-style address list: `id@host:port,id@host:port`.

use crate::net_info::Peer;
use crate::rank::RankedPeer;

/// Bind-any host that nodes commonly advertise instead of a reachable address.
pub const WILDCARD_HOST: &str = "0.0.0.0";

/// Separator between peer addresses in the output list.
pub const SEPARATOR: &str = ",";

/// `<id>@<listen_addr>` with every `0.0.0.0` in the listen address replaced by the
/// peer's remote IP. Other bind addresses (e.g. `::`) are left as advertised.
pub fn peer_address(peer: &Peer) -> String {
    let listen_addr = peer
        .node_info
        .listen_addr
        .replace(WILDCARD_HOST, &peer.remote_ip);
    format!("{}@{}", peer.node_info.id, listen_addr)
}

/// Join the addresses of `ranked` in order. No trailing separator or newline.
pub fn format_peer_list(ranked: &[RankedPeer<'_>]) -> String {
    ranked
        .iter()
        .map(|r| peer_address(r.peer))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}
