//! Peer ranking for CometBFT `/net_info` responses.
//! No I/O: the host fetches the body, passes it in and persists the formatted list.

pub mod address;
pub mod byte_count;
pub mod net_info;
pub mod rank;

pub use address::{format_peer_list, peer_address};
pub use byte_count::ByteCount;
pub use net_info::{decode_net_info, DecodeError, NetInfoResponse, Peer};
pub use rank::{rank_peers, top_peers, RankedPeer, DEFAULT_TOP_N};
