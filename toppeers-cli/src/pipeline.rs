//! fetch → decode → rank → format → write, once.

use std::path::PathBuf;

use toppeers_core::{decode_net_info, format_peer_list, peer_address, top_peers, DecodeError};

use crate::config::Config;
use crate::fetch::{fetch_net_info, net_info_url, FetchError};
use crate::output::write_peer_list;

/// Any of these aborts the run before (or while) the output file is written.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("error writing result file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What was selected and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerSummary {
    pub remote_ip: String,
    pub total_bytes: i64,
    pub moniker: String,
    pub network: String,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub peers: Vec<PeerSummary>,
    pub output: PathBuf,
    pub contents: String,
}

/// Run the whole export against `cfg.host`, writing `cfg.output`.
/// Nothing is written unless fetch and decode both succeed.
pub fn run_pipeline(cfg: &Config) -> Result<PipelineReport, PipelineError> {
    let url = net_info_url(&cfg.host);
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(PipelineError::Runtime)?;
    let body = rt.block_on(fetch_net_info(&url, cfg.timeout()))?;
    drop(rt);

    let net_info = decode_net_info(&body)?;
    let ranked = top_peers(&net_info.result.peers, cfg.top_n);

    log::info!("Top {} peers by bytes transferred:", ranked.len());
    let mut peers = Vec::with_capacity(ranked.len());
    for r in &ranked {
        if r.sent.is_defaulted() || r.received.is_defaulted() {
            log::debug!(
                "peer {}: unparsable byte count (sent {:?}, received {:?}), counted as 0",
                r.peer.remote_ip,
                r.peer.connection_status.send_monitor.bytes,
                r.peer.connection_status.recv_monitor.bytes,
            );
        }
        log::info!(
            "Peer: {}, TotalBytes: {}, Moniker: {}, Network: {}",
            r.peer.remote_ip,
            r.total_bytes,
            r.peer.node_info.moniker,
            r.peer.node_info.network,
        );
        peers.push(PeerSummary {
            remote_ip: r.peer.remote_ip.clone(),
            total_bytes: r.total_bytes,
            moniker: r.peer.node_info.moniker.clone(),
            network: r.peer.node_info.network.clone(),
            address: peer_address(r.peer),
        });
    }

    let contents = format_peer_list(&ranked);
    write_peer_list(&cfg.output, &contents).map_err(|source| PipelineError::Write {
        path: cfg.output.clone(),
        source,
    })?;
    Ok(PipelineReport {
        peers,
        output: cfg.output.clone(),
        contents,
    })
}
