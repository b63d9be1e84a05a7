//! CometBFT `/net_info` response model and decoder.
//!
//! Unknown fields are ignored and missing fields fall back to their zero value, so
//! a response from a newer or older node still decodes. `ConnectionStatus` and its
//! monitors use Go field names on the wire, hence the PascalCase renames. An
//! explicit `null` is treated like a missing field.

use serde::{Deserialize, Deserializer};

/// JSON-RPC envelope returned by `GET /net_info`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NetInfoResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub result: NetInfo,
    pub id: serde_json::Value,
    #[serde(deserialize_with = "null_as_default")]
    pub jsonrpc: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NetInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub listening: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub listeners: Vec<String>,
    /// Peer count as reported by the node (stringified integer).
    #[serde(deserialize_with = "null_as_default")]
    pub n_peers: String,
    #[serde(deserialize_with = "null_as_default")]
    pub peers: Vec<Peer>,
}

/// One connected node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Peer {
    #[serde(deserialize_with = "null_as_default")]
    pub node_info: NodeInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub is_outbound: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub connection_status: ConnectionStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub remote_ip: String,
}

/// Identity a peer advertised during the p2p handshake.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub protocol_version: ProtocolVersion,
    /// Node ID (hex of the node key address).
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Advertised p2p listen address, e.g. `tcp://0.0.0.0:26656` or `0.0.0.0:26656`.
    #[serde(deserialize_with = "null_as_default")]
    pub listen_addr: String,
    /// Chain ID.
    #[serde(deserialize_with = "null_as_default")]
    pub network: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub channels: HexBytes,
    #[serde(deserialize_with = "null_as_default")]
    pub moniker: String,
    #[serde(deserialize_with = "null_as_default")]
    pub other: NodeInfoOther,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProtocolVersion {
    #[serde(deserialize_with = "null_as_default")]
    pub p2p: String,
    #[serde(deserialize_with = "null_as_default")]
    pub block: String,
    #[serde(deserialize_with = "null_as_default")]
    pub app: String,
}

/// Hex-encoded byte string (channel IDs), kept as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct HexBytes(pub String);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeInfoOther {
    #[serde(deserialize_with = "null_as_default")]
    pub tx_index: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rpc_address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ConnectionStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub send_monitor: TransferMonitor,
    #[serde(deserialize_with = "null_as_default")]
    pub recv_monitor: TransferMonitor,
    #[serde(deserialize_with = "null_as_default")]
    pub channels: Vec<ChannelStatus>,
}

/// Snapshot of a flowrate monitor. Every field except `bytes` is informational.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TransferMonitor {
    #[serde(deserialize_with = "null_as_default")]
    pub start: String,
    /// Total bytes transferred, as a decimal string.
    #[serde(deserialize_with = "null_as_default")]
    pub bytes: String,
    #[serde(deserialize_with = "null_as_default")]
    pub samples: String,
    #[serde(deserialize_with = "null_as_default")]
    pub inst_rate: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cur_rate: String,
    #[serde(deserialize_with = "null_as_default")]
    pub avg_rate: String,
    #[serde(deserialize_with = "null_as_default")]
    pub peak_rate: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bytes_rem: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub idle: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time_rem: String,
    /// 0..=100
    #[serde(deserialize_with = "null_as_default")]
    pub progress: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ChannelStatus {
    #[serde(rename = "ID", deserialize_with = "null_as_default")]
    pub id: u8,
    #[serde(deserialize_with = "null_as_default")]
    pub send_queue_capacity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub send_queue_size: String,
    #[serde(deserialize_with = "null_as_default")]
    pub priority: String,
    #[serde(deserialize_with = "null_as_default")]
    pub recently_sent: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a raw `/net_info` body.
pub fn decode_net_info(body: &[u8]) -> Result<NetInfoResponse, DecodeError> {
    Ok(serde_json::from_slice(body)?)
}

/// Body is not valid JSON, or a field has the wrong JSON type.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid net_info JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
      "jsonrpc": "2.0",
      "id": -1,
      "result": {
        "listening": true,
        "listeners": ["Listener(@)"],
        "n_peers": "1",
        "peers": [
          {
            "node_info": {
              "protocol_version": {"p2p": "8", "block": "11", "app": "0"},
              "id": "5576458aef205977e18fd50b274e9b5d9014525a",
              "listen_addr": "tcp://0.0.0.0:26656",
              "network": "cosmoshub-4",
              "version": "0.37.2",
              "channels": "40202122233038606100",
              "moniker": "validator-a",
              "other": {"tx_index": "on", "rpc_address": "tcp://0.0.0.0:26657"}
            },
            "is_outbound": false,
            "connection_status": {
              "Duration": "168901057956119",
              "SendMonitor": {
                "Start": "2019-07-31T14:31:28.66Z",
                "Bytes": "58522",
                "Samples": "10",
                "InstRate": "0",
                "CurRate": "2",
                "AvgRate": "0",
                "PeakRate": "51",
                "BytesRem": "0",
                "Duration": "168901060000000",
                "Idle": "168901040000000",
                "TimeRem": "0",
                "Progress": 0,
                "Active": true
              },
              "RecvMonitor": {"Bytes": "26071", "Active": true},
              "Channels": [
                {"ID": 48, "SendQueueCapacity": "1", "SendQueueSize": "0", "Priority": "5", "RecentlySent": "0"}
              ]
            },
            "remote_ip": "95.179.155.35",
            "extra_field": {"ignored": true}
          }
        ]
      }
    }"#;

    #[test]
    fn decode_full_response() {
        let resp = decode_net_info(SAMPLE.as_bytes()).unwrap();
        assert_eq!(resp.jsonrpc, "2.0");
        assert_eq!(resp.id, serde_json::json!(-1));
        assert!(resp.result.listening);
        assert_eq!(resp.result.n_peers, "1");
        assert_eq!(resp.result.peers.len(), 1);

        let peer = &resp.result.peers[0];
        assert_eq!(peer.remote_ip, "95.179.155.35");
        assert_eq!(peer.node_info.moniker, "validator-a");
        assert_eq!(peer.node_info.protocol_version.block, "11");
        assert_eq!(peer.node_info.channels, HexBytes("40202122233038606100".into()));
        assert_eq!(peer.node_info.other.tx_index, "on");
        assert_eq!(peer.connection_status.send_monitor.bytes, "58522");
        assert_eq!(peer.connection_status.send_monitor.peak_rate, "51");
        assert_eq!(peer.connection_status.recv_monitor.bytes, "26071");
        assert_eq!(peer.connection_status.channels[0].id, 48);
        assert_eq!(peer.connection_status.channels[0].priority, "5");
    }

    #[test]
    fn missing_fields_default() {
        let resp = decode_net_info(br#"{"result": {"peers": [{"remote_ip": "1.2.3.4"}]}}"#).unwrap();
        let peer = &resp.result.peers[0];
        assert_eq!(peer.node_info.id, "");
        assert_eq!(peer.connection_status.send_monitor.bytes, "");
        assert!(peer.connection_status.channels.is_empty());
        assert!(!resp.result.listening);
        assert!(resp.id.is_null());
    }

    #[test]
    fn empty_object_and_null_lists() {
        let resp = decode_net_info(b"{}").unwrap();
        assert!(resp.result.peers.is_empty());
        let resp = decode_net_info(br#"{"result": {"peers": null, "listeners": null}}"#).unwrap();
        assert!(resp.result.peers.is_empty());
        assert!(resp.result.listeners.is_empty());
    }

    #[test]
    fn null_fields_decode_as_zero_values() {
        let resp = decode_net_info(
            br#"{"id": null, "jsonrpc": null, "result": {"listening": null, "n_peers": null, "peers": [
                {"remote_ip": null, "is_outbound": null,
                 "node_info": {"id": "abc", "listen_addr": null, "protocol_version": null, "other": null, "channels": null},
                 "connection_status": {"Duration": null, "SendMonitor": {"Bytes": null, "Progress": null, "Active": null},
                                       "RecvMonitor": null, "Channels": [{"ID": null, "Priority": null}]}},
                {"node_info": null, "connection_status": null}
            ]}}"#,
        )
        .unwrap();
        assert!(resp.id.is_null());
        assert_eq!(resp.jsonrpc, "");
        assert!(!resp.result.listening);
        assert_eq!(resp.result.n_peers, "");

        let peer = &resp.result.peers[0];
        assert_eq!(peer.remote_ip, "");
        assert!(!peer.is_outbound);
        assert_eq!(peer.node_info.id, "abc");
        assert_eq!(peer.node_info.listen_addr, "");
        assert_eq!(peer.node_info.channels, HexBytes::default());
        assert_eq!(peer.connection_status.send_monitor.bytes, "");
        assert_eq!(peer.connection_status.send_monitor.progress, 0);
        assert_eq!(peer.connection_status.recv_monitor.bytes, "");
        assert_eq!(peer.connection_status.channels[0].id, 0);

        let bare = &resp.result.peers[1];
        assert_eq!(bare.node_info.id, "");
        assert!(bare.connection_status.channels.is_empty());

        let resp = decode_net_info(br#"{"result": null}"#).unwrap();
        assert!(resp.result.peers.is_empty());
    }

    #[test]
    fn malformed_json_is_error() {
        assert!(matches!(
            decode_net_info(b"{\"result\": "),
            Err(DecodeError::Json(_))
        ));
        assert!(decode_net_info(b"<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn wrong_type_is_error() {
        assert!(decode_net_info(br#"{"result": {"peers": "none"}}"#).is_err());
    }
}
