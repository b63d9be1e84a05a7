//! One-shot loopback HTTP server for tests. Shared with `tests/cli.rs`.

use std::thread::JoinHandle;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Serve one `200 OK` response with `body` on a loopback port.
/// Returns the `host:port` to query; the handle yields the request path.
pub fn serve_once(body: String) -> (String, JoinHandle<String>) {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    std_listener.set_nonblocking(true).unwrap();
    let host = std_listener.local_addr().unwrap().to_string();
    let handle = std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let path = loop {
                let mut chunk = [0u8; 4096];
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "client closed before sending a request");
                buf.extend_from_slice(&chunk[..n]);
                let mut headers = [httparse::EMPTY_HEADER; 32];
                let mut req = httparse::Request::new(&mut headers);
                if req.parse(&buf).unwrap().is_complete() {
                    assert_eq!(req.method, Some("GET"));
                    break req.path.unwrap().to_string();
                }
            };
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).await.unwrap();
            stream.write_all(body.as_bytes()).await.unwrap();
            stream.flush().await.unwrap();
            path
        })
    });
    (host, handle)
}

/// A peer entry in `/net_info` shape.
pub fn peer_json(id: &str, listen: &str, ip: &str, sent: &str, recv: &str) -> String {
    format!(
        r#"{{"node_info":{{"id":"{id}","listen_addr":"{listen}","network":"testnet-1","moniker":"m-{id}"}},
           "is_outbound":true,
           "connection_status":{{"SendMonitor":{{"Bytes":"{sent}"}},"RecvMonitor":{{"Bytes":"{recv}"}}}},
           "remote_ip":"{ip}"}}"#
    )
}

/// A full `/net_info` envelope around `peers`.
pub fn net_info_json(peers: &[String]) -> String {
    format!(
        r#"{{"jsonrpc":"2.0","id":-1,"result":{{"listening":true,"listeners":[],"n_peers":"{}","peers":[{}]}}}}"#,
        peers.len(),
        peers.join(",")
    )
}
