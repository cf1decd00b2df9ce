use alloy_primitives::Address;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

static TEMP_DIRS: AtomicUsize = AtomicUsize::new(0);

/// Fresh, empty directory under the system temp dir
pub fn temp_dir(name: &str) -> PathBuf {
    let id = TEMP_DIRS.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("aave-tokenlist-{}-{}-{}", std::process::id(), name, id));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// 32 byte ABI word holding an unsigned integer
pub fn uint_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// 32 byte ABI word holding a left-padded address
pub fn address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_slice());
    word
}

/// ABI encoding of a single `string` return value
pub fn encode_string_return(value: &str) -> Vec<u8> {
    let mut encoded = Vec::new();
    encoded.extend_from_slice(&uint_word(32));
    encoded.extend_from_slice(&uint_word(value.len() as u64));
    encoded.extend_from_slice(value.as_bytes());
    encoded.resize(64 + value.len().div_ceil(32) * 32, 0);
    encoded
}

/// JSON-RPC success body carrying `data` as the call result
pub fn rpc_result(data: &[u8]) -> String {
    serde_json::json!({ "jsonrpc": "2.0", "id": 1, "result": format!("0x{}", hex::encode(data)) }).to_string()
}

/// Accept a single HTTP request on a local port and answer it with `status` and a JSON `body`.
/// The handle resolves to the raw request text.
pub async fn serve_once(status: u16, body: String) -> (String, JoinHandle<String>) {
    let (url, requests) = serve_sequence(vec![(status, body)]).await;
    let handle = tokio::spawn(async move { requests.await.unwrap().remove(0) });
    (url, handle)
}

/// Answer consecutive HTTP requests with the scripted `(status, body)` responses, one connection each.
/// The handle resolves to the raw requests in arrival order.
pub async fn serve_sequence(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut requests = Vec::with_capacity(responses.len());
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut stream).await);

            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                if status < 400 { "OK" } else { "Error" },
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
        }
        requests
    });

    (url, handle)
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}
