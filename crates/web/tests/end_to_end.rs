use std::net::SocketAddr;
use std::sync::Arc;

use plain_http::client::fetch;
use plain_http::protocol::RequestMessage;
use plain_http::server::{Dispatcher, DispatcherConfig};
use plain_web::{ServerConfig, StaticFiles, download};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

const PAGE: &[u8] = b"<html><body>hello</body></html>";

/// Starts a server for a fresh root directory on an ephemeral loopback port.
async fn start() -> (TempDir, SocketAddr, JoinHandle<()>) {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("index.html"), PAGE).unwrap();
    std::fs::create_dir(root.path().join("files")).unwrap();
    std::fs::write(root.path().join("files").join("large.bin"), vec![7u8; 10_000]).unwrap();

    let dispatcher = Dispatcher::bind(&[SocketAddr::from(([127, 0, 0, 1], 0))], DispatcherConfig::default()).unwrap();
    let addr = dispatcher.local_addrs()[0];

    let config = ServerConfig::new("127.0.0.1", addr.port(), root.path()).unwrap();
    let handler = Arc::new(StaticFiles::new(Arc::new(config)));
    let server = tokio::spawn(dispatcher.run(handler));

    (root, addr, server)
}

async fn raw(addr: SocketAddr, wire: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(wire).await.unwrap();
    let mut received = Vec::new();
    stream.read_to_end(&mut received).await.unwrap();
    received
}

#[tokio::test]
async fn get_index_html() {
    let (_root, addr, server) = start().await;

    let request = RequestMessage::get("/index.html", format!("127.0.0.1:{}", addr.port()));
    let download = fetch(addr, request).await.unwrap();

    assert!(download.is_success());
    let response = download.response();
    assert_eq!(response.version(), "HTTP/1.0");
    assert_eq!(response.headers().get("Content-Length"), PAGE.len().to_string());
    assert_eq!(response.headers().get("Connection"), "close");
    assert_eq!(&response.body()[..], PAGE);

    server.abort();
}

#[tokio::test]
async fn wrong_host_is_400() {
    let (_root, addr, server) = start().await;

    let received = raw(addr, b"GET /index.html HTTP/1.0\r\nHost: example.com\r\n\r\n").await;
    assert_eq!(received, b"HTTP/1.0 400\r\nConnection: close\r\n\r\n");

    server.abort();
}

#[tokio::test]
async fn post_is_501() {
    let (_root, addr, server) = start().await;

    let received = raw(addr, b"POST /index.html HTTP/1.0\r\nHost: 127.0.0.1\r\n\r\n").await;
    assert_eq!(received, b"HTTP/1.0 501\r\nConnection: close\r\n\r\n");

    server.abort();
}

#[tokio::test]
async fn request_without_headers_is_400() {
    let (_root, addr, server) = start().await;

    let received = raw(addr, b"GET /index.html HTTP/1.0\r\n\r\n").await;
    assert_eq!(received, b"HTTP/1.0 400\r\n\r\n");

    server.abort();
}

#[tokio::test]
async fn download_writes_files() {
    let (_root, addr, server) = start().await;
    let output = tempfile::tempdir().unwrap();

    let index = download(&format!("http://127.0.0.1:{}/", addr.port()), output.path()).await.unwrap();
    assert_eq!(index, output.path().join("index.html"));
    assert_eq!(std::fs::read(&index).unwrap(), PAGE);

    let large = download(&format!("127.0.0.1:{}/files/large.bin", addr.port()), output.path()).await.unwrap();
    assert_eq!(std::fs::read(&large).unwrap(), vec![7u8; 10_000]);

    server.abort();
}

#[tokio::test]
async fn download_of_missing_file_writes_nothing() {
    let (_root, addr, server) = start().await;
    let output = tempfile::tempdir().unwrap();

    let result = download(&format!("127.0.0.1:{}/missing.html", addr.port()), output.path()).await;

    assert!(matches!(result, Err(plain_web::DownloadError::Status { ref status, .. }) if status == "404"));
    assert!(!output.path().join("missing.html").exists());

    server.abort();
}
