//! End-to-end tests: a real server on an ephemeral loopback port, driven
//! through hyper's client connection API.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::{Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use simple_web_server::{Config, Server, ServerError};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct Reply {
    status: StatusCode,
    content_type: Option<String>,
    body: Bytes,
}

struct Running {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

fn test_config(root: &Path, confine: bool) -> Config {
    let scratch = tempfile::tempdir().unwrap();
    let mut config = Config::load_from(scratch.path().join("none").to_str().unwrap()).unwrap();
    config.server.port = 0;
    config.files.root = root.to_string_lossy().into_owned();
    config.files.confine_to_root = confine;
    config.performance.shutdown_grace = 1;
    config
}

fn start(root: &Path, confine: bool) -> Running {
    let server = Server::bind(&test_config(root, confine)).unwrap();
    let addr = server.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve(async move {
        let _ = stopped.await;
    }));
    Running { addr, stop, handle }
}

async fn send(addr: SocketAddr, method: Method, path: &str) -> Reply {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .unwrap();
    tokio::spawn(conn);

    let req = Request::builder()
        .method(method)
        .uri(path)
        .header("Host", addr.to_string())
        .body(Empty::<Bytes>::new())
        .unwrap();
    let resp = sender.send_request(req).await.unwrap();

    let status = resp.status();
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    Reply {
        status,
        content_type,
        body,
    }
}

async fn get(addr: SocketAddr, path: &str) -> Reply {
    send(addr, Method::GET, path).await
}

/// `<tmp>/www` is the serving root; `<tmp>/secret.txt` sits one level above it
fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("www");
    std::fs::create_dir_all(root.join("docs")).unwrap();
    std::fs::write(root.join("foo.txt"), "hello").unwrap();
    std::fs::write(root.join("docs/index.html"), "<h1>docs</h1>").unwrap();
    std::fs::write(dir.path().join("secret.txt"), "top secret").unwrap();
    dir
}

#[tokio::test]
async fn serves_existing_file() {
    let dir = fixture();
    let server = start(&dir.path().join("www"), false);

    let reply = get(server.addr, "/foo.txt").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type.as_deref(), Some("text/html"));
    assert_eq!(reply.body, Bytes::from("hello"));

    let reply = get(server.addr, "/docs/index.html").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, Bytes::from("<h1>docs</h1>"));
}

#[tokio::test]
async fn missing_file_is_404_naming_the_path() {
    let dir = fixture();
    let server = start(&dir.path().join("www"), false);

    let reply = get(server.addr, "/does-not-exist.txt").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.content_type.as_deref(), Some("text/html"));
    let body = String::from_utf8(reply.body.to_vec()).unwrap();
    assert!(body.contains("does-not-exist.txt"), "body: {body}");
    assert!(!body.contains("/does-not-exist.txt"), "body: {body}");
}

#[tokio::test]
async fn root_and_directories_are_404() {
    let dir = fixture();
    let server = start(&dir.path().join("www"), false);

    assert_eq!(get(server.addr, "/").await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(server.addr, "/docs").await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(server.addr, "/docs/").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let dir = fixture();
    let server = start(&dir.path().join("www"), false);

    for path in ["/foo.txt", "/nope.txt"] {
        let first = get(server.addr, path).await;
        let second = get(server.addr, path).await;
        assert_eq!(first.status, second.status);
        assert_eq!(first.content_type, second.content_type);
        assert_eq!(first.body, second.body);
    }
}

#[tokio::test]
async fn query_is_ignored_and_any_method_reads() {
    let dir = fixture();
    let server = start(&dir.path().join("www"), false);

    let reply = get(server.addr, "/foo.txt?cache=bust").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, Bytes::from("hello"));

    let reply = send(server.addr, Method::POST, "/foo.txt").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, Bytes::from("hello"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn large_and_small_reads_do_not_interfere() {
    let dir = fixture();
    let root = dir.path().join("www");
    let large: Vec<u8> = (0..8 * 1024 * 1024).map(|i| (i % 251) as u8).collect();
    std::fs::write(root.join("large.bin"), &large).unwrap();
    let server = start(&root, false);

    let (big, small) = tokio::join!(get(server.addr, "/large.bin"), get(server.addr, "/foo.txt"));

    assert_eq!(big.status, StatusCode::OK);
    assert_eq!(big.body.len(), large.len());
    assert_eq!(big.body.as_ref(), large.as_slice());
    assert_eq!(small.status, StatusCode::OK);
    assert_eq!(small.body, Bytes::from("hello"));
}

#[tokio::test]
async fn stalled_client_does_not_block_others() {
    let dir = fixture();
    let server = start(&dir.path().join("www"), false);

    // Half a request line, never finished
    let mut stalled = TcpStream::connect(server.addr).await.unwrap();
    stalled.write_all(b"GET /foo.t").await.unwrap();

    let reply = tokio::time::timeout(Duration::from_secs(5), get(server.addr, "/foo.txt"))
        .await
        .expect("request behind a stalled connection timed out");
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, Bytes::from("hello"));
}

#[tokio::test]
async fn traversal_reaches_parent_by_default() {
    let dir = fixture();
    let server = start(&dir.path().join("www"), false);

    let reply = get(server.addr, "/../secret.txt").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, Bytes::from("top secret"));
}

#[tokio::test]
async fn traversal_is_404_when_confined() {
    let dir = fixture();
    let server = start(&dir.path().join("www"), true);

    let reply = get(server.addr, "/../secret.txt").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body, Bytes::from("ERROR: Cannot find '../secret.txt'."));

    let reply = get(server.addr, "/foo.txt").await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn bind_fails_when_port_is_taken() {
    let dir = fixture();
    let server = start(&dir.path().join("www"), false);

    let mut config = test_config(&dir.path().join("www"), false);
    config.server.port = server.addr.port();
    match Server::bind(&config) {
        Err(ServerError::Bind { addr, .. }) => assert_eq!(addr, server.addr),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("second bind on {} succeeded", server.addr),
    }
}

#[tokio::test]
async fn shutdown_closes_listener() {
    let dir = fixture();
    let server = start(&dir.path().join("www"), false);
    assert_eq!(get(server.addr, "/foo.txt").await.status, StatusCode::OK);

    server.stop.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop")
        .unwrap();

    assert!(TcpStream::connect(server.addr).await.is_err());
}
