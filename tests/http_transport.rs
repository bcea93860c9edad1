//! HttpTransport against an in-process listener.

use penplot::{HttpTransport, Transport};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::runtime::Handle;

/// Accept one connection, read a full request, answer `status`.
async fn serve_once(listener: TcpListener, status: &'static str) -> String {
    let (mut socket, _) = listener.accept().await.unwrap();
    let mut received = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        received.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&received);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let length = text[..head_end]
                .lines()
                .find_map(|line| {
                    line.to_ascii_lowercase()
                        .strip_prefix("content-length:")
                        .map(|v| v.trim().parse::<usize>().unwrap())
                })
                .unwrap_or(0);
            if received.len() >= head_end + 4 + length {
                break;
            }
        }
    }
    let response = format!("HTTP/1.1 {status}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
    socket.write_all(response.as_bytes()).await.unwrap();
    String::from_utf8(received).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn posts_raw_body() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(serve_once(listener, "200 OK"));

    let transport = HttpTransport::new(Handle::current());
    transport.send(&format!("http://{addr}/print"), "VS50;!ST1,0;PU0,3200;PD;PU;PG;".to_string());
    transport.wait_idle().await;

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /print HTTP/1.1\r\n"), "{request}");
    assert!(request.to_ascii_lowercase().contains("content-type: text/plain"));
    assert!(request.ends_with("\r\n\r\nVS50;!ST1,0;PU0,3200;PD;PU;PG;"), "{request}");
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_post_is_not_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(serve_once(listener, "503 Service Unavailable"));

    let transport = HttpTransport::current().unwrap();
    transport.send(&format!("http://{addr}/print"), "PG;".to_string());
    transport.wait_idle().await;

    assert!(server.await.unwrap().ends_with("PG;"));
}

#[tokio::test(flavor = "multi_thread")]
async fn wait_idle_without_requests_returns() {
    let transport = HttpTransport::new(Handle::current());
    transport.wait_idle().await;
}
