//! In-process HTTP server that replays queued responses and records requests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use cloudant_client::{ClientBuilder, CouchClient};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query exactly as sent on the request line.
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

type Shared<T> = Arc<Mutex<T>>;

pub struct MockWebServer {
    addr: SocketAddr,
    responses: Shared<VecDeque<MockResponse>>,
    requests: Shared<Vec<RecordedRequest>>,
    accept_loop: JoinHandle<()>,
}

impl MockWebServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        let responses: Shared<VecDeque<MockResponse>> = Arc::default();
        let requests: Shared<Vec<RecordedRequest>> = Arc::default();

        let accept_loop = {
            let responses = Arc::clone(&responses);
            let requests = Arc::clone(&requests);
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    let responses = Arc::clone(&responses);
                    let requests = Arc::clone(&requests);
                    tokio::spawn(async move {
                        let _ = serve_one(stream, responses, requests).await;
                    });
                }
            })
        };

        Self {
            addr,
            responses,
            requests,
            accept_loop,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> CouchClient {
        ClientBuilder::url(&self.url())
            .expect("mock url")
            .build()
            .expect("client")
    }

    pub fn enqueue(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Removes and returns the oldest recorded request.
    pub fn take_request(&self) -> RecordedRequest {
        let mut requests = self.requests.lock().unwrap();
        assert!(!requests.is_empty(), "no request was recorded");
        requests.remove(0)
    }
}

impl Drop for MockWebServer {
    fn drop(&mut self) {
        self.accept_loop.abort();
    }
}

async fn serve_one(
    stream: TcpStream,
    responses: Shared<VecDeque<MockResponse>>,
    requests: Shared<Vec<RecordedRequest>>,
) -> std::io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).await? == 0 {
        return Ok(());
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).await?;

    requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let response = responses.lock().unwrap().pop_front().unwrap_or_else(|| {
        MockResponse::new(500, r#"{"error":"mock","reason":"no response queued"}"#)
    });

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason_phrase(response.status),
        response.body.len()
    );
    write_half.write_all(head.as_bytes()).await?;
    if method != "HEAD" {
        write_half.write_all(response.body.as_bytes()).await?;
    }
    write_half.flush().await?;
    write_half.shutdown().await
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        409 => "Conflict",
        412 => "Precondition Failed",
        429 => "Too Many Requests",
        _ => "Internal Server Error",
    }
}
