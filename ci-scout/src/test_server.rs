//! Local HTTP server with canned JSON responses for tests that drive the real
//! GitHub and completion clients.

use octocrab::Octocrab;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

type Handler = dyn Fn(&str, &str) -> (u16, String) + Send + Sync;

/// Answers every request through a handler and records what it received.
pub(crate) struct TestServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    /// Listens on an ephemeral localhost port.
    ///
    /// `handler` maps the method and request target (path plus query) to a
    /// status code and a JSON body.
    pub(crate) async fn start<F>(handler: F) -> Self
    where
        F: Fn(&str, &str) -> (u16, String) + Send + Sync + 'static,
    {
        // Both ring and aws-lc-rs are in the graph; hyper-rustls needs one picked.
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handler: Arc<Handler> = Arc::new(handler);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                tokio::spawn(respond(socket, Arc::clone(&handler), Arc::clone(&recorded)));
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// Root URL, e.g. `http://127.0.0.1:40123`.
    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Raw requests received so far, headers and body included.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// First line of every request, e.g. `GET /rate_limit HTTP/1.1`.
    pub(crate) fn request_lines(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|request| request.lines().next())
            .map(str::to_string)
            .collect()
    }

    /// A GitHub client pointed at this server.
    pub(crate) fn github_client(&self) -> Octocrab {
        Octocrab::builder()
            .personal_token("test-token".to_string())
            .base_uri(self.base_url.as_str())
            .unwrap()
            .build()
            .unwrap()
    }
}

async fn respond(mut socket: TcpStream, handler: Arc<Handler>, requests: Arc<Mutex<Vec<String>>>) {
    let request = read_request(&mut socket).await;
    let mut request_line = request.split_whitespace();
    let (Some(method), Some(target)) = (request_line.next(), request_line.next()) else {
        return;
    };

    let (status, body) = handler(method, target);
    requests.lock().unwrap().push(request.clone());

    let response = format!(
        "HTTP/1.1 {status} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        reason(status),
        body.len()
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        data.extend_from_slice(&chunk[..n]);
        if let Some(end) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&data[..end]).to_ascii_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
