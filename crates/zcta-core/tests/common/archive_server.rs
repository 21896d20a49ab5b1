//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves one static body for every GET with a fixed status line, and counts
//! the requests it receives so tests can assert that no request was made.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

pub struct ArchiveServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl ArchiveServer {
    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread answering `200 OK` with `body`.
/// The server runs until the process exits.
pub fn start(body: Vec<u8>) -> ArchiveServer {
    start_with_status(body, "200 OK")
}

/// Like `start` but with a custom status line (e.g. "404 Not Found").
pub fn start_with_status(body: Vec<u8>, status: &'static str) -> ArchiveServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            hits_srv.fetch_add(1, Ordering::SeqCst);
            let body = Arc::clone(&body);
            thread::spawn(move || handle(stream, &body, status));
        }
    });
    ArchiveServer {
        url: format!("http://127.0.0.1:{}/tl_2019_us_zcta510.zip", port),
        hits,
    }
}

/// A URL on a port nothing listens on (connection refused).
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/tl_2019_us_zcta510.zip", port)
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], status: &str) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(_) => {}
    }
    let header = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Type: application/zip\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(body);
}
