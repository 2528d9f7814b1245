//! Minimal HTTP stub standing in for the classification endpoint.

use std::{
    io::{Read, Write},
    net::TcpListener,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

/// Records what the client sent while serving canned responses.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Vec<u8>>>,
}

impl StubServer {
    /// Spawn a server answering every request with `status` and `body`,
    /// waiting `delay` before responding.
    pub fn spawn(status: u16, body: &str, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(AtomicUsize::new(0));
        let last_request = Arc::new(Mutex::new(Vec::new()));

        let response = format!(
            "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            reason(status),
            body.len(),
        );
        let thread_requests = requests.clone();
        let thread_last = last_request.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else {
                    break;
                };
                let request = read_request(&mut stream);
                thread_requests.fetch_add(1, Ordering::SeqCst);
                *thread_last.lock().unwrap() = request;
                thread::sleep(delay);
                let _ = stream.write_all(response.as_bytes());
            }
        });

        Self {
            base_url,
            requests,
            last_request,
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Vec<u8> {
        self.last_request.lock().unwrap().clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Read headers plus a Content-Length body.
fn read_request(stream: &mut std::net::TcpStream) -> Vec<u8> {
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(read) => {
                request.extend_from_slice(&buf[..read]);
                if request_complete(&request) {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    request
}

fn request_complete(request: &[u8]) -> bool {
    let Some(header_end) = request.windows(4).position(|window| window == b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&request[..header_end]);
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("Content-Length: "))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= header_end + 4 + content_length
}
