//! Minimal HTTP/1.1 server imitating the release tree for integration tests.
//!
//! Serves a fixed table of paths; anything else is a 404. Every request is
//! recorded as `"METHOD /path"` so tests can assert what was (not) fetched.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct ServerOptions {
    /// If false, HEAD returns 405 (simulates servers that block HEAD).
    pub head_allowed: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self { head_allowed: true }
    }
}

/// Path → (status, body).
#[derive(Debug, Clone, Default)]
pub struct Routes(HashMap<String, (u16, String)>);

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, path: &str, status: u16, body: &str) -> Self {
        self.0.insert(path.to_string(), (status, body.to_string()));
        self
    }

    /// Release index plus the three checksum files of `version`. Hashes are
    /// `{platform}-{version}` so tests can tell them apart.
    pub fn release(self, version: &str) -> Self {
        let files = [
            ("darwin-x86_64", format!("bazel-{}-installer-darwin-x86_64.sh", version)),
            ("linux-x86_64", format!("bazel-{}-installer-linux-x86_64.sh", version)),
            ("windows-x86_64", format!("bazel-{}-windows-x86_64.zip", version)),
        ];
        let mut routes = self.add(&format!("/{}/release/index.html", version), 200, "<html/>");
        for (platform, file) in files {
            let body = format!("{}-{}  {}\n", platform, version, file);
            routes = routes.add(&format!("/{}/release/{}.sha256", version, file), 200, &body);
        }
        routes
    }
}

pub struct ReleaseServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ReleaseServer {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. The server runs until the
/// process exits.
pub fn start(routes: Routes) -> ReleaseServer {
    start_with_options(routes, ServerOptions::default())
}

pub fn start_with_options(routes: Routes, opts: ServerOptions) -> ReleaseServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &routes, &log, opts));
        }
    });
    ReleaseServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &Routes,
    log: &Mutex<Vec<String>>,
    opts: ServerOptions,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut first = request.lines().next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("").to_string();
    let path = first.next().unwrap_or("/").to_string();
    log.lock().unwrap().push(format!("{} {}", method, path));

    let is_head = method.eq_ignore_ascii_case("HEAD");
    let (status, body) = if is_head && !opts.head_allowed {
        (405, String::new())
    } else if is_head || method.eq_ignore_ascii_case("GET") {
        routes
            .0
            .get(&path)
            .cloned()
            .unwrap_or((404, "not found".to_string()))
    } else {
        (405, String::new())
    };

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    if !is_head {
        let _ = stream.write_all(body.as_bytes());
    }
}
