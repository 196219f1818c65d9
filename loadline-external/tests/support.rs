//! Minimal HTTP stub standing in for the remote optimiser.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// How the stub answers each connection.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with `status` and a JSON `body`.
    Json {
        /// HTTP status code to send.
        status: u16,
        /// JSON response body.
        body: String,
    },
    /// Read the request, then hold the connection open without answering.
    Silent(Duration),
}

/// A one-thread HTTP server answering every request the same way.
#[derive(Debug)]
pub struct StubServer {
    addr: SocketAddr,
    captured: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Bind to an ephemeral local port and start serving `reply`.
    pub fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&captured);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                serve(stream, &reply, &sink);
            }
        });
        Self { addr, captured }
    }

    /// Base URL of the stub, e.g. `http://127.0.0.1:40123`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request bodies received so far.
    pub fn bodies(&self) -> Vec<String> {
        self.captured.lock().expect("capture lock").clone()
    }
}

/// A base URL nothing listens on.
pub fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("ephemeral port address");
    drop(listener);
    format!("http://{addr}")
}

fn serve(stream: TcpStream, reply: &Reply, sink: &Mutex<Vec<String>>) {
    let mut reader = BufReader::new(stream);
    let mut content_length = 0_usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            return;
        }
        let header = line.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut body = vec![0_u8; content_length];
    if reader.read_exact(&mut body).is_err() {
        return;
    }
    sink.lock()
        .expect("capture lock")
        .push(String::from_utf8_lossy(&body).into_owned());

    let mut stream = reader.into_inner();
    match reply {
        Reply::Json { status, body } => {
            let response = format!(
                "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream
                .write_all(response.as_bytes())
                .and_then(|()| stream.flush())
                .expect("write stub response");
        }
        Reply::Silent(hold) => thread::sleep(*hold),
    }
}
