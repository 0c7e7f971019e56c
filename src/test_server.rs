//! One-shot HTTP responder on loopback for client tests.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// A server that answers exactly one request with a canned response.
pub(crate) struct OneShotServer {
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl OneShotServer {
    pub(crate) fn respond(status_line: &str, content_type: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let address = listener.local_addr().expect("listener address");
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            content_type,
            body.len(),
            body
        );

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept connection");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("read request line");
            loop {
                let mut header = String::new();
                let read = reader.read_line(&mut header).expect("read header");
                if read == 0 || header == "\r\n" || header == "\n" {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).expect("write response");
            stream.flush().expect("flush response");
            request_line
        });

        Self {
            base_url: format!("http://{}", address),
            handle,
        }
    }

    /// Waits for the request and returns its request line, e.g. `GET /us/90210 HTTP/1.1`.
    pub(crate) fn request_line(self) -> String {
        self.handle.join().expect("server thread panicked")
    }
}
