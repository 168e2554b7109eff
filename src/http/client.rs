use crate::errors;
use crate::http::{parse_response, Response};
use std::io::{BufReader, Write};
use std::net::TcpStream;

/// Simple HTTP client
///
/// It sends HTTP requests from a set of parameters, then parses and yields
/// the server response. The server does not keep connections alive between
/// responses, so a fresh connection is opened for every request; the screen
/// issues several per visit.
pub struct HttpClient {
    server: String,
}

impl HttpClient {
    /// Create a new client for the given server address.
    ///
    /// No connection is made until a request is sent.
    pub fn new(server: &str) -> HttpClient {
        HttpClient {
            server: server.to_string(),
        }
    }

    /// Send an HTTP request and wait for the server response.
    ///
    /// An error is returned if the connection cannot be made, or if the
    /// server closes it before a full response arrives.
    pub fn send(&self, method: &str, endpoint: &str, body: &str) -> errors::Result<Response> {
        let mut stream = TcpStream::connect(&self.server)?;
        stream.write_all(
            format! {
                "{} {} HTTP/1.1\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
                method, endpoint, body.len(), body
            }
            .as_bytes(),
        )?;

        let buf_reader = BufReader::new(&mut stream);
        parse_response(buf_reader)
    }
}
