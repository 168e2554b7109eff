use crate::errors::{BoxedError, Result};
use crate::http::wire;
use std::collections::HashMap;
use std::io::{BufReader, Read};

/// Represents an HTTP request.
#[derive(Debug)]
pub struct Request {
    /// The HTTP method used in the request
    pub method: String,
    /// The full path of the request, query string included
    pub path: String,
    /// Headers of the request
    pub headers: Vec<(String, String)>,
    /// Body of the request
    pub body: String,
}

impl Request {
    /// Create a new GET request for the given path, with an empty body
    pub fn get(path: &str) -> Request {
        Request {
            method: "GET".to_string(),
            body: "".to_string(),
            headers: vec![],
            path: path.to_string(),
        }
    }

    /// Create a new POST request for the given path, with the given body
    pub fn post(path: &str, body: String) -> Request {
        Request {
            method: "POST".to_string(),
            body,
            headers: vec![],
            path: path.to_string(),
        }
    }

    /// Create a new DELETE request for the given path, with the given body
    pub fn delete(path: &str, body: String) -> Request {
        Request {
            method: "DELETE".to_string(),
            body,
            headers: vec![],
            path: path.to_string(),
        }
    }

    /// The path without its query string, which is what routes match on
    pub fn route_path(&self) -> &str {
        match self.path.split_once('?') {
            Some((path, _)) => path,
            None => &self.path,
        }
    }

    /// Key/value pairs decoded from the query string
    ///
    /// A key without '=' maps to an empty value. No percent-decoding, the
    /// API only passes numeric ids around.
    pub fn query_params(&self) -> HashMap<String, String> {
        let query = match self.path.split_once('?') {
            Some((_, query)) => query,
            None => return HashMap::new(),
        };

        query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect()
    }
}

/// Parse an HTTP request from a byte stream
pub fn parse_request<T>(buf_reader: BufReader<T>) -> Result<Request>
where
    T: Sized + Read,
{
    let (mut request, body) = wire::read_message(buf_reader, |bytes| {
        let mut headers = [httparse::EMPTY_HEADER; 64];
        let mut req = httparse::Request::new(&mut headers);

        match req.parse(bytes) {
            Ok(httparse::Status::Complete(head_len)) => Ok(Some(wire::Head {
                body_len: wire::content_length(req.headers),
                head_len,
                head: Request {
                    method: req.method.unwrap_or("GET").to_string(),
                    path: req.path.unwrap_or("/").to_string(),
                    headers: wire::owned_headers(req.headers),
                    body: "".to_string(),
                },
            })),
            Ok(httparse::Status::Partial) => Ok(None),
            Err(err) => Err(BoxedError::from(err)),
        }
    })?;

    request.body = body;
    Ok(request)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_parse_simple_request() {
        let req_str =
            b"GET /foods/3 HTTP/1.1\r\nHost: localhost:9898\r\nAccept: application/json\r\n\r\n";
        let buf_reader = BufReader::new(&req_str[..]);

        let parsed_req = parse_request(buf_reader).unwrap();

        assert_eq!(parsed_req.method, "GET");
        assert_eq!(parsed_req.path, "/foods/3");
        assert_eq!(parsed_req.headers.len(), 2);
        assert_eq!(parsed_req.body, "");
    }

    #[test]
    fn test_parse_incomplete_request() {
        // Head cut short, the connection closes before the final CRLF
        let req_str = b"GET /foods/3 HTTP/1.1\r\nHost: localhost:9898\r\nAccept: application/json";
        let buf_reader = BufReader::new(&req_str[..]);

        let parsed_req = parse_request(buf_reader);

        assert!(parsed_req.is_err());
    }

    #[test]
    fn test_parse_request_with_body() {
        let body = "{ \"id\": 3, \"name\": \"A la Parmegiana\" }";
        let req_str = format!(
            "POST /favorites HTTP/1.1\r\nHost: localhost:9898\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );

        let buf_reader = BufReader::new(req_str.as_bytes());

        let parsed_req = parse_request(buf_reader).unwrap();

        assert_eq!(parsed_req.method, "POST");
        assert_eq!(parsed_req.path, "/favorites");
        assert_eq!(parsed_req.headers.len(), 3);
        assert_eq!(parsed_req.body, body);
    }

    #[test]
    fn test_parse_request_with_large_body() {
        // Much larger than the read buffer, so the body arrives over
        // several reads
        let mut rng = rand::thread_rng();
        let mut buffer = [0; 40960];
        for c in buffer.iter_mut() {
            *c = rng.gen_range(b'a'..=b'z')
        }
        let body = String::from_utf8_lossy(&buffer);

        let req_str = format!(
            "POST /orders HTTP/1.1\r\nHost: localhost:9898\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            buffer.len(),
            body
        );

        let buf_reader = BufReader::new(req_str.as_bytes());
        let parsed_req = parse_request(buf_reader).unwrap();

        assert_eq!(parsed_req.method, "POST");
        assert_eq!(parsed_req.path, "/orders");
        assert_eq!(parsed_req.headers.len(), 3);
        assert_eq!(parsed_req.body, body);
    }

    #[test]
    fn test_route_path_strips_query() {
        let request = Request::get("/favorites?id=12");
        assert_eq!(request.route_path(), "/favorites");

        let request = Request::get("/favorites");
        assert_eq!(request.route_path(), "/favorites");
    }

    #[test]
    fn test_query_params() {
        let request = Request::get("/favorites?id=12&verbose");
        let params = request.query_params();
        assert_eq!(params.get("id").map(String::as_str), Some("12"));
        assert_eq!(params.get("verbose").map(String::as_str), Some(""));

        let request = Request::get("/favorites");
        assert!(request.query_params().is_empty());
    }
}
