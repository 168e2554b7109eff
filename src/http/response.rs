use crate::errors::{BoxedError, Result};
use crate::http::wire;
use std::io::{BufReader, Read};

/// An HTTP response
#[derive(Debug)]
pub struct Response {
    /// Status code of the response. Optional because that's what httparse
    /// returns, but it shouldn't happen in practice since we control the
    /// responses.
    pub status: Option<u16>,
    /// Headers for the response. It is not necessary to add Content-Length
    /// to it, this is done automatically on serialization.
    pub headers: Vec<(String, String)>,
    /// Body of the response. Give an empty string for an empty body
    pub body: String,
}

impl Response {
    /// Creates an empty OK response (204)
    pub fn ok() -> Response {
        Response {
            status: Some(204),
            headers: vec![],
            body: "".to_string(),
        }
    }

    /// Creates an OK (200) response with the given body
    pub fn ok_with_body(str: String) -> Response {
        Response {
            status: Some(200),
            headers: vec![],
            body: str,
        }
    }

    /// Creates a Created (201) response with the given body, for the
    /// endpoints that store something
    pub fn created(str: String) -> Response {
        Response {
            status: Some(201),
            headers: vec![],
            body: str,
        }
    }

    /// Creates an error response with the given code.
    ///
    /// The code must be in the 4xx or 5xx range.
    ///
    /// No body is added intentionally to avoid leaking information about the
    /// server until we build some better error handling.
    pub fn error(code: u16) -> Response {
        assert!((400..600).contains(&code), "Invalid error code");
        Response {
            status: Some(code),
            headers: vec![],
            body: "".to_string(),
        }
    }

    /// Creates a Not Found (404) response.
    pub fn not_found() -> Response {
        Self::error(404)
    }

    /// Creates an Internal Server Error (500) response.
    pub fn internal_server_error() -> Response {
        Self::error(500)
    }
}

/// Parse an HTTP response from a byte stream
pub fn parse_response<T>(buf_reader: BufReader<T>) -> Result<Response>
where
    T: Sized + Read,
{
    let (mut response, body) = wire::read_message(buf_reader, |bytes| {
        let mut headers = [httparse::EMPTY_HEADER; 64];
        let mut resp = httparse::Response::new(&mut headers);

        match resp.parse(bytes) {
            Ok(httparse::Status::Complete(head_len)) => Ok(Some(wire::Head {
                body_len: wire::content_length(resp.headers),
                head_len,
                head: Response {
                    status: resp.code,
                    headers: wire::owned_headers(resp.headers),
                    body: "".to_string(),
                },
            })),
            Ok(httparse::Status::Partial) => Ok(None),
            Err(err) => Err(BoxedError::from(err)),
        }
    })?;

    response.body = body;
    Ok(response)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_parse_empty_response() {
        let resp_str = b"HTTP/1.1 204 No Content\r\nContent-Length: 0\r\n\r\n";
        let buf_reader = BufReader::new(&resp_str[..]);

        let parsed_resp = parse_response(buf_reader).unwrap();

        assert_eq!(parsed_resp.status, Some(204));
        assert_eq!(parsed_resp.headers.len(), 1);
        assert_eq!(parsed_resp.body, "");
    }

    #[test]
    fn test_parse_response_with_body() {
        let body = "[{ \"id\": 1, \"name\": \"Ao molho\" }]";
        let resp_str = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );

        let buf_reader = BufReader::new(resp_str.as_bytes());
        let parsed_resp = parse_response(buf_reader).unwrap();

        assert_eq!(parsed_resp.status, Some(200));
        assert_eq!(parsed_resp.headers.len(), 1);
        assert_eq!(parsed_resp.body, body);
    }

    #[test]
    fn test_parse_response_with_large_body() {
        // Same scenario as on the request side, the body spans several reads
        let mut rng = rand::thread_rng();
        let mut buffer = [0; 40960];
        for c in buffer.iter_mut() {
            *c = rng.gen_range(b'a'..=b'z')
        }
        let body = String::from_utf8_lossy(&buffer);

        let resp_str = format!(
            "HTTP/1.1 201 Created\r\nContent-Length: {}\r\n\r\n{}",
            buffer.len(),
            body
        );

        let buf_reader = BufReader::new(resp_str.as_bytes());
        let parsed_resp = parse_response(buf_reader).unwrap();

        assert_eq!(parsed_resp.status, Some(201));
        assert_eq!(parsed_resp.body, body);
    }
}
