use crate::errors::{Error, Result};
use std::io::{BufReader, Read};

/// A fully parsed message head together with the byte counts needed to
/// locate the body in the stream
pub(crate) struct Head<H> {
    pub head: H,
    pub head_len: usize,
    pub body_len: usize,
}

/// Drive an httparse-style incremental parser over a buffered stream.
///
/// Requests and responses only differ in their head; the read-until-complete
/// loop and the body handling are the same for both, so they share this
/// function. `parse_head` gets the bytes accumulated so far and returns
/// `None` while the head is still partial.
///
/// At the moment this doesn't handle messages whose head plus declared body
/// grow without a Content-Length; the body is exactly as long as the header
/// says, which holds for every endpoint of this API.
pub(crate) fn read_message<T, H, P>(mut buf_reader: BufReader<T>, mut parse_head: P) -> Result<(H, String)>
where
    T: Sized + Read,
    P: FnMut(&[u8]) -> Result<Option<Head<H>>>,
{
    let mut buf = [0; 4096];
    let mut buf_str = String::new();

    let parsed = loop {
        let bytes_read = buf_reader.read(&mut buf)?;
        if bytes_read == 0 {
            return Err(Box::new(Error::ConnectionReset));
        }

        buf_str.push_str(&String::from_utf8_lossy(&buf[..bytes_read]));

        match parse_head(buf_str.as_bytes())? {
            Some(parsed) => break parsed,
            None => continue,
        }
    };

    // This should be fine for HTTP1.1 since requests are not meant to be sent
    // before the response to the last one is received; with multiplexing we
    // could be dropping the start of the next message here
    while parsed.body_len > buf_str.len() - parsed.head_len {
        let bytes_read = buf_reader.read(&mut buf)?;
        if bytes_read == 0 {
            return Err(Box::new(Error::ConnectionReset));
        }

        buf_str.push_str(&String::from_utf8_lossy(&buf[..bytes_read]));
    }

    let body = buf_str[parsed.head_len..parsed.head_len + parsed.body_len].to_string();
    Ok((parsed.head, body))
}

/// Declared body length, 0 when the header is absent or unreadable
pub(crate) fn content_length(headers: &[httparse::Header]) -> usize {
    headers
        .iter()
        .find(|h| h.name == "Content-Length")
        .and_then(|length| String::from_utf8_lossy(length.value).parse::<usize>().ok())
        .unwrap_or(0)
}

/// Copy borrowed httparse headers into owned pairs
pub(crate) fn owned_headers(headers: &[httparse::Header]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|h| {
            (
                h.name.to_string(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect()
}
