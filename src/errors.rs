pub type BoxedError = Box<dyn std::error::Error>;
pub type Result<T> = std::result::Result<T, BoxedError>;

#[derive(Debug)]
pub enum Error {
    ConnectionReset,
    NoResponse,
    NotFound(String),
    BadRequest(String),
    UnexpectedStatus(u16),
    OrderInFlight,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ConnectionReset => write!(f, "Connection reset by peer"),
            Error::NoResponse => write!(f, "No response from server"),
            Error::NotFound(err) => write!(f, "Not found: {}", err),
            Error::BadRequest(err) => write!(f, "Bad request: {}", err),
            Error::UnexpectedStatus(code) => write!(f, "Unexpected response status: {}", code),
            Error::OrderInFlight => write!(f, "An order submission is already in progress"),
        }
    }
}

impl std::error::Error for Error {}
