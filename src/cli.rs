use regex::Regex;

/// Default address for both the client and the server
///
/// This is a convenience value to avoid having to provide an address
/// everytime the client or server is started. Ideally this would be drawn
/// from a config file or environment variable.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:9898";

/// Errors that can occur when parsing the command line arguments
#[derive(Debug, Clone)]
pub enum CLIError {
    InvalidAddressFormat,
    MissingParameter(&'static str),
    InvalidParameter,
}

impl std::fmt::Display for CLIError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CLIError::InvalidAddressFormat => {
                write!(f, "Invalid target format. Should be <host>:<port>")
            }
            CLIError::MissingParameter(missing) => write!(f, "Missing parameter '{}'", missing),
            CLIError::InvalidParameter => write!(f, "Invalid parameter"),
        }
    }
}

impl std::error::Error for CLIError {}

/// Validate the format of the TCP address provided by the user
///
/// Returns its input if the address is in the format <host>:<port>,
/// otherwise InvalidAddressFormat
pub fn validate_address(address: &str) -> std::result::Result<&str, CLIError> {
    let re = Regex::new(r"^[a-zA-Z0-9\.\-]+:\d{1,5}$").unwrap();
    if re.is_match(address) {
        Ok(address)
    } else {
        Err(CLIError::InvalidAddressFormat)
    }
}

/// Parse a food id argument
pub fn parse_food_id(arg: &str) -> std::result::Result<u64, CLIError> {
    arg.parse::<u64>().map_err(|_| CLIError::InvalidParameter)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate_address() {
        assert!(validate_address("127.0.0.1:9898").is_ok());
        assert!(validate_address("some-host.local:80").is_ok());
        assert!(validate_address("127.0.0.1").is_err());
        assert!(validate_address("not an address").is_err());
    }

    #[test]
    fn test_parse_food_id() {
        assert_eq!(parse_food_id("12").unwrap(), 12);
        assert!(parse_food_id("twelve").is_err());
        assert!(parse_food_id("-1").is_err());
    }
}
