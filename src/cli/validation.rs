//! CLI argument validation functions
//!
//! Value parsers for arguments that clap cannot validate on its own.

use std::fs;
use std::path::PathBuf;

/// Validate port number is within valid range (1-65535)
pub fn validate_port(port_str: &str) -> Result<u16, String> {
    let port: u16 = port_str.parse().map_err(|_| {
        format!("Port must be a valid number between 1 and 65535, got: '{}'", port_str)
    })?;

    if port == 0 {
        return Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string());
    }

    Ok(port)
}

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Validate host address format (basic validation)
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }

    if host.contains(' ') {
        return Err("Host address cannot contain spaces".to_string());
    }

    if host == "localhost" || host == "0.0.0.0" || host.starts_with("127.") {
        return Ok(host.to_string());
    }

    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        let parts: Vec<&str> = host.split('.').collect();
        if parts.len() != 4 || parts.iter().any(|part| part.parse::<u8>().is_err()) {
            return Err(format!("Invalid IPv4 address format: '{}'", host_str));
        }
        return Ok(host.to_string());
    }

    if host.len() > 253 {
        return Err("Host address is too long (maximum 253 characters)".to_string());
    }

    Ok(host.to_string())
}

/// Parse a `key=value` data entry for `send --data`
pub fn validate_data_pair(pair: &str) -> Result<(String, String), String> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| format!("Data entries must look like key=value, got: '{}'", pair))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Data key cannot be empty in '{}'", pair));
    }

    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_port() {
        assert_eq!(validate_port("8080"), Ok(8080));
        assert_eq!(validate_port("65535"), Ok(65535));
        assert!(validate_port("0").is_err());
        assert!(validate_port("65536").is_err());
        assert!(validate_port("http").is_err());
    }

    #[test]
    fn test_validate_config_file_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]").unwrap();

        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path).unwrap(), file.path());
        assert!(validate_config_file_path("/definitely/not/here.toml").is_err());

        let dir = tempfile::tempdir().unwrap();
        let err = validate_config_file_path(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.contains("not a file"));
    }

    #[test]
    fn test_validate_host_address() {
        for host in ["localhost", "0.0.0.0", "127.0.0.1", "192.168.1.10", "relay.internal"] {
            assert!(validate_host_address(host).is_ok(), "Host {} should be valid", host);
        }
        for host in ["", "  ", "bad host", "300.1.1.1", "1.2.3"] {
            assert!(validate_host_address(host).is_err(), "Host {:?} should be invalid", host);
        }
    }

    #[test]
    fn test_validate_data_pair() {
        assert_eq!(
            validate_data_pair("orderId=42"),
            Ok(("orderId".to_string(), "42".to_string()))
        );
        assert_eq!(
            validate_data_pair("url=https://x.test/?a=b"),
            Ok(("url".to_string(), "https://x.test/?a=b".to_string()))
        );
        assert_eq!(validate_data_pair("empty="), Ok(("empty".to_string(), String::new())));
        assert!(validate_data_pair("novalue").is_err());
        assert!(validate_data_pair("=value").is_err());
    }
}
