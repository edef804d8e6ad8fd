//! # Static Headers
//!
//! Headers passed with `-H` reach the transport through the client's security extension
//! point, so they are added to every request the same way an authentication scheme would.
use soapc_core::{
    http::{
        HeaderMap, HeaderName, HeaderValue,
        header::{InvalidHeaderName, InvalidHeaderValue},
    },
    security::Security,
};
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("Invalid header key '{key}': '{source}'")]
    InvalidKey {
        key: String,
        source: InvalidHeaderName,
    },
    #[error("Invalid header value for key '{key}': '{source}'")]
    InvalidValue {
        key: String,
        source: InvalidHeaderValue,
    },
}

#[derive(Debug, Clone, Default)]
pub struct StaticHeaders(HeaderMap);

impl StaticHeaders {
    pub fn new(headers: Vec<(String, String)>) -> Result<Self, HeaderError> {
        let mut map = HeaderMap::new();
        for (k, v) in headers {
            let key = HeaderName::from_str(&k).map_err(|source| HeaderError::InvalidKey {
                key: k.clone(),
                source,
            })?;
            let val = HeaderValue::from_str(&v)
                .map_err(|source| HeaderError::InvalidValue { key: k, source })?;
            map.append(key, val);
        }
        Ok(Self(map))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Security for StaticHeaders {
    fn add_headers(&self, headers: &mut HeaderMap) {
        for (key, value) in &self.0 {
            headers.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_added_and_override_defaults() {
        let extension = StaticHeaders::new(vec![
            ("x-api-key".to_string(), "secret".to_string()),
            ("Content-Type".to_string(), "application/soap+xml".to_string()),
        ])
        .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("text/xml"));
        extension.add_headers(&mut headers);

        assert_eq!(headers["x-api-key"], "secret");
        assert_eq!(headers["content-type"], "application/soap+xml");
        assert_eq!(extension.to_xml(), "");
    }

    #[test]
    fn test_invalid_headers_are_rejected() {
        let err = StaticHeaders::new(vec![("bad key".to_string(), "v".to_string())]).unwrap_err();
        assert!(matches!(err, HeaderError::InvalidKey { .. }));

        let err = StaticHeaders::new(vec![("key".to_string(), "bad\nvalue".to_string())])
            .unwrap_err();
        assert!(matches!(err, HeaderError::InvalidValue { .. }));
    }
}
