//! Form methods.

use std::fmt;
use std::str::FromStr;

use crate::error::NetworkError;

/// Method a form is submitted with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Fields in the query string.
    Get,
    /// Fields URL-encoded in the body.
    #[default]
    Post,
    /// Like `Post`.
    Put,
    /// Like `Post`.
    Patch,
    /// Like `Post`.
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether fields travel in the query string instead of the body.
    pub fn uses_query(self) -> bool {
        self == Self::Get
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Patch => http::Method::PATCH,
            HttpMethod::Delete => http::Method::DELETE,
        }
    }
}

impl FromStr for HttpMethod {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = s.trim();
        [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete]
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(method))
            .ok_or_else(|| NetworkError::InvalidMethod(method.to_string()))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!("post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!(" Get ".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("TRACE".parse::<HttpMethod>(), Err(NetworkError::InvalidMethod("TRACE".into())));
        assert_eq!(HttpMethod::default(), HttpMethod::Post);
    }

    #[test]
    fn test_http_method_conversion() {
        assert_eq!(http::Method::from(HttpMethod::Patch), http::Method::PATCH);
        assert!(HttpMethod::Get.uses_query());
        assert!(!HttpMethod::Delete.uses_query());
    }
}
