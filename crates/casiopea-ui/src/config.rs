//! Request configuration injected into toggle activations.
//!
//! # Design
//! - Mirror the fetch `RequestInit` shape the page already builds (`method`,
//!   `headers`, `credentials`) so the same object can be handed over as-is.
//! - Parse once at boot; activations borrow the parsed value.
//! - Missing fields fall back to fetch defaults.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while parsing a request configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The HTTP method is not one fetch understands.
    #[error("invalid request method `{value}`")]
    InvalidMethod {
        /// Method string supplied by the page.
        value: String,
    },
    /// The credentials mode is not a fetch credentials mode.
    #[error("invalid credentials mode `{value}`")]
    InvalidCredentials {
        /// Credentials string supplied by the page.
        value: String,
    },
    /// A field holds a value of the wrong type (e.g. a numeric `method`).
    #[error("request configuration field `{field}` must be a string")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The `headers` value has a shape fetch would not accept.
    #[error("invalid request headers: {detail}")]
    InvalidHeaders {
        /// What was wrong with the headers value.
        detail: String,
    },
    /// The configuration document could not be decoded.
    #[error("request configuration could not be parsed")]
    Parse {
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

/// HTTP methods accepted for toggle requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Method {
    /// `GET`, the fetch default.
    #[default]
    Get,
    /// `POST`.
    Post,
    /// `PUT`.
    Put,
    /// `PATCH`.
    Patch,
    /// `DELETE`.
    Delete,
}

impl Method {
    /// Upper-case wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(ConfigError::InvalidMethod {
                value: value.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Method {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Fetch credentials mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Credentials {
    /// Never send cookies.
    Omit,
    /// Send cookies to the same origin only (fetch default).
    #[default]
    SameOrigin,
    /// Always send cookies.
    Include,
}

impl FromStr for Credentials {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "omit" => Ok(Self::Omit),
            "same-origin" => Ok(Self::SameOrigin),
            "include" => Ok(Self::Include),
            _ => Err(ConfigError::InvalidCredentials {
                value: value.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Credentials {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Shared request options reused by every toggle request on a page.
#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// HTTP method for toggle requests.
    pub method: Method,
    /// Extra request headers (CSRF tokens and similar).
    pub headers: BTreeMap<String, String>,
    /// Cookie policy for the request.
    pub credentials: Credentials,
}

impl RequestConfig {
    /// Build a configuration for the given method with fetch defaults elsewhere.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Add or replace a request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace the credentials mode.
    #[must_use]
    pub const fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Build a configuration from fields read off a page's fetch init.
    ///
    /// `None` leaves the fetch default in place. Later headers replace earlier
    /// ones with the same name.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidMethod`] or [`ConfigError::InvalidCredentials`]
    /// when a token is not one fetch understands.
    pub fn from_parts(
        method: Option<&str>,
        credentials: Option<&str>,
        headers: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            method: method.map(str::parse::<Method>).transpose()?.unwrap_or_default(),
            headers: headers.into_iter().collect(),
            credentials: credentials.map(str::parse::<Credentials>).transpose()?.unwrap_or_default(),
        })
    }

    /// Validate one header entry given as its `[name, value]` parts.
    ///
    /// A `None` part is a non-string value.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidHeaders`] unless the entry is exactly two strings.
    pub fn header_entry(parts: &[Option<String>]) -> Result<(String, String), ConfigError> {
        match parts {
            [Some(name), Some(value)] => Ok((name.clone(), value.clone())),
            [_, _] => Err(ConfigError::InvalidHeaders {
                detail: "header names and values must be strings".to_string(),
            }),
            other => Err(ConfigError::InvalidHeaders {
                detail: format!("expected a [name, value] pair, got {} items", other.len()),
            }),
        }
    }

    /// Parse a configuration from its JSON form.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] when the document is not a valid
    /// fetch-init object; invalid methods and credentials surface through it.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|source| ConfigError::Parse { source })
    }
}
