//! Credential sources: synchronous, side-effect-free keyed lookups scoped to a
//! single request.
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use axum::http::{HeaderMap, header};

/// Read access to named credential values of the current request.
///
/// Values are borrowed when stored as-is and owned when the transport had to
/// decode them.
pub trait CredentialSource {
    fn credential(&self, key: &str) -> Option<Cow<'_, str>>;
}

impl<T> CredentialSource for &T
where
    T: CredentialSource + ?Sized,
{
    fn credential(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).credential(key)
    }
}

impl CredentialSource for HashMap<String, String> {
    fn credential(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl CredentialSource for BTreeMap<String, String> {
    fn credential(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_str()))
    }
}

/// Credentials carried in the request's `Cookie` headers.
///
/// Surrounding double quotes are stripped and the value is percent-decoded.
/// A value that does not decode to UTF-8 is returned as sent. The first
/// matching pair wins.
#[derive(Debug, Clone, Copy)]
pub struct CookieSource<'a> {
    headers: &'a HeaderMap,
}

impl<'a> CookieSource<'a> {
    pub fn new(headers: &'a HeaderMap) -> Self {
        Self { headers }
    }
}

impl CredentialSource for CookieSource<'_> {
    fn credential(&self, key: &str) -> Option<Cow<'_, str>> {
        self.headers
            .get_all(header::COOKIE)
            .iter()
            // non-visible-ASCII header values are skipped, not an error
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| name.trim() == key)
            .map(|(_, value)| {
                let value = value.trim();
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(value);
                urlencoding::decode(value).unwrap_or(Cow::Borrowed(value))
            })
    }
}
