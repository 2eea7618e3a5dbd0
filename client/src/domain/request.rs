//! Request options accepted by the call wrapper.
//!
//! Options are an enumerated set with explicit defaults. The JSON form used at
//! the access-layer boundary rejects unknown keys instead of ignoring them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ClientError;

/// Header sent on every request unless the caller overrides it.
pub const DEFAULT_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// HTTP verb of an outbound request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`, the default.
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

impl HttpMethod {
    /// Uppercase verb as sent on the wire.
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

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognised per-call options.
///
/// # Examples
/// ```
/// use dashboard_client::domain::{HttpMethod, RequestOptions};
/// use serde_json::json;
///
/// let options = RequestOptions::new()
///     .with_method(HttpMethod::Post)
///     .with_body(json!({ "title": "Databases" }));
/// assert_eq!(options.method(), HttpMethod::Post);
///
/// let err = RequestOptions::from_value(json!({ "credentials": "omit" }));
/// assert!(err.is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestOptions {
    #[serde(default)]
    method: HttpMethod,
    #[serde(default)]
    body: Option<Value>,
    #[serde(default)]
    headers: BTreeMap<String, String>,
}

impl RequestOptions {
    /// `GET` with no body and no extra headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a loosely shaped JSON options object.
    pub fn from_value(value: Value) -> Result<Self, ClientError> {
        serde_json::from_value(value).map_err(|err| ClientError::invalid_options(err.to_string()))
    }

    /// Replace the HTTP verb.
    #[must_use]
    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add or replace one extra header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// HTTP verb.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Caller-supplied headers before merging.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub(crate) fn into_parts(self) -> (HttpMethod, Option<Value>, BTreeMap<String, String>) {
        (self.method, self.body, self.headers)
    }
}

/// Merge caller headers over the defaults.
///
/// Header names compare case-insensitively, so `content-type` from the caller
/// replaces the default `Content-Type`.
pub(crate) fn merge_headers(extra: BTreeMap<String, String>) -> Vec<(String, String)> {
    let (name, value) = DEFAULT_CONTENT_TYPE;
    let mut merged = vec![(name.to_owned(), value.to_owned())];
    for (name, value) in extra {
        merged.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        merged.push((name, value));
    }
    merged
}

/// Ordered filter parameters rendered as a URL query string.
///
/// Keys keep insertion order; setting an existing key replaces its value in
/// place.
///
/// # Examples
/// ```
/// use dashboard_client::domain::QueryParams;
///
/// let params = QueryParams::new().with("batchId", "b1").with("status", "active");
/// assert_eq!(params.apply_to("/api/assessments"), "/api/assessments?batchId=b1&status=active");
/// assert_eq!(QueryParams::new().apply_to("/api/assessments"), "/api/assessments");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Builder form of [`QueryParams::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace one parameter.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Whether no parameters are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `application/x-www-form-urlencoded` rendering without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    /// Append the query to `path`; an empty set leaves `path` untouched.
    #[must_use]
    pub fn apply_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_owned()
        } else {
            format!("{path}?{}", self.to_query_string())
        }
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn defaults_are_get_without_body() {
        let options = RequestOptions::from_value(json!({})).expect("empty options are valid");
        assert_eq!(options.method(), HttpMethod::Get);
        assert!(options.body().is_none());
        assert!(options.headers().is_empty());
    }

    #[rstest]
    fn json_options_are_parsed() {
        let options = RequestOptions::from_value(json!({
            "method": "DELETE",
            "body": { "moduleIds": ["m1"] },
            "headers": { "X-Trace": "abc" }
        }))
        .expect("valid options");
        assert_eq!(options.method(), HttpMethod::Delete);
        assert_eq!(options.body(), Some(&json!({ "moduleIds": ["m1"] })));
        assert_eq!(options.headers().get("X-Trace").map(String::as_str), Some("abc"));
    }

    #[rstest]
    #[case(json!({ "credentials": "omit" }))]
    #[case(json!({ "method": "TRACE" }))]
    #[case(json!({ "headers": { "X-Count": 3 } }))]
    #[case(json!("GET"))]
    fn malformed_options_are_rejected(#[case] raw: Value) {
        let err = RequestOptions::from_value(raw).expect_err("must reject");
        assert!(matches!(err, ClientError::InvalidOptions { .. }));
    }

    #[rstest]
    fn caller_headers_override_defaults_case_insensitively() {
        let mut extra = BTreeMap::new();
        extra.insert("content-type".to_owned(), "text/plain".to_owned());
        extra.insert("X-Request-Id".to_owned(), "r-1".to_owned());
        let merged = merge_headers(extra);
        assert_eq!(
            merged,
            vec![
                ("X-Request-Id".to_owned(), "r-1".to_owned()),
                ("content-type".to_owned(), "text/plain".to_owned()),
            ]
        );
    }

    #[rstest]
    fn default_content_type_survives_unrelated_headers() {
        let mut extra = BTreeMap::new();
        extra.insert("Accept".to_owned(), "application/json".to_owned());
        let merged = merge_headers(extra);
        assert!(merged.contains(&("Content-Type".to_owned(), "application/json".to_owned())));
        assert_eq!(merged.len(), 2);
    }

    #[rstest]
    #[case(&[("moduleId", "m1")], "moduleId=m1")]
    #[case(&[("batchId", "b1"), ("status", "active")], "batchId=b1&status=active")]
    #[case(&[("q", "data bases"), ("tag", "a&b")], "q=data+bases&tag=a%26b")]
    fn query_strings_follow_insertion_order(
        #[case] pairs: &[(&str, &str)],
        #[case] expected: &str,
    ) {
        let params: QueryParams = pairs.iter().copied().collect();
        assert_eq!(params.to_query_string(), expected);
    }

    #[rstest]
    fn setting_existing_key_keeps_position() {
        let params = QueryParams::new()
            .with("a", "1")
            .with("b", "2")
            .with("a", "3");
        assert_eq!(params.to_query_string(), "a=3&b=2");
    }
}
