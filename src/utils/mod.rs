//! Utility functions module

use crate::error::{Error, Result};
use reqwest::Client;
use std::time::Duration;

/// HTTP client builder
pub struct HttpClientBuilder {
    timeout: Duration,
    connect_timeout: Duration,
    pool_max_idle_per_host: usize,
    user_agent: String,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_max_idle_per_host: 10,
            user_agent: format!("HnMcp/{}", crate::VERSION),
        }
    }
}

impl HttpClientBuilder {
    /// Create a new HTTP client builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connection timeout
    #[must_use]
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Set connection pool size
    #[must_use]
    pub fn pool_max_idle_per_host(mut self, max_idle: usize) -> Self {
        self.pool_max_idle_per_host = max_idle;
        self
    }

    /// Set User-Agent
    #[must_use]
    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Build HTTP client
    pub fn build(self) -> Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| Error::Api {
                api: "HTTP".to_string(),
                message: e.to_string(),
            })
    }
}

/// Tool argument validation utilities
pub mod validation {
    use crate::error::{Error, Result};
    use serde_json::{Map, Value};
    use std::fmt;

    /// A single violated constraint: field path plus reason
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Violation {
        /// Field path within the argument object
        pub path: String,
        /// Human-readable reason
        pub reason: String,
    }

    impl fmt::Display for Violation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}: {}", self.path, self.reason)
        }
    }

    /// Schema-driven argument checker
    ///
    /// Collects every violated constraint instead of failing on the first
    /// one; `finish` joins them into a single `Error::Validation`.
    pub struct ArgsValidator {
        args: Map<String, Value>,
        violations: Vec<Violation>,
    }

    impl ArgsValidator {
        /// Wrap an untyped argument value; `null` counts as an empty object
        #[must_use]
        pub fn new(args: &Value) -> Self {
            let (map, violations) = match args {
                Value::Object(map) => (map.clone(), Vec::new()),
                Value::Null => (Map::new(), Vec::new()),
                other => (
                    Map::new(),
                    vec![Violation {
                        path: ".".to_string(),
                        reason: format!("expected an object, got {}", type_name(other)),
                    }],
                ),
            };
            Self {
                args: map,
                violations,
            }
        }

        fn violate(&mut self, path: &str, reason: impl Into<String>) {
            self.violations.push(Violation {
                path: path.to_string(),
                reason: reason.into(),
            });
        }

        /// Required string field
        pub fn required_string(&mut self, field: &str) -> Option<String> {
            match self.args.get(field) {
                Some(Value::String(s)) => Some(s.clone()),
                Some(other) => {
                    let got = type_name(other);
                    self.violate(field, format!("expected a string, got {got}"));
                    None
                }
                None => {
                    self.violate(field, "required field is missing");
                    None
                }
            }
        }

        /// Required non-empty string field
        pub fn required_non_empty_string(&mut self, field: &str) -> Option<String> {
            let value = self.required_string(field)?;
            if value.is_empty() {
                self.violate(field, "must not be empty");
                return None;
            }
            Some(value)
        }

        /// Required positive integer id
        pub fn required_positive_id(&mut self, field: &str) -> Option<u64> {
            match self.args.get(field) {
                Some(value) => match integer_value(value) {
                    Some(n) if n >= 1 => Some(n.unsigned_abs()),
                    Some(_) => {
                        self.violate(field, "must be a positive integer");
                        None
                    }
                    None => {
                        let got = type_name(value);
                        self.violate(field, format!("expected an integer, got {got}"));
                        None
                    }
                },
                None => {
                    self.violate(field, "required field is missing");
                    None
                }
            }
        }

        /// Optional integer with inclusive range and default
        #[allow(clippy::cast_sign_loss)]
        pub fn optional_int_in_range(
            &mut self,
            field: &str,
            min: i64,
            max: i64,
            default: i64,
        ) -> i64 {
            match self.args.get(field) {
                Some(value) => match integer_value(value) {
                    Some(n) if n >= min && n <= max => n,
                    Some(n) => {
                        self.violate(field, format!("must be between {min} and {max}, got {n}"));
                        default
                    }
                    None => {
                        let got = type_name(value);
                        self.violate(field, format!("expected an integer, got {got}"));
                        default
                    }
                },
                None => default,
            }
        }

        /// Required string restricted to an allowed set
        pub fn required_enum(&mut self, field: &str, allowed: &[&str]) -> Option<String> {
            let value = self.required_string(field)?;
            if allowed.contains(&value.as_str()) {
                Some(value)
            } else {
                self.violate(
                    field,
                    format!("must be one of {allowed:?}, got {value:?}"),
                );
                None
            }
        }

        /// Optional string restricted to an allowed set, with default
        pub fn optional_enum(&mut self, field: &str, allowed: &[&str], default: &str) -> String {
            match self.args.get(field) {
                Some(Value::String(s)) => {
                    if allowed.contains(&s.as_str()) {
                        s.clone()
                    } else {
                        self.violate(field, format!("must be one of {allowed:?}, got {s:?}"));
                        default.to_string()
                    }
                }
                Some(other) => {
                    let got = type_name(other);
                    self.violate(field, format!("expected a string, got {got}"));
                    default.to_string()
                }
                None => default.to_string(),
            }
        }

        /// Fail with every collected violation, or succeed if there is none
        pub fn finish(self) -> Result<()> {
            if self.violations.is_empty() {
                Ok(())
            } else {
                let joined = self
                    .violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(Error::Validation(joined))
            }
        }
    }

    /// JSON 数值按整数解释；带小数部分的浮点数不算整数
    fn integer_value(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(i)
                } else {
                    n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)
                }
            }
            _ => None,
        }
    }

    fn type_name(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use serde_json::json;

        #[test]
        fn test_required_positive_id() {
            let args = json!({ "id": 5 });
            let mut v = ArgsValidator::new(&args);
            assert_eq!(v.required_positive_id("id"), Some(5));
            assert!(v.finish().is_ok());

            let args = json!({ "id": -1 });
            let mut v = ArgsValidator::new(&args);
            assert_eq!(v.required_positive_id("id"), None);
            let err = v.finish().unwrap_err();
            assert!(err.to_string().contains("id: must be a positive integer"));
        }

        #[test]
        fn test_optional_int_defaults() {
            let args = json!({});
            let mut v = ArgsValidator::new(&args);
            assert_eq!(v.optional_int_in_range("page", 0, i64::MAX, 0), 0);
            assert_eq!(v.optional_int_in_range("limit", 1, 100, 30), 30);
            assert!(v.finish().is_ok());
        }

        #[test]
        fn test_optional_int_out_of_range() {
            let args = json!({ "limit": 101 });
            let mut v = ArgsValidator::new(&args);
            v.optional_int_in_range("limit", 1, 100, 30);
            let err = v.finish().unwrap_err();
            assert!(err.to_string().contains("limit: must be between 1 and 100"));
        }

        #[test]
        fn test_collects_every_violation() {
            let args = json!({ "id": "abc", "limit": 0 });
            let mut v = ArgsValidator::new(&args);
            v.required_positive_id("id");
            v.optional_int_in_range("limit", 1, 100, 30);
            v.required_string("query");
            let message = v.finish().unwrap_err().to_string();
            assert!(message.contains("id:"));
            assert!(message.contains("limit:"));
            assert!(message.contains("query: required field is missing"));
        }

        #[test]
        fn test_enums() {
            let args = json!({ "type": "story" });
            let mut v = ArgsValidator::new(&args);
            assert_eq!(
                v.optional_enum("type", &["all", "story", "comment"], "all"),
                "story"
            );
            assert!(v.finish().is_ok());

            let args = json!({ "type": "poll" });
            let mut v = ArgsValidator::new(&args);
            v.required_enum("type", &["top", "new", "best", "ask", "show", "job"]);
            assert!(v.finish().is_err());
        }

        #[test]
        fn test_float_is_not_an_integer() {
            let args = json!({ "id": 1.5 });
            let mut v = ArgsValidator::new(&args);
            assert_eq!(v.required_positive_id("id"), None);
            assert!(v.finish().is_err());
        }

        #[test]
        fn test_non_object_args() {
            let args = json!([1, 2, 3]);
            let mut v = ArgsValidator::new(&args);
            v.required_string("query");
            let message = v.finish().unwrap_err().to_string();
            assert!(message.contains("expected an object"));
        }
    }
}
