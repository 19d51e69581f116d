//! String-format registry.
//!
//! Swagger attaches `format` hints to string values (`date-time`, `uuid`,
//! ...). The registry maps format names to checker functions and is handed
//! to every compiled validator. Unknown formats validate vacuously, matching
//! JSON Schema's treatment of unrecognised formats. The registry holds plain
//! function pointers, so sharing it across concurrent validations is free.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// A format checker: `true` when the string conforms.
pub type FormatCheck = fn(&str) -> bool;

/// Format name to checker mapping passed through to the schema engine.
#[derive(Clone)]
pub struct FormatRegistry {
    checks: BTreeMap<String, FormatCheck>,
}

impl Default for FormatRegistry {
    /// A registry seeded with the common Swagger string formats.
    fn default() -> Self {
        let mut registry = FormatRegistry {
            checks: BTreeMap::new(),
        };
        registry.register("date", is_date);
        registry.register("date-time", is_date_time);
        registry.register("email", is_email);
        registry.register("uuid", is_uuid);
        registry.register("uri", is_uri);
        registry.register("hostname", is_hostname);
        registry.register("ipv4", is_ipv4);
        registry.register("ipv6", is_ipv6);
        registry.register("byte", is_byte);
        registry
    }
}

impl FormatRegistry {
    /// Register (or replace) a checker for `name`.
    pub fn register(&mut self, name: impl Into<String>, check: FormatCheck) {
        self.checks.insert(name.into(), check);
    }

    pub(crate) fn apply(&self, options: &mut jsonschema::CompilationOptions) {
        for (name, check) in &self.checks {
            let name: &'static str = Box::leak(name.clone().into_boxed_str());
            options.with_format(name, *check);
        }
        options.should_validate_formats(true);
    }
}

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex")
});
static DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[Tt]\d{2}:\d{2}:\d{2}(\.\d+)?([Zz]|[+-]\d{2}:\d{2})$")
        .expect("date-time regex")
});
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));
static UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("uuid regex")
});
static URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:\S+$").expect("uri regex"));
static HOSTNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .expect("hostname regex")
});
static BYTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$")
        .expect("byte regex")
});

fn is_date(value: &str) -> bool {
    DATE.is_match(value)
}

fn is_date_time(value: &str) -> bool {
    DATE_TIME.is_match(value)
}

fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

fn is_uuid(value: &str) -> bool {
    UUID.is_match(value)
}

fn is_uri(value: &str) -> bool {
    URI.is_match(value)
}

fn is_hostname(value: &str) -> bool {
    value.len() <= 253 && HOSTNAME.is_match(value)
}

fn is_ipv4(value: &str) -> bool {
    value.parse::<std::net::Ipv4Addr>().is_ok()
}

fn is_ipv6(value: &str) -> bool {
    value.parse::<std::net::Ipv6Addr>().is_ok()
}

fn is_byte(value: &str) -> bool {
    value.len() % 4 == 0 && BYTE.is_match(value)
}
