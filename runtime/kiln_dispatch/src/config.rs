//! Dispatch configuration.
//!
//! Defaults suit production use. Hosts can override them in code through the
//! builder-style setters, or from the process environment:
//!
//! - `KILN_DISPATCH_CACHE`: `0`/`false`/`off`/`no` disables the resolution cache
//! - `KILN_DISPATCH_AMBIGUITY`: `strict` or `registration-order`

/// Environment variable controlling the resolution cache.
pub const CACHE_VAR: &str = "KILN_DISPATCH_CACHE";

/// Environment variable controlling ambiguity handling.
pub const AMBIGUITY_VAR: &str = "KILN_DISPATCH_AMBIGUITY";

/// What to do when several candidates match and none is the most specific.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AmbiguityPolicy {
    /// Fail the call with `AmbiguousMethod`.
    #[default]
    Strict,
    /// Pick the earliest-registered of the most specific candidates.
    RegistrationOrder,
}

impl AmbiguityPolicy {
    /// Parse the environment spelling of a policy.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "registration-order" | "registration_order" => Some(Self::RegistrationOrder),
            _ => None,
        }
    }
}

/// Configuration for a dispatch table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Cache successful resolutions keyed by call site and argument tags.
    pub cache: bool,
    pub ambiguity: AmbiguityPolicy,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            cache: true,
            ambiguity: AmbiguityPolicy::Strict,
        }
    }
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the resolution cache.
    #[must_use]
    pub fn cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }

    /// Set the ambiguity policy.
    #[must_use]
    pub fn ambiguity(mut self, policy: AmbiguityPolicy) -> Self {
        self.ambiguity = policy;
        self
    }

    /// Defaults overridden by `KILN_DISPATCH_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    ///
    /// Unrecognized values are ignored with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(CACHE_VAR) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => config.cache = true,
                "0" | "false" | "off" | "no" => config.cache = false,
                _ => tracing::warn!(var = CACHE_VAR, value = %raw, "ignoring unrecognized value"),
            }
        }

        if let Some(raw) = lookup(AMBIGUITY_VAR) {
            match AmbiguityPolicy::from_name(&raw) {
                Some(policy) => config.ambiguity = policy,
                None => tracing::warn!(
                    var = AMBIGUITY_VAR,
                    value = %raw,
                    "ignoring unrecognized value"
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn defaults() {
        let config = DispatchConfig::default();
        assert!(config.cache);
        assert_eq!(config.ambiguity, AmbiguityPolicy::Strict);
        assert_eq!(DispatchConfig::from_lookup(|_| None), config);
    }

    #[test]
    fn builder_setters() {
        let config = DispatchConfig::new()
            .cache(false)
            .ambiguity(AmbiguityPolicy::RegistrationOrder);
        assert!(!config.cache);
        assert_eq!(config.ambiguity, AmbiguityPolicy::RegistrationOrder);
    }

    #[test]
    fn environment_overrides() {
        let config = DispatchConfig::from_lookup(lookup_from(&[
            (CACHE_VAR, "off"),
            (AMBIGUITY_VAR, "Registration-Order"),
        ]));
        assert!(!config.cache);
        assert_eq!(config.ambiguity, AmbiguityPolicy::RegistrationOrder);
    }

    #[test]
    fn unrecognized_values_keep_defaults() {
        let config = DispatchConfig::from_lookup(lookup_from(&[
            (CACHE_VAR, "sometimes"),
            (AMBIGUITY_VAR, "random"),
        ]));
        assert_eq!(config, DispatchConfig::default());
    }
}
