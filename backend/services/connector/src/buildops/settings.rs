use std::fmt;

use buildops_common::error::ConnectorResult;
use buildops_sdk::Configuration;

pub const REQUIRED_KEYS: [&str; 4] = ["host", "client_id", "client_secret", "tenant_id"];

/// Connection settings that passed validation.
#[derive(Clone, PartialEq, Eq)]
pub struct BuildOpsSettings {
    pub host: String,
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
}

impl BuildOpsSettings {
    /// `{host}{path}` without doubling the slash when host ends with one.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.host.trim_end_matches('/'), path)
    }
}

impl fmt::Debug for BuildOpsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildOpsSettings")
            .field("host", &self.host)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}

/// Checks every required key and reports all missing ones at once.
/// Runs before any network call.
pub fn validate_configuration(configuration: &Configuration) -> ConnectorResult<BuildOpsSettings> {
    configuration.require(&REQUIRED_KEYS)?;

    let value = |key: &str| {
        configuration
            .non_empty(key)
            .map(str::to_owned)
            .unwrap_or_default()
    };

    Ok(BuildOpsSettings {
        host: value("host"),
        client_id: value("client_id"),
        client_secret: value("client_secret"),
        tenant_id: value("tenant_id"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildops_common::error::ConnectorError;

    fn full_configuration() -> Configuration {
        Configuration::new()
            .with("host", "https://api.buildops.test")
            .with("client_id", "client-1")
            .with("client_secret", "s3cret")
            .with("tenant_id", "tenant-9")
    }

    #[test]
    fn accepts_complete_configuration() {
        let settings = validate_configuration(&full_configuration()).expect("should validate");
        assert_eq!(settings.host, "https://api.buildops.test");
        assert_eq!(settings.client_id, "client-1");
        assert_eq!(settings.tenant_id, "tenant-9");
    }

    #[test]
    fn accepts_values_the_api_may_later_reject() {
        let cfg = Configuration::new()
            .with("host", "not a url")
            .with("client_id", "x")
            .with("client_secret", "y")
            .with("tenant_id", "z");
        assert!(validate_configuration(&cfg).is_ok());
    }

    #[test]
    fn names_every_missing_key() {
        let cases: Vec<(Configuration, Vec<&str>)> = vec![
            (Configuration::new(), REQUIRED_KEYS.to_vec()),
            (
                Configuration::new().with("host", "h"),
                vec!["client_id", "client_secret", "tenant_id"],
            ),
            (
                full_configuration().with("client_secret", ""),
                vec!["client_secret"],
            ),
            (
                Configuration::new()
                    .with("client_id", "c")
                    .with("client_secret", "s"),
                vec!["host", "tenant_id"],
            ),
        ];

        for (cfg, expected) in cases {
            match validate_configuration(&cfg).unwrap_err() {
                ConnectorError::MissingConfiguration(missing) => assert_eq!(missing, expected),
                other => panic!("expected MissingConfiguration, got: {other:?}"),
            }
        }
    }

    #[test]
    fn url_joins_without_double_slash() {
        let mut settings = validate_configuration(&full_configuration()).unwrap();
        assert_eq!(
            settings.url("/v1/customers"),
            "https://api.buildops.test/v1/customers"
        );
        settings.host.push('/');
        assert_eq!(
            settings.url("/v1/customers"),
            "https://api.buildops.test/v1/customers"
        );
    }

    #[test]
    fn debug_output_hides_secret() {
        let settings = validate_configuration(&full_configuration()).unwrap();
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("client-1"));
    }
}
