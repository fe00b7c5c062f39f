use serde::{Deserialize, Serialize};

use crate::errors::{UnmarshalError, UnmarshalResult};
use crate::types::Urlstruct;
use crate::values::Values;

/// What `unmarshal` does when a parameter fails to convert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop at the first failing parameter.
    #[default]
    FailFast,
    /// Decode every parameter and report all failures together.
    Collect,
}

/// Decoder settings, loadable from an application's configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub error_policy: ErrorPolicy,
}

/// Decodes whole parameter sets into records.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes every parameter of `values` into `record`, in sorted key order.
    ///
    /// Keys without a matching field are ignored. Fields that decoded
    /// successfully before a failure keep their new values.
    pub fn unmarshal<T: Urlstruct>(&self, values: &Values, record: &mut T) -> UnmarshalResult<()> {
        let info = T::struct_info();
        let mut errors = Vec::new();

        for (name, raw) in values.iter() {
            if let Err(err) = info.decode(record, name, raw) {
                errors.push(err);
                if self.config.error_policy == ErrorPolicy::FailFast {
                    break;
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(UnmarshalError::new(errors))
        }
    }
}

/// Decodes `values` into `record` with the default configuration.
pub fn unmarshal<T: Urlstruct>(values: &Values, record: &mut T) -> UnmarshalResult<()> {
    Decoder::default().unmarshal(values, record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_fail_fast() {
        assert_eq!(DecoderConfig::default().error_policy, ErrorPolicy::FailFast);
    }

    #[test]
    fn config_loads_from_json() {
        let config: DecoderConfig = serde_json::from_str(r#"{"error_policy":"collect"}"#).unwrap();
        assert_eq!(config.error_policy, ErrorPolicy::Collect);

        let empty: DecoderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, DecoderConfig::default());
    }
}
