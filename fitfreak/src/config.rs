//! This module defines the configuration of a fitfreak session.
//! It is read from a RON file, every field can be omitted.

use ff_pose_payloads::ExerciseKind;
use fitfreak_traits::{FfError, FfResult};
use ron::extensions::Extensions;
use ron::Options;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

/// Tunables of a [`crate::session::Session`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Keypoints with a confidence strictly under this are dropped before dispatch.
    pub min_confidence: f32,
    /// Exercise selected when the session starts.
    pub exercise: Option<ExerciseKind>,
    /// Reset the counter of an exercise every time it gets selected.
    pub reset_on_switch: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
            exercise: None,
            reset_on_switch: false,
        }
    }
}

impl SessionConfig {
    fn get_options() -> Options {
        Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .with_default_extension(Extensions::UNWRAP_NEWTYPES)
            .with_default_extension(Extensions::UNWRAP_VARIANT_NEWTYPES)
    }

    pub fn serialize_ron(&self) -> FfResult<String> {
        let ron = Self::get_options();
        let pretty = ron::ser::PrettyConfig::default();
        ron.to_string_pretty(&self, pretty)
            .map_err(|e| FfError::new_with_cause("Failed to serialize configuration", e))
    }

    pub fn deserialize_ron(ron: &str) -> FfResult<Self> {
        let config: SessionConfig = Self::get_options()
            .from_str(ron)
            .map_err(|e| FfError::new_with_cause("Syntax Error in config", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> FfResult<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(format!(
                "min_confidence must be within [0, 1], got {}",
                self.min_confidence
            )
            .into());
        }
        Ok(())
    }
}

/// Read a session configuration from a file.
pub fn read_configuration(config_filename: &Path) -> FfResult<SessionConfig> {
    let config_content = read_to_string(config_filename).map_err(|e| {
        FfError::from(format!(
            "Failed to read configuration file: {:?}",
            &config_filename
        ))
        .add_cause(e.to_string().as_str())
    })?;
    SessionConfig::deserialize_ron(&config_content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let config = SessionConfig::deserialize_ron("()").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = SessionConfig::deserialize_ron(
            r#"(
                exercise: "Jumping Jacks",
                reset_on_switch: true,
            )"#,
        )
        .unwrap();
        assert_eq!(config.exercise, Some(ExerciseKind::JumpingJacks));
        assert!(config.reset_on_switch);
        assert_eq!(config.min_confidence, 0.0);
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = SessionConfig {
            min_confidence: 0.3,
            exercise: Some(ExerciseKind::TreePose),
            reset_on_switch: true,
        };
        let serialized = config.serialize_ron().unwrap();
        assert!(serialized.contains("Tree Pose"));
        assert_eq!(SessionConfig::deserialize_ron(&serialized).unwrap(), config);
    }

    #[test]
    fn test_bad_configs() {
        let err = SessionConfig::deserialize_ron("(exercise: \"Plank\")").unwrap_err();
        assert_eq!(err.message(), "Syntax Error in config");
        assert!(err.cause().unwrap().contains("Plank"));

        assert!(SessionConfig::deserialize_ron("(min_confidence: 1.5)").is_err());
        assert!(SessionConfig::deserialize_ron("(speed: 2)").is_ok());
    }

    #[test]
    fn test_read_configuration() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(min_confidence: 0.3, exercise: \"Squats\")").unwrap();
        let config = read_configuration(file.path()).unwrap();
        assert_eq!(config.exercise, Some(ExerciseKind::Squats));
        assert_eq!(config.min_confidence, 0.3);

        let missing = file.path().with_extension("missing");
        let err = read_configuration(&missing).unwrap_err();
        assert!(err.message().starts_with("Failed to read configuration file"));
        assert!(err.cause().is_some());
    }
}
