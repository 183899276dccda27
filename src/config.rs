use serde::{Deserialize, Serialize};

use crate::protocol::SoundnessParameter;
use crate::Result;

/// Default soundness parameter in bits.
pub const DEFAULT_SOUNDNESS_BITS: usize = 80;

/// Protocol configuration.
///
/// Nothing in the crate reads this implicitly; pass [`SigmaConfig::soundness`]
/// to the role constructors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigmaConfig {
    /// Challenge length `t` in bits.
    pub soundness_bits: usize,
}

impl Default for SigmaConfig {
    fn default() -> Self {
        Self {
            soundness_bits: DEFAULT_SOUNDNESS_BITS,
        }
    }
}

impl SigmaConfig {
    pub fn with_soundness_bits(soundness_bits: usize) -> Self {
        Self { soundness_bits }
    }

    /// Loads configuration from `.env`, a TOML file, and environment variables.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables with the `SIGMA_` prefix
    /// 2. TOML file at `SIGMA_CONFIG_PATH`, default `config/sigma.toml`
    /// 3. Built-in defaults
    ///
    /// A missing `.env` or TOML file is skipped.
    ///
    /// ```bash
    /// SIGMA_SOUNDNESS_BITS=128
    /// ```
    ///
    /// # Errors
    /// Returns an error if a source is malformed.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> figment::error::Result<Self> {
        use figment::providers::{Env, Format, Serialized, Toml};
        use figment::Figment;

        let _ = dotenvy::dotenv();

        let config_path = std::env::var("SIGMA_CONFIG_PATH")
            .unwrap_or_else(|_| "config/sigma.toml".to_string());

        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("SIGMA_").ignore(&["config_path"]))
            .extract()?;
        tracing::debug!(soundness_bits = config.soundness_bits, "configuration loaded");
        Ok(config)
    }

    /// # Errors
    /// Returns [`Error::InvalidParameter`](crate::Error::InvalidParameter)
    /// unless `soundness_bits` is a positive multiple of 8 no larger than
    /// [`MAX_SOUNDNESS_BITS`](crate::protocol::MAX_SOUNDNESS_BITS).
    pub fn validate(&self) -> Result<()> {
        self.soundness().map(|_| ())
    }

    /// Returns the checked soundness parameter.
    pub fn soundness(&self) -> Result<SoundnessParameter> {
        SoundnessParameter::new(self.soundness_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_to_eighty_bits() {
        let config = SigmaConfig::default();
        assert_eq!(config.soundness_bits, 80);
        assert_eq!(config.soundness().unwrap().challenge_len(), 10);
    }

    #[test]
    fn loads_toml_then_env() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file("config/sigma.toml", "soundness_bits = 128")?;
            assert_eq!(SigmaConfig::from_env()?.soundness_bits, 128);

            jail.set_env("SIGMA_SOUNDNESS_BITS", "256");
            assert_eq!(SigmaConfig::from_env()?.soundness_bits, 256);
            Ok(())
        });
    }

    #[test]
    fn honours_config_path() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "soundness_bits = 40")?;
            jail.set_env("SIGMA_CONFIG_PATH", "custom.toml");
            assert_eq!(SigmaConfig::from_env()?.soundness_bits, 40);
            Ok(())
        });
    }

    #[test]
    fn missing_sources_fall_back_to_defaults() {
        Jail::expect_with(|_| {
            assert_eq!(SigmaConfig::from_env()?, SigmaConfig::default());
            Ok(())
        });
    }

    #[test]
    fn rejects_unaligned_soundness() {
        assert!(SigmaConfig::with_soundness_bits(0).validate().is_err());
        assert!(SigmaConfig::with_soundness_bits(81).validate().is_err());
        assert!(SigmaConfig::with_soundness_bits(64).validate().is_ok());
    }

    #[test]
    fn rejects_oversized_soundness_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("SIGMA_SOUNDNESS_BITS", "1099511627776");
            let config = SigmaConfig::from_env()?;
            assert!(config.validate().unwrap_err().is_invalid_parameter());
            Ok(())
        });
    }
}
