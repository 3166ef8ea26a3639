use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub tokenizer: TokenizerConfig,
}

/// What happens to the space or tab that marks a folded continuation line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldWhitespace {
    /// The folding byte is consumed and never appears in a value token.
    #[default]
    Discard,
    /// The folding byte is kept as the first byte of the next value token.
    Preserve,
}

/// When an unrecognized `ENCODING` parameter value is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingErrorOrdering {
    /// The error is returned in place of the offending parameter token.
    #[default]
    Immediate,
    /// The parameter token is returned first and the error on the next read.
    AfterParam,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TokenizerConfig {
    #[serde(default)]
    pub fold_whitespace: FoldWhitespace,
    #[serde(default)]
    pub encoding_error: EncodingErrorOrdering,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from an optional `cardlex.toml` and `CARDLEX_`
    /// environment variables. Environment variables take precedence over the file.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::defaults()?
            // TOML file
            .add_source(config::File::with_name("cardlex.toml").required(false))
            // Env, e.g. CARDLEX_TOKENIZER__FOLD_WHITESPACE=preserve
            .add_source(
                config::Environment::with_prefix("CARDLEX")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Builds settings from an in-memory TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or does not match `Settings`.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(Self::defaults()?
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("tokenizer.fold_whitespace", "discard")?
            .set_default("tokenizer.encoding_error", "immediate")?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(settings = ?settings, "Configuration loaded");
    Ok(settings)
}
