use crate::tools::deserialize_option_bool;
use crate::tools::openai::OpenAiConfig;
use crate::tools::telegram::TelegramConfig;
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AppConfig {
    #[serde(flatten)]
    pub openai: OpenAiConfig,
    #[serde(flatten)]
    pub telegram: TelegramConfig,

    #[serde(
        rename = "jobbrief_dry_run",
        default,
        deserialize_with = "deserialize_option_bool"
    )]
    pub dry_run: Option<bool>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(envy::from_env::<AppConfig>()?)
    }
}

/// Loads variables from a dotenv file without overriding ones already set.
pub fn load_dotenv(path: impl AsRef<Path>) -> Result<(), dotenvy::Error> {
    dotenvy::from_path(path.as_ref())
}
