use clap::{Args as ClapArgs, Parser};
use fridgechef_core::domain::common::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, FridgeChefConfig, LLMConfig,
    entities::app_errors::CoreError,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "fridgechef", version, about = "Turns a fridge photo into dish ideas")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "port", env = "PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix prepended to every route, e.g. `/api`.
    #[arg(long = "root-path", env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long = "perception-model", env = "PERCEPTION_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub perception_model: String,

    #[arg(long = "reasoning-model", env = "REASONING_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub reasoning_model: String,

    #[arg(long = "gemini-base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    #[arg(long = "request-timeout-secs", env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// Default filter when `RUST_LOG` is not set.
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl TryFrom<Args> for FridgeChefConfig {
    type Error = CoreError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let api_key = args
            .llm
            .gemini_api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                CoreError::ConfigurationError(
                    "API key not found. Set GOOGLE_API_KEY (or --gemini-api-key) before starting the service."
                        .to_string(),
                )
            })?;

        let mut llm = LLMConfig::new(api_key)
            .with_base_url(args.llm.gemini_base_url)
            .with_models(args.llm.perception_model, args.llm.reasoning_model);
        llm.request_timeout_secs = args.llm.request_timeout_secs;
        llm.validate()?;

        Ok(FridgeChefConfig { llm })
    }
}
