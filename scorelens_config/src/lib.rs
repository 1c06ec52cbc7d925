pub mod config;
pub mod parser;
pub mod status;

pub use config::{
    AnalyzerConfig, FetchSettings, LangfuseSettings, RegressionThresholds, ENV_HOST,
    ENV_PUBLIC_KEY, ENV_SECRET_KEY,
};
pub use parser::{load_config_from_file, parse_config_from_str};
pub use status::{EnvStatus, EnvVarStatus};
