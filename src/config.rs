use clap::Parser;
use figment::{
    Figment,
    providers::{Format, Json, Serialized, Toml, Yaml},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::OnceCell;

const DEFAULT_CONFIG_PATH: &str = "config.toml";
static CONFIG: OnceCell<Config> = OnceCell::const_new();

#[derive(clap::ValueEnum, Clone, Copy, Debug, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Scored and ranked dupe candidates (strict clothing filtering)
    Dupes,
    /// Normalized shopping results without scoring
    Search,
}

#[derive(Parser, Serialize, Debug)]
#[command(version, about = "Find cheaper clothing alternatives for a shopping query")]
pub struct CliArgs {
    /// Shopping query, e.g. "satin slip dress"
    #[serde(skip_serializing)]
    pub query: String,

    /// Maximum number of results to return (1-20)
    #[arg(short = 'n', long, default_value_t = 8)]
    #[serde(skip_serializing)]
    pub max_results: usize,

    /// Pipeline mode
    #[arg(short, long, value_enum, default_value_t = Mode::Dupes)]
    #[serde(skip_serializing)]
    pub mode: Mode,

    /// Tavily API key
    #[arg(long, env = "TAVILY_API_KEY")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tavily_api_key: Option<String>,

    /// Per-page image fetch timeout in seconds
    #[arg(long, env = "DUPEFINDER_RESOLVER_TIMEOUT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver_timeout: Option<u64>,

    /// Per-candidate enrichment deadline in seconds
    #[arg(long, env = "DUPEFINDER_ENRICH_TIMEOUT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrich_timeout: Option<u64>,

    /// Concurrent image fetches during enrichment
    #[arg(long, env = "DUPEFINDER_ENRICH_CONCURRENCY")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrich_concurrency: Option<usize>,

    /// Config file path (default: "config.toml")
    #[arg(short, long, env = "DUPEFINDER_CONFIG")]
    #[serde(skip_serializing)]
    pub config: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Config {
    /// Tavily API key
    pub tavily_api_key: Option<String>,
    /// Per-page image fetch timeout in seconds
    pub resolver_timeout: u64,
    /// Per-candidate enrichment deadline in seconds
    pub enrich_timeout: u64,
    /// Concurrent image fetches during enrichment
    pub enrich_concurrency: usize,
}

pub fn init_config(args: &CliArgs) -> &'static Config {
    if !CONFIG.initialized() {
        let config = load_config(args);
        CONFIG.set(config).unwrap();
    }

    CONFIG.get().unwrap()
}

fn load_config(args: &CliArgs) -> Config {
    let defaults = json!({
        "resolver_timeout": 6,
        "enrich_timeout": 5,
        "enrich_concurrency": 8,
    });

    let mut figment = Figment::new().merge(Serialized::defaults(defaults));

    let config_path = std::path::PathBuf::from(
        &args
            .config
            .clone()
            .unwrap_or(DEFAULT_CONFIG_PATH.to_string()),
    );

    if config_path.exists() {
        log::info!("Config file found: {}", config_path.display());
        match config_path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => figment = figment.merge(Toml::file(config_path)),
            Some("json") => figment = figment.merge(Json::file(config_path)),
            Some("yaml") | Some("yml") => figment = figment.merge(Yaml::file(config_path)),
            _ => {
                log::error!("Cannot identify config file type. Must be .toml, .json or .yaml");
                std::process::exit(1);
            }
        };
    } else if config_path.to_str() != Some(DEFAULT_CONFIG_PATH) {
        log::warn!("Config file not found: {}", config_path.display());
        std::process::exit(1);
    };

    let config: Config = match figment.merge(Serialized::defaults(args)).extract() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };

    log::debug!("Loaded config: {:#?}", config);

    config
}
