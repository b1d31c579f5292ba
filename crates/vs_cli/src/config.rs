use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::Level;
use url::Url;
use vs_core::ServiceConfig;
use vs_verify::{Endpoints, DEFAULT_INFERENCE_URL, DEFAULT_TIMEOUT, DEFAULT_TRAINING_URL};
use vs_web::cors::{CorsConfig, DEFAULT_ALLOWED_ORIGIN};
use vs_worker::{WorkerConfig, DEFAULT_TOTAL_JOBS};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: Level,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the inference service, or the training service with --training
    Serve(ServeArgs),
    /// Check a running inference and training instance against local digests
    Verify(VerifyArgs),
    /// Run the background job worker
    Worker(WorkerArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Mount the training endpoint instead of the inference one
    #[arg(long, env = "IS_TRAINING", value_parser = BoolishValueParser::new())]
    pub training: bool,
    #[arg(long, env = "SERVICE_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,
    #[arg(long, env = "SERVICE_PORT", default_value_t = 5000)]
    pub port: u16,
    /// Origins allowed by the CORS policy (comma separated)
    #[arg(
        long = "allowed-origin",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = DEFAULT_ALLOWED_ORIGIN
    )]
    pub allowed_origins: Vec<String>,
}

impl ServeArgs {
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig::new(self.training)
    }

    pub fn cors_config(&self) -> CorsConfig {
        CorsConfig::new(self.allowed_origins.clone())
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[arg(long, env = "INFERENCE_URL", default_value = DEFAULT_INFERENCE_URL)]
    pub inference_url: Url,
    #[arg(long, env = "TRAINING_URL", default_value = DEFAULT_TRAINING_URL)]
    pub training_url: Url,
    /// Per-request timeout
    #[arg(long, env = "VERIFY_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

impl VerifyArgs {
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            inference: self.inference_url.clone(),
            training: self.training_url.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Args, Debug)]
pub struct WorkerArgs {
    #[arg(long, env = "API_KEY")]
    pub api_key: Option<String>,
    #[arg(long, env = "WORKER_JOBS", default_value_t = DEFAULT_TOTAL_JOBS)]
    pub jobs: u32,
    /// Pause before each job
    #[arg(long, env = "WORKER_INTERVAL_MS", default_value_t = 1000)]
    pub interval_ms: u64,
}

impl WorkerArgs {
    pub fn worker_config(&self) -> WorkerConfig {
        WorkerConfig {
            api_key: self.api_key.clone(),
            total_jobs: self.jobs,
            interval: Duration::from_millis(self.interval_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vs_core::Variant;

    #[test]
    fn test_serve_defaults_to_inference() {
        let cli = Cli::try_parse_from(["vs", "serve", "--port", "5001"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(args.service_config().variant(), Variant::Inference);
        assert_eq!(args.addr().port(), 5001);
        assert_eq!(args.cors_config(), CorsConfig::default());
    }

    #[test]
    fn test_serve_training_with_origins() {
        let cli = Cli::try_parse_from([
            "vs",
            "serve",
            "--training",
            "--allowed-origin",
            "http://localhost:5000,http://example.com",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(args.service_config().variant(), Variant::Training);
        assert_eq!(
            args.cors_config().allowed_origins,
            vec!["http://localhost:5000", "http://example.com"]
        );
    }

    #[test]
    fn test_verify_endpoints() {
        let cli = Cli::try_parse_from(["vs", "verify", "--training-url", "http://10.0.0.2:8080"]).unwrap();
        let Commands::Verify(args) = cli.command else {
            panic!("expected verify command");
        };
        let endpoints = args.endpoints();
        assert_eq!(
            endpoints.url_for(Variant::Inference).unwrap().as_str(),
            "http://localhost:5001/inference"
        );
        assert_eq!(
            endpoints.url_for(Variant::Training).unwrap().as_str(),
            "http://10.0.0.2:8080/training"
        );
        assert_eq!(args.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_worker_defaults() {
        let cli = Cli::try_parse_from(["vs", "worker", "--api-key", "abc"]).unwrap();
        let Commands::Worker(args) = cli.command else {
            panic!("expected worker command");
        };
        let config = args.worker_config();
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.total_jobs, DEFAULT_TOTAL_JOBS);
        assert_eq!(config.interval, Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        assert!(Cli::try_parse_from(["vs", "--log-level", "loud", "worker"]).is_err());
    }
}
