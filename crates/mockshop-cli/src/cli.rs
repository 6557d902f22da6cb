use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mockshop",
    about = "Mockshop: JSON-file backed e-commerce REST backend",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file (defaults to ./mockshop.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the collection documents
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create or repair every collection document
    Init(InitArgs),
    /// Start the REST server
    Serve(ServeArgs),
    /// Show record counts per collection
    Stats(StatsArgs),
    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct InitArgs {}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Disable the permissive CORS layer
    #[arg(long)]
    pub no_cors: bool,
}

#[derive(Args)]
pub struct StatsArgs {}

#[derive(Args)]
pub struct ConfigArgs {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::try_parse_from(["mockshop", "init"]).unwrap();
        assert!(matches!(cli.command, Command::Init(_)));
        assert!(cli.config.is_none());
        assert!(cli.data_dir.is_none());
    }

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["mockshop", "serve", "--bind", "0.0.0.0:8080", "--no-cors"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("0.0.0.0:8080".parse().unwrap()));
            assert!(args.no_cors);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve_rejects_bad_address() {
        assert!(Cli::try_parse_from(["mockshop", "serve", "--bind", "localhost"]).is_err());
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mockshop", "stats", "--data-dir", "/tmp/shop", "-c", "shop.toml"]).unwrap();
        assert!(matches!(cli.command, Command::Stats(_)));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/shop")));
        assert_eq!(cli.config, Some(PathBuf::from("shop.toml")));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["mockshop", "--verbose", "init"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["mockshop", "--format", "json", "stats"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
