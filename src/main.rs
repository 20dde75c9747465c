use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing::{error, info, warn};

use sporlgate::{
    config::{self, Config},
    logging, server, spotify,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP service
    Serve(ServeOptions),

    /// Print the Spotify authorization URL
    Authorize(AuthorizeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS
    #[clap(long)]
    pub addr: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct AuthorizeOptions {
    /// Open the URL in the default browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn load_config() -> Config {
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Cannot load configuration. Err: {}", e);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // env files may carry RUST_LOG, so load them before the subscriber
    let env_files = config::load_env().await;
    logging::init(cli.verbose);

    match env_files {
        Ok(paths) => {
            for path in paths {
                info!(path = %path.display(), "loaded env file");
            }
        }
        Err(e) => warn!("Cannot load env file, using process environment only. Err: {}", e),
    }

    match cli.command {
        Command::Serve(opt) => {
            let mut config = load_config();
            if let Some(addr) = opt.addr {
                config.server_addr = addr;
            }

            if let Err(e) = server::start_api_server(config).await {
                error!("Server stopped. Err: {}", e);
                std::process::exit(1);
            }
        }
        Command::Authorize(opt) => {
            let config = load_config();
            let url = spotify::auth::authorization_url(&config.spotify);
            println!("{}", url);

            if opt.open && webbrowser::open(&url).is_err() {
                warn!("Failed to open browser. Please navigate to the URL above manually.");
            }
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
