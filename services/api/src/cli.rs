use crate::check::{run_check_connection, CheckConnectionArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use launchpad::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Launchpad API",
    about = "Run the Launchpad API or check its cloud storage connection from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Look up the system cloud storage connection once and print the result
    CheckConnection(CheckConnectionArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::CheckConnection(args) => run_check_connection(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["launchpad-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_check_connection_provider() {
        let cli = Cli::try_parse_from(["launchpad-api", "check-connection", "--provider", "box"])
            .expect("parses");
        match cli.command {
            Some(Command::CheckConnection(args)) => {
                assert_eq!(args.provider.as_deref(), Some("box"))
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from(["launchpad-api", "serve", "--port", "8080"]).expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
