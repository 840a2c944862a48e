use clap::Parser;
use tracing_subscriber::EnvFilter;
use wealthcalc::cli::{Cli, Command, run_calculator};

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => {
            if let Err(e) = wealthcalc::api::run_http_server(args.socket_addr()).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Calculator(calculator) => match run_calculator(&calculator) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
