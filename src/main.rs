use clap::Parser;

use kitfab::adapter::inbound::cli::{self, command::Cli, output};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
