use std::process;

use clap::Parser;
use tracing::{dispatcher, error};

use quaderno::{
    application::router::Route,
    config::{self, CliArgs, Command},
    infra::{api::ApiClient, telemetry},
    presentation::{CliError, commands, console},
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report(&error);
        process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    let cli = CliArgs::parse();
    let settings = config::load(&cli)?;
    telemetry::init(&settings.logging)?;

    let client = ApiClient::new(settings.backend.base_url.as_str())?;

    match cli.command {
        Command::Console(args) => {
            let route = Route::parse(&args.route)
                .ok_or_else(|| CliError::InvalidInput(format!("unknown route `{}`", args.route)))?;
            console::run(client, route).await
        }
        Command::Posts(args) => commands::handle(&client, args.action).await,
    }
}

fn report(error: &CliError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "fatal error");
    } else {
        eprintln!("error: {error}");
    }
}
