//! meetdash CLI entry point.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use meetdash_api::{DEFAULT_BASE_URL, MeetingService};
use meetdash_core::{TracingConfig, ViewFilter};

use meetdash_client::cli::{Cli, Command, ConfigAction, GateAction};
use meetdash_client::commands;
use meetdash_client::commands::meetings::ListOptions;
use meetdash_client::commands::share::ShareOptions;
use meetdash_client::config::ClientConfig;
use meetdash_client::error::{ClientError, ClientResult};
use meetdash_client::session::SessionStore;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = meetdash_core::init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().unwrap_or_default()
    };

    let api_url = cli
        .api_url
        .clone()
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let timeout = Duration::from_secs(cli.timeout.unwrap_or(config.service.timeout));
    let service = MeetingService::new(&api_url, timeout)?;
    let store = SessionStore::default_location();

    match cli.command {
        Some(Command::Login {
            email,
            password,
            country_id,
            state_id,
        }) => commands::auth::login(&service, &store, email, password, country_id, state_id).await,

        Some(Command::Register {
            first_name,
            last_name,
            email,
            mobile_number,
            password,
            confirm_password,
            country_id,
            state_id,
        }) => {
            commands::auth::register(
                &service,
                first_name,
                last_name,
                email,
                mobile_number,
                password,
                confirm_password,
                country_id,
                state_id,
            )
            .await
        }

        Some(Command::Logout) => commands::auth::logout(&store),

        Some(Command::Whoami) => commands::auth::whoami(&service, &store).await,

        Some(Command::Create {
            topic,
            date,
            time,
            duration,
        }) => commands::meetings::create(&service, topic, date, time, duration).await,

        Some(Command::Countries) => commands::countries::list(&service).await,

        Some(Command::Share {
            meeting_id,
            host,
            gate,
            qr,
            svg,
            copy,
            open,
            delay,
        }) => {
            let options = ShareOptions {
                host,
                gate,
                qr,
                svg,
                copy,
                open,
                delay,
            };
            commands::share::share(&service, &store, &meeting_id, &options).await
        }

        Some(Command::Gate { action }) => match action {
            GateAction::Set { password } => commands::gate::set(&store, &password),
            GateAction::Clear => commands::gate::clear(&store),
            GateAction::Status => commands::gate::status(&store),
        },

        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },

        None => {
            let options = ListOptions {
                view: ViewFilter {
                    scope: cli.scope(),
                    hide_past: cli.hide_past,
                },
                format: cli.output_format(),
                expand: cli.expand.clone(),
                expand_all: cli.expand_all,
                max_topic_length: cli.max_topic_length.or(config.display.max_topic_length),
                show_urls: config.display.show_urls,
            };
            commands::meetings::list(&service, &options).await
        }
    }
}
