use std::env;
use std::process::ExitCode;

use config::Config;
use dotenvy::dotenv;

use pushkind_fleet::models::config::ServerConfig;
use pushkind_fleet::{build_repository, run};

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // `APP_PORT`, `APP_UPSTREAM__BASE_URL`, ...
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match load_config() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            return ExitCode::FAILURE;
        }
    };

    // The upstream client blocks, so the repository is built before the
    // runtime starts and dropped after it stops.
    let repo = match build_repository(&server_config) {
        Ok(repo) => repo,
        Err(err) => {
            log::error!("Error building the repository: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = actix_web::rt::System::new().block_on(run(server_config, repo.clone()));
    drop(repo);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Server error: {err}");
            ExitCode::FAILURE
        }
    }
}
