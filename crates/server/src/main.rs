//! cellgated - HTTP gateway to a column-family store.
//!
//! ```text
//! cellgated [--config gateway.toml] [--bind 0.0.0.0:8080] [--log-level debug]
//! ```

use std::process;

use clap::{Arg, ArgMatches, Command};

use cellgate_server::{build_state, init_logging, serve, GatewayConfig};

fn build_cli() -> Command {
    Command::new("cellgated")
        .version(env!("CARGO_PKG_VERSION"))
        .about("HTTP gateway to a column-family store")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("bind")
                .short('b')
                .long("bind")
                .value_name("ADDR")
                .help("Listen address, overrides [server] bind"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level or filter, overrides [logging] level"),
        )
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<GatewayConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => GatewayConfig::load(path)?,
        None => GatewayConfig::default(),
    };

    if let Some(bind) = matches.get_one::<String>("bind") {
        config.server.bind = bind.clone();
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(2);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{:#}", e);
        process::exit(2);
    }

    let result = match build_state(&config) {
        Ok(state) => serve(&config, state).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        tracing::error!(error = ?e, "Gateway exited with error");
        process::exit(1);
    }
}
