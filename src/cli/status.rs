//! Status command handler
//!
//! Shows provider configuration and, optionally, whether the server is up.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Check if server is running (tries to connect)
    #[arg(long)]
    pub server: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;

    println!("geocoder-bridge v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Provider: Amazon Location ({})", config.provider.endpoint());
    println!(
        "  Index:   {}",
        or_unset(&config.provider.index_name)
    );
    println!(
        "  API key: {}",
        if config.provider.api_key.is_empty() { "(not set)" } else { "configured" }
    );
    match config.provider.validate() {
        Ok(()) => println!("  Ready:   yes"),
        Err(e) => println!("  Ready:   no ({})", e),
    }
    println!();

    println!("Map: {}", or_unset(&config.map.name));
    println!();

    if args.server {
        check_server_status(&config).await;
    }

    Ok(())
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/api/status", config.server_addr());

    match reqwest::get(&url).await {
        Ok(response) if response.status().is_success() => {
            println!("Server: RUNNING on {}", config.server_addr());
            if let Ok(status) = response.json::<serde_json::Value>().await {
                if let Some(version) = status.get("version").and_then(|v| v.as_str()) {
                    println!("  Version: {}", version);
                }
                if let Some(index) = status.get("default_index").and_then(|v| v.as_str()) {
                    println!("  Index:   {}", index);
                }
            }
        }
        Ok(response) => {
            println!("Server: ERROR (status {})", response.status());
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
}
