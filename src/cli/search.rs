//! Geocode, suggest and place command handlers
//!
//! Run one adapter operation against the configured provider and print the
//! widget payload. Provider failures are logged to stderr and print the
//! empty payload, exactly as the server would answer.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geocode::adapter::{AdapterConfig, GeocodeResultAdapter};
use crate::geocode::amazon::AmazonLocationProvider;
use crate::geocode::{
    ForwardGeocodeResponse, GenericFeature, GeocodeRequest, PlaceResponse, SuggestionsResponse,
};
use clap::Args;

/// Lookup command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Search text, or a place id for `place`
    pub query: String,

    /// Place index (defaults to provider.index_name)
    #[arg(long, short = 'i')]
    pub index: Option<String>,

    /// Output format: json or text
    #[arg(long, short = 'f', default_value = "json")]
    pub format: String,
}

/// Which adapter operation to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Geocode,
    Suggest,
    Place,
}

/// Run a lookup command
pub async fn run(operation: Operation, args: SearchArgs) -> Result<()> {
    super::init_logging("warn");

    let text = match args.format.to_lowercase().as_str() {
        "json" => false,
        "text" => true,
        other => return Err(Error::Config(format!("Unknown format: {}", other))),
    };

    let config = Config::load()?;
    let provider = AmazonLocationProvider::new(&config.provider)?;
    let adapter = GeocodeResultAdapter::new(
        provider,
        AdapterConfig::new(config.provider.index_name.clone()),
    );

    let request = GeocodeRequest {
        query: args.query,
        index: args.index,
    };

    let output = match operation {
        Operation::Geocode => {
            let response = adapter.forward_geocode(&request).await;
            if text {
                render_features(&response)
            } else {
                serde_json::to_string_pretty(&response)?
            }
        }
        Operation::Suggest => {
            let response = adapter.get_suggestions(&request).await;
            if text {
                render_suggestions(&response)
            } else {
                serde_json::to_string_pretty(&response)?
            }
        }
        Operation::Place => {
            let response = adapter.resolve_suggestion(&request).await;
            if text {
                render_place(&response)
            } else {
                serde_json::to_string_pretty(&response)?
            }
        }
    };

    println!("{}", output);
    Ok(())
}

fn feature_line(feature: &GenericFeature) -> String {
    format!(
        "{} ({:.6}, {:.6})",
        feature.place_name, feature.center.lng, feature.center.lat
    )
}

fn render_features(response: &ForwardGeocodeResponse) -> String {
    if response.features.is_empty() {
        return "No results.".to_string();
    }

    response
        .features
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{:>2}. {}", i + 1, feature_line(f)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_suggestions(response: &SuggestionsResponse) -> String {
    if response.suggestions.is_empty() {
        return "No suggestions.".to_string();
    }

    response
        .suggestions
        .iter()
        .map(|s| format!("{}\t{}", s.place_id, s.text))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_place(response: &PlaceResponse) -> String {
    match &response.place {
        Some(feature) => feature_line(feature),
        None => "Place not found.".to_string(),
    }
}
