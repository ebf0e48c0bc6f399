//! Model discovery commands for jibu
//!
//! Lists the models available at the configured endpoint, as a table for
//! humans or as JSON for tooling.

use crate::config::Config;
use crate::error::Result;
use crate::generate::{self, ModelInfo};
use prettytable::{cell, row, Table};

/// List models available at the endpoint
///
/// # Arguments
///
/// * `config` - Configuration containing endpoint settings
/// * `json` - If true, print JSON instead of a table
///
/// # Errors
///
/// Returns error if the listing call fails
pub async fn list_models(config: &Config, json: bool) -> Result<()> {
    tracing::info!("Listing models from endpoint");

    let generator = generate::create_generator(&config.endpoint)?;
    let models = generator.list_models().await?;

    if models.is_empty() {
        if json {
            println!("[]");
        } else {
            println!("No models available at the endpoint");
        }
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
    } else {
        output_models_table(&models);
    }

    Ok(())
}

/// Render the model list as a table
fn output_models_table(models: &[ModelInfo]) {
    let mut table = Table::new();
    table.add_row(row!["NAME", "DISPLAY NAME", "INPUT TOKENS", "OUTPUT TOKENS"]);

    for model in models {
        table.add_row(row![
            model.name,
            model.display_name,
            model.input_token_limit,
            model.output_token_limit
        ]);
    }

    table.printstd();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_models_table_does_not_panic() {
        let models = vec![ModelInfo {
            name: "models/gemini-1.0-pro".to_string(),
            display_name: "Gemini 1.0 Pro".to_string(),
            input_token_limit: 30720,
            output_token_limit: 2048,
        }];
        output_models_table(&models);
    }
}
