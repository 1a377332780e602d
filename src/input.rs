// input: Quote data supplied from a JSON file and command-line overrides

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::quote::{ClientDetails, NewItem};

/// Contents of a quote file:
///
/// ```json
/// {
///   "customer_name": "Maria Lopez",
///   "customer_email": "maria@example.com",
///   "customer_phone": "(305) 555-0100",
///   "customer_address": "1 Ocean Dr, Miami, FL",
///   "project_description": "Retile the master bathroom.",
///   "items": [{ "description": "Porcelain tile", "quantity": 120, "price": 8.75 }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuoteInput {
    #[serde(flatten)]
    pub client: ClientDetails,
    #[serde(default)]
    pub items: Vec<NewItem>,
}

/// Field values given directly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ClientOverrides {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub project_description: Option<String>,
}

impl QuoteInput {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::QuoteFileError(format!("{}: {}", path.display(), e)))?;
        let input = Self::from_json(&content)?;
        debug!(path = %path.display(), items = input.items.len(), "loaded quote file");
        Ok(input)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| AppError::QuoteFileError(format!("Invalid JSON: {}", e)))
    }

    /// Command-line values win over file values.
    pub fn apply(&mut self, overrides: ClientOverrides) {
        let client = &mut self.client;
        let fields = [
            (&mut client.customer_name, overrides.customer_name),
            (&mut client.customer_email, overrides.customer_email),
            (&mut client.customer_phone, overrides.customer_phone),
            (&mut client.customer_address, overrides.customer_address),
            (&mut client.project_description, overrides.project_description),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

/// Parses a `DESCRIPTION:QUANTITY:PRICE` item argument.
pub fn parse_item_arg(arg: &str) -> Result<NewItem> {
    arg.parse::<NewItem>()
        .map_err(|e| AppError::ItemSyntax(format!("{} ({})", arg, e)))
}
