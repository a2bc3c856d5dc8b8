//! User-facing flows: each returns the notice to show.

use serde::Serialize;

use dukascan_core::{validate_product_form, validate_url, Product};

use crate::settings::SettingsStore;
use crate::sync::SyncClient;
use crate::types::SyncResult;

pub const SUCCESS: &str = "Success";
pub const ERROR: &str = "Error";
pub const VALIDATION_ERROR: &str = "Validation Error";
pub const CONFIGURATION_REQUIRED: &str = "Configuration Required";
pub const INVALID_URL: &str = "Invalid URL";
pub const NO_URL: &str = "No URL";

const BARCODE_REQUIRED: &str = "Barcode is required";
const CONFIGURE_FIRST: &str =
    "Please configure your Google Script URL in Settings before saving products.";
const UNEXPECTED: &str = "An unexpected error occurred. Please try again.";
const ENTER_URL: &str = "Please enter a Script URL";
const ENTER_HTTPS_URL: &str = "Please enter a valid HTTPS URL. The URL must start with https://";
const SETTINGS_SAVED: &str = "Settings saved successfully!";
const SETTINGS_SAVE_FAILED: &str = "Failed to save settings. Please try again.";
const ENTER_AND_SAVE_URL: &str = "Please enter and save a Script URL first";

/// A titled message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.title != SUCCESS
    }
}

impl From<SyncResult> for Notice {
    fn from(result: SyncResult) -> Self {
        let title = if result.success { SUCCESS } else { ERROR };
        Self::new(title, result.message)
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Validate the form, look up the endpoint, save.
pub async fn submit_product(
    settings: &dyn SettingsStore,
    client: &SyncClient,
    product: &Product,
) -> Notice {
    let form = validate_product_form(&product.name, &product.price, &product.quantity);
    let mut errors = form.errors;
    if product.barcode.trim().is_empty() {
        errors.insert(0, BARCODE_REQUIRED.to_string());
    }
    if !errors.is_empty() {
        return Notice::new(VALIDATION_ERROR, errors.join("\n"));
    }

    let url = match settings.get_script_url() {
        Ok(Some(url)) if !url.trim().is_empty() => url,
        Ok(_) => return Notice::new(CONFIGURATION_REQUIRED, CONFIGURE_FIRST),
        Err(e) => {
            tracing::error!("failed to read settings: {e}");
            return Notice::new(ERROR, UNEXPECTED);
        }
    };

    client.save_product(&url, product).await.into()
}

/// Stored endpoint, or empty when none (or unreadable).
pub fn load_settings(settings: &dyn SettingsStore) -> String {
    match settings.get_script_url() {
        Ok(url) => url.unwrap_or_default(),
        Err(e) => {
            tracing::error!("failed to load settings: {e}");
            String::new()
        }
    }
}

/// Validate and persist the endpoint.
pub fn save_settings(settings: &dyn SettingsStore, url: &str) -> Notice {
    let url = url.trim();
    if url.is_empty() {
        return Notice::new(VALIDATION_ERROR, ENTER_URL);
    }
    if !validate_url(url) {
        return Notice::new(INVALID_URL, ENTER_HTTPS_URL);
    }

    match settings.set_script_url(url) {
        Ok(()) => Notice::new(SUCCESS, SETTINGS_SAVED),
        Err(e) => {
            tracing::error!("failed to save settings: {e}");
            Notice::new(ERROR, SETTINGS_SAVE_FAILED)
        }
    }
}

/// Probe the endpoint currently entered.
pub async fn test_settings(client: &SyncClient, url: &str) -> Notice {
    let url = url.trim();
    if url.is_empty() {
        return Notice::new(NO_URL, ENTER_AND_SAVE_URL);
    }
    client.test_connection(url).await.into()
}

/// Forget the endpoint.
pub fn clear_settings(settings: &dyn SettingsStore) -> Result<(), crate::settings::SettingsError> {
    settings.clear()?;
    tracing::info!("cleared endpoint configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::settings::InMemorySettingsStore;
    use crate::types;

    use super::*;

    #[tokio::test]
    async fn invalid_form_is_rejected_before_anything_else() {
        let settings = InMemorySettingsStore::new();
        let product = Product::new("1", "", "abc").with_quantity("x");

        let notice = submit_product(&settings, &SyncClient::new(), &product).await;
        assert_eq!(notice.title, VALIDATION_ERROR);
        assert_eq!(
            notice.message,
            "Product name is required\nPrice must be a valid number\nQuantity must be a valid number"
        );
    }

    #[tokio::test]
    async fn blank_barcode_is_rejected_locally() {
        let settings = InMemorySettingsStore::with_script_url("https://script.example/exec");
        let client = SyncClient::new();

        let notice = submit_product(&settings, &client, &Product::new("  ", "Widget", "1")).await;
        assert_eq!(notice, Notice::new(VALIDATION_ERROR, BARCODE_REQUIRED));

        let notice = submit_product(&settings, &client, &Product::new("", "", "1")).await;
        assert_eq!(notice.message, "Barcode is required\nProduct name is required");
    }

    #[tokio::test]
    async fn missing_endpoint_asks_for_configuration() {
        let settings = InMemorySettingsStore::new();
        let product = Product::new("1", "Widget", "2.50");

        let notice = submit_product(&settings, &SyncClient::new(), &product).await;
        assert_eq!(notice, Notice::new(CONFIGURATION_REQUIRED, CONFIGURE_FIRST));
        assert!(notice.is_error());
    }

    #[test]
    fn settings_save_validates_https() {
        let settings = InMemorySettingsStore::new();

        assert_eq!(save_settings(&settings, "  "), Notice::new(VALIDATION_ERROR, ENTER_URL));
        assert_eq!(
            save_settings(&settings, "http://script.example/exec"),
            Notice::new(INVALID_URL, ENTER_HTTPS_URL)
        );
        assert_eq!(load_settings(&settings), "");

        let notice = save_settings(&settings, " https://script.example/exec ");
        assert_eq!(notice, Notice::new(SUCCESS, SETTINGS_SAVED));
        assert!(!notice.is_error());
        assert_eq!(load_settings(&settings), "https://script.example/exec");

        clear_settings(&settings).unwrap();
        assert_eq!(load_settings(&settings), "");
    }

    #[tokio::test]
    async fn test_without_url_prompts() {
        let notice = test_settings(&SyncClient::new(), "").await;
        assert_eq!(notice, Notice::new(NO_URL, ENTER_AND_SAVE_URL));
    }

    #[test]
    fn sync_result_maps_to_title() {
        assert_eq!(
            Notice::from(SyncResult::ok(types::TEST_OK)),
            Notice::new(SUCCESS, "Connection successful!")
        );
        let notice = Notice::from(SyncResult::failed(types::DUPLICATE));
        assert_eq!(notice.title, ERROR);
        assert_eq!(notice.to_string(), "Error: This barcode already exists in your inventory.");
    }
}
