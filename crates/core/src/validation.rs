//! Input checks run before any network call.

use serde::Serialize;
use url::Url;

use crate::numeric::parse_float_prefix;

pub const NAME_REQUIRED: &str = "Product name is required";
pub const PRICE_REQUIRED: &str = "Price is required";
pub const PRICE_INVALID: &str = "Price must be a valid number";
pub const QUANTITY_INVALID: &str = "Quantity must be a valid number";

/// True iff `url` is an absolute URL with the `https` scheme.
pub fn validate_url(url: &str) -> bool {
    if url.trim().is_empty() {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => parsed.scheme() == "https",
        Err(_) => false,
    }
}

/// True iff `value` has a leading non-negative number.
pub fn validate_numeric(value: &str) -> bool {
    if value.trim().is_empty() {
        return false;
    }

    parse_float_prefix(value).is_some_and(|n| n >= 0.0)
}

/// Outcome of checking the product form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Check the user-editable product fields.
///
/// Every failing field contributes one message; an empty quantity is allowed
/// and means "use the default".
pub fn validate_product_form(name: &str, price: &str, quantity: &str) -> FormValidation {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(NAME_REQUIRED.to_string());
    }

    if price.trim().is_empty() {
        errors.push(PRICE_REQUIRED.to_string());
    } else if !validate_numeric(price) {
        errors.push(PRICE_INVALID.to_string());
    }

    if !quantity.is_empty() && !validate_numeric(quantity) {
        errors.push(QUANTITY_INVALID.to_string());
    }

    FormValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn url_requires_https_scheme() {
        assert!(validate_url("https://script.google.com/macros/s/abc/exec"));
        assert!(validate_url("https://example.com"));
        assert!(!validate_url("http://example.com"));
        assert!(!validate_url("ftp://example.com"));
        assert!(!validate_url("example.com"));
        assert!(!validate_url("not a url"));
        assert!(!validate_url(""));
        assert!(!validate_url("   "));
    }

    #[test]
    fn numeric_accepts_non_negative_prefixes() {
        assert!(validate_numeric("19.99"));
        assert!(validate_numeric("0"));
        assert!(validate_numeric("5."));
        assert!(validate_numeric("12abc"));
        assert!(!validate_numeric(""));
        assert!(!validate_numeric("  "));
        assert!(!validate_numeric("abc"));
        assert!(!validate_numeric("-1"));
    }

    #[test]
    fn empty_form_reports_name_and_price() {
        let result = validate_product_form("", "", "");
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec![NAME_REQUIRED, PRICE_REQUIRED]);
    }

    #[test]
    fn non_numeric_price_is_the_only_error() {
        let result = validate_product_form("Widget", "abc", "");
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec![PRICE_INVALID]);
    }

    #[test]
    fn errors_accumulate_without_short_circuit() {
        let result = validate_product_form("  ", "x", "many");
        assert_eq!(result.errors, vec![NAME_REQUIRED, PRICE_INVALID, QUANTITY_INVALID]);
    }

    #[test]
    fn complete_form_is_valid() {
        let result = validate_product_form("Widget", "19.99", "3");
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any `http://` URL is rejected, the same host over https is accepted.
        #[test]
        fn only_https_hosts_validate(host in "[a-z]{1,12}\\.(com|org|net)", path in "[a-z0-9/]{0,16}") {
            let http_url = format!("http://{host}/{path}");
            let https_url = format!("https://{host}/{path}");
            prop_assert!(!validate_url(&http_url));
            prop_assert!(validate_url(&https_url));
        }

        /// Property: scheme-less text never validates.
        #[test]
        fn schemeless_text_never_validates(text in "[a-zA-Z0-9 ._-]{0,24}") {
            prop_assert!(!validate_url(&text));
        }

        /// Property: formatted non-negative numbers always pass the numeric check.
        #[test]
        fn formatted_prices_are_numeric(cents in 0u64..10_000_000u64) {
            let price = format!("{}.{:02}", cents / 100, cents % 100);
            prop_assert!(validate_numeric(&price));
        }
    }
}
