//! Endpoint templates and placeholder resolution.
//!
//! Endpoints are path strings carrying colon-prefixed placeholder tokens,
//! e.g. `data_sources/:data_source_uuid/uploads`. Resource modules resolve
//! the tokens they own before handing the path to a generic operation.

/// Placeholder for the primary resource identifier.
pub const UUID_TOKEN: &str = ":uuid";
/// Placeholder for a data source identifier.
pub const DATA_SOURCE_UUID_TOKEN: &str = ":data_source_uuid";
/// Placeholder for a customer identifier.
pub const CUSTOMER_UUID_TOKEN: &str = ":customer_uuid";
/// Placeholder for an invoice identifier.
pub const INVOICE_UUID_TOKEN: &str = ":invoice_uuid";

/// Replaces the first occurrence of `token` in `template` with `value`.
///
/// A template without the token is returned unchanged, which is how
/// singleton resources (no identifier in the path) are addressed. Templates
/// with several distinct tokens are resolved by chained calls, one token at
/// a time.
///
/// Substitution is literal: a substituted value that itself contains a
/// colon-prefixed token text is picked up by a later resolution of that
/// token.
pub fn resolve(template: &str, token: &str, value: &str) -> String {
    template.replacen(token, value, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("plans/:uuid", ":uuid", "abc", "plans/abc"; "single token")]
    #[test_case("account", ":uuid", "abc", "account"; "absent token unchanged")]
    #[test_case("plans/:uuid", ":uuid", "", "plans/"; "empty value")]
    #[test_case(
        "data_sources/:data_source_uuid/uploads",
        ":data_source_uuid",
        "ds_1",
        "data_sources/ds_1/uploads";
        "named token"
    )]
    fn test_resolve(template: &str, token: &str, value: &str, expected: &str) {
        assert_eq!(resolve(template, token, value), expected);
    }

    #[test]
    fn test_resolve_replaces_only_first_occurrence() {
        assert_eq!(
            resolve("a/:id/b/:id", ":id", "abc"),
            "a/abc/b/:id"
        );
    }

    #[test]
    fn test_resolve_leaves_other_tokens_untouched() {
        let template = "import/customers/:customer_uuid/invoices/:uuid";
        let resolved = resolve(template, CUSTOMER_UUID_TOKEN, "cus_1");
        assert_eq!(resolved, "import/customers/cus_1/invoices/:uuid");
        let resolved = resolve(&resolved, UUID_TOKEN, "inv_1");
        assert_eq!(resolved, "import/customers/cus_1/invoices/inv_1");
    }
}
