//! Identifier helpers used by the renderers.

/// Convert a dotted, dashed or snake-case name into an upper camel-case identifier.
///
/// `fxa_account_id` becomes `FxaAccountId` and `accounts-events` becomes `AccountsEvents`.
pub fn camelize(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for part in value.split(['_', '.', '-']).filter(|part| !part.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.extend(chars.flat_map(char::to_lowercase));
        }
    }
    result
}

/// Flatten a description onto a single line so it can be used in a line comment.
pub fn clean_description(value: &str) -> String {
    value.replace('\n', " ").trim_end().to_string()
}

/// Flatten a description for a JSDoc block, breaking up any `*/` that would close it.
pub fn jsdoc_description(value: &str) -> String {
    clean_description(value).replace("*/", "*\\/")
}

/// Escape a value for use inside a single-quoted JavaScript string.
pub fn js_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camelize() {
        assert_eq!(camelize("fxa_account_id"), "FxaAccountId");
        assert_eq!(camelize("accounts-events"), "AccountsEvents");
        assert_eq!(camelize("web.page_view"), "WebPageView");
        assert_eq!(camelize("URL_path"), "UrlPath");
        assert_eq!(camelize("__leading"), "Leading");
        assert_eq!(camelize(""), "");
    }

    #[test]
    fn test_clean_description() {
        assert_eq!(clean_description("First line\nsecond line\n"), "First line second line");
        assert_eq!(clean_description("trailing   "), "trailing");
    }

    #[test]
    fn test_jsdoc_description() {
        assert_eq!(jsdoc_description("Request path such as\n/api/*/items"), r"Request path such as /api/*\/items");
        assert_eq!(jsdoc_description("no comment end"), "no comment end");
    }

    #[test]
    fn test_js_single_quoted() {
        assert_eq!(js_single_quoted(r"it's a \ test"), r"it\'s a \\ test");
    }
}
