//! Objective-C runtime type encoding tokens.
//!
//! `NSMethodSignature` describes argument types with compact tokens
//! (`i`, `@`, `{CGRect=dddd}`, `^i`, ...). A decoded display name is
//! what gets substituted as a cast into a preamble location expression.

/// Translate a runtime type encoding token into a display type name.
///
/// Returns `None` for tokens outside the supported set. Pointer to
/// pointer encodings (`^^{CGRect}` and the like) are a known gap and
/// also decode to `None` instead of a wrong name.
pub fn display_type_name(token: &str) -> Option<String> {
    match token {
        "@" => Some("id".to_string()),
        "c" => Some("char".to_string()),
        "i" => Some("int".to_string()),
        "s" => Some("short".to_string()),
        "l" => Some("long".to_string()),
        "q" => Some("long long".to_string()),
        "C" => Some("unsigned char".to_string()),
        "I" => Some("unsigned int".to_string()),
        "S" => Some("unsigned short".to_string()),
        "L" => Some("unsigned long".to_string()),
        "Q" => Some("unsigned long long".to_string()),
        "f" => Some("float".to_string()),
        "d" => Some("double".to_string()),
        "*" => Some("char *".to_string()),
        "#" => Some("Class".to_string()),
        ":" => Some("SEL".to_string()),
        _ if token.starts_with('{') => Some(structure_name(token).to_string()),
        _ if token.starts_with('^') => {
            let pointee = &token[1..];
            if pointee.starts_with('^') {
                return None;
            }
            display_type_name(pointee).map(|name| format!("{name} *"))
        }
        _ => None,
    }
}

/// Extract the name from a structure encoding `{Name=fields}`, or strip
/// the braces verbatim when no field list is present.
fn structure_name(token: &str) -> &str {
    match token.find('=') {
        Some(eq_index) => &token[1..eq_index],
        None => token.trim_matches(|c| c == '{' || c == '}'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_tokens() {
        struct TestCase {
            token: &'static str,
            result: Option<&'static str>,
        }
        let cases = [
            TestCase {
                token: "@",
                result: Some("id"),
            },
            TestCase {
                token: ":",
                result: Some("SEL"),
            },
            TestCase {
                token: "#",
                result: Some("Class"),
            },
            TestCase {
                token: "q",
                result: Some("long long"),
            },
            TestCase {
                token: "Q",
                result: Some("unsigned long long"),
            },
            TestCase {
                token: "*",
                result: Some("char *"),
            },
            TestCase {
                token: "f",
                result: Some("float"),
            },
            TestCase {
                token: "d",
                result: Some("double"),
            },
            // unknown single characters are unsupported, not guessed
            TestCase {
                token: "v",
                result: None,
            },
            TestCase {
                token: "b",
                result: None,
            },
            TestCase {
                token: "",
                result: None,
            },
        ];

        for tc in cases {
            assert_eq!(display_type_name(tc.token).as_deref(), tc.result);
        }
    }

    #[test]
    fn test_structure_tokens() {
        assert_eq!(
            display_type_name("{CGRect=dddd}").as_deref(),
            Some("CGRect")
        );
        assert_eq!(
            display_type_name("{CGPoint=dd}").as_deref(),
            Some("CGPoint")
        );
        assert_eq!(display_type_name("{Foo}").as_deref(), Some("Foo"));
    }

    #[test]
    fn test_pointer_tokens() {
        assert_eq!(display_type_name("^i").as_deref(), Some("int *"));
        assert_eq!(display_type_name("^Q").as_deref(), Some("unsigned long long *"));
        assert_eq!(
            display_type_name("^{CGRect=dddd}").as_deref(),
            Some("CGRect *")
        );
        // pointer to pointer stays an explicit unsupported case
        assert_eq!(display_type_name("^^{CGRect=dddd}"), None);
        assert_eq!(display_type_name("^^i"), None);
        // pointer to an unknown token propagates the gap
        assert_eq!(display_type_name("^v"), None);
    }

    #[test]
    fn test_decode_is_stable() {
        for token in ["@", "{CGRect=dddd}", "^i", "^^i", "unknown"] {
            assert_eq!(display_type_name(token), display_type_name(token));
        }
    }
}
