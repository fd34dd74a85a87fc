//! Naming convention utilities for code generation.
//!
//! Schema names are `snake_case`; Go exports identifiers that start with an
//! upper-case letter.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `sw_interface_dump` | [`camel_case_name`] | `SwInterfaceDump` |
//! | `ip4_address` | [`camel_case_name`] | `IP4Address` |
//! | `_vl_msg_id` | [`field_name`] | `VlMsgID` |
//! | `interface` | [`package_name`] | `interfaces` |

/// Words rendered fully upper-case inside identifiers.
const COMMON_INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
    "IP", "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS",
    "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF", "XSS",
];

/// Go keywords that cannot name a package.
const RESERVED_WORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Convert a schema name to an exported Go identifier.
///
/// Words are split at underscores and at lower→upper transitions; each word
/// after the first gets an upper-case initial and common initialisms are
/// upper-cased entirely. One underscore is kept between two digits.
///
/// # Examples
///
/// ```
/// use binapi_codegen::naming::camel_case_name;
///
/// assert_eq!(camel_case_name("sw_interface_dump"), "SwInterfaceDump");
/// assert_eq!(camel_case_name("ip_address_details"), "IPAddressDetails");
/// assert_eq!(camel_case_name("acl_add_replace"), "ACLAddReplace");
/// ```
pub fn camel_case_name(name: &str) -> String {
    let name = capitalize(name);

    if name == "_" || name.chars().all(char::is_lowercase) {
        return name;
    }

    let mut runes: Vec<char> = name.chars().collect();
    let mut word_start = 0;
    let mut i = 0;

    while i < runes.len() {
        let mut end_of_word = false;

        if i + 1 == runes.len() {
            end_of_word = true;
        } else if runes[i + 1] == '_' {
            end_of_word = true;

            // drop the run of underscores, keeping one between two digits
            let mut n = 1;
            while i + n + 1 < runes.len() && runes[i + n + 1] == '_' {
                n += 1;
            }
            if i + n + 1 < runes.len()
                && runes[i].is_ascii_digit()
                && runes[i + n + 1].is_ascii_digit()
            {
                n -= 1;
            }
            runes.drain(i + 1..i + 1 + n);
        } else if runes[i].is_lowercase() && !runes[i + 1].is_lowercase() {
            end_of_word = true;
        }

        i += 1;
        if !end_of_word {
            continue;
        }

        let word: String = runes[word_start..i].iter().collect();
        let upper = word.to_uppercase();

        if COMMON_INITIALISMS.contains(&upper.as_str()) {
            let replacement = if word_start == 0 && runes[word_start].is_lowercase() {
                word.to_lowercase()
            } else {
                upper
            };
            for (offset, c) in replacement.chars().enumerate() {
                runes[word_start + offset] = c;
            }
        } else if word_start > 0 && word.to_lowercase() == word {
            runes[word_start] = runes[word_start].to_ascii_uppercase();
        }

        word_start = i;
    }

    runes.into_iter().collect()
}

/// Convert a field name to a Go struct member name.
///
/// A single leading underscore is dropped before normalization.
///
/// ```
/// use binapi_codegen::naming::field_name;
///
/// assert_eq!(field_name("sw_if_index"), "SwIfIndex");
/// assert_eq!(field_name("_vl_msg_id"), "VlMsgID");
/// ```
pub fn field_name(name: &str) -> String {
    camel_case_name(name.strip_prefix('_').unwrap_or(name))
}

/// Go package name for a module.
///
/// Module names that are Go keywords are pluralized.
///
/// ```
/// use binapi_codegen::naming::package_name;
///
/// assert_eq!(package_name("interface"), "interfaces");
/// assert_eq!(package_name("map"), "maps");
/// assert_eq!(package_name("ip"), "ip");
/// ```
pub fn package_name(module: &str) -> String {
    if RESERVED_WORDS.contains(&module) {
        format!("{module}s")
    } else {
        module.to_string()
    }
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
