/// Browser engine prefixes, in dashed CSS form
pub const VENDOR_TAGS: [&str; 4] = ["moz", "webkit", "o", "ms"];

/// camelCase spellings used by script-side style accessors
const CAMEL_PREFIXES: [&str; 5] = ["Moz", "Webkit", "webkit", "O", "ms"];

/// Every vendor-prefixed spelling of `property`
pub fn vendorize(property: &str) -> Vec<String> {
    VENDOR_TAGS
        .iter()
        .map(|vendor| format!("-{}-{}", vendor, property))
        .collect()
}

fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (idx, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if idx > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Case-insensitive dashed prefix match that leaves a non-empty remainder
fn strip_dashed<'a>(name: &'a str, dashed: &str) -> Option<&'a str> {
    let head = name.get(..dashed.len())?;
    let rest = &name[dashed.len()..];
    (head.eq_ignore_ascii_case(dashed) && !rest.is_empty()).then_some(rest)
}

fn strip_once(name: &str) -> Option<String> {
    for vendor in VENDOR_TAGS {
        let dashed = format!("-{}-", vendor);
        if let Some(rest) = strip_dashed(name, &dashed) {
            return Some(rest.to_string());
        }
    }

    for prefix in CAMEL_PREFIXES {
        if let Some(rest) = name.strip_prefix(prefix) {
            // `MozBoxSizing` but not an all-caps name such as `OVERFLOW`
            let camel = rest.starts_with(|c: char| c.is_ascii_uppercase())
                && rest.chars().skip(1).any(|c| c.is_ascii_lowercase());
            if camel {
                return Some(camel_to_kebab(rest));
            }
        }
    }

    None
}

/// Remove any vendor prefix so `-webkit-transform`, `MozTransform` and
/// `transform` all address the same property. Names without a prefix are
/// returned unchanged, and the result never carries a prefix.
pub fn strip_vendor_prefix(name: &str) -> String {
    let mut current = name.to_string();
    while let Some(stripped) = strip_once(&current) {
        current = stripped;
    }
    current
}

/// Returns the vendor the name is prefixed with, if any
pub fn vendor_of(name: &str) -> Option<&'static str> {
    VENDOR_TAGS.into_iter().find(|vendor| {
        strip_dashed(name, &format!("-{}-", vendor)).is_some()
    })
}
