//! Shared naming helpers for code generation.

/// Words whose plural is identical to the singular.
const UNCOUNTABLE: &[&str] = &[
    "data",
    "deer",
    "equipment",
    "fish",
    "information",
    "media",
    "metadata",
    "news",
    "series",
    "sheep",
    "species",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("mouse", "mice"),
];

/// Upper-case the first character (e.g., "user" -> "User")
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Lower-case the first character (e.g., "BlogPost" -> "blogPost")
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-', ' '])
        .map(upper_first)
        .collect()
}

/// Convert a string to camelCase (e.g., "hello_world" -> "helloWorld")
pub fn to_camel_case(s: &str) -> String {
    lower_first(&to_pascal_case(s))
}

/// Convert a string to kebab-case (e.g., "BlogPost" -> "blog-post")
pub fn to_kebab_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('-');
        }
        result.extend(c.to_lowercase());
    }
    result.replace('_', "-")
}

/// Convert a string to snake_case (e.g., "BlogPost" -> "blog_post")
pub fn to_snake_case(s: &str) -> String {
    to_kebab_case(s).replace('-', "_")
}

/// Whether a field name follows the `<relation>Id` convention.
pub fn has_id_suffix(name: &str) -> bool {
    name.len() > 2 && name.ends_with("Id")
}

/// Strip a trailing `Id` (e.g., "authorId" -> "author").
pub fn strip_id_suffix(name: &str) -> &str {
    if has_id_suffix(name) {
        &name[..name.len() - 2]
    } else {
        name
    }
}

/// Ensure a trailing `Id` (e.g., "author" -> "authorId"). Idempotent.
pub fn with_id_suffix(name: &str) -> String {
    if has_id_suffix(name) {
        name.to_string()
    } else {
        format!("{}Id", name)
    }
}

/// English plural of an identifier, inflecting only its last word.
pub fn pluralize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.iter().any(|u| lower.ends_with(u)) {
        return word.to_string();
    }

    for (singular, plural) in IRREGULAR {
        if lower.ends_with(singular) {
            let stem = &word[..word.len() - singular.len()];
            let tail = &word[word.len() - singular.len()..];
            let plural = if tail.starts_with(char::is_uppercase) {
                upper_first(plural)
            } else {
                plural.to_string()
            };
            return format!("{}{}", stem, plural);
        }
    }

    let ends_with_consonant_y = lower.ends_with('y')
        && !lower.ends_with("ay")
        && !lower.ends_with("ey")
        && !lower.ends_with("oy")
        && !lower.ends_with("uy");

    if ends_with_consonant_y {
        format!("{}ies", &word[..word.len() - 1])
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        format!("{}es", word)
    } else {
        format!("{}s", word)
    }
}
