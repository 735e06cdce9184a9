//! Shared naming helpers for generators.

/// Split an identifier into lowercase words.
///
/// Word boundaries are `_`, `-`, spaces, and lower-to-upper case changes
/// (`OrderItem` -> `["order", "item"]`).
fn words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in s.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Convert a string to PascalCase (e.g., "order_item" -> "OrderItem")
pub fn to_pascal_case(s: &str) -> String {
    words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to camelCase (e.g., "OrderItem" -> "orderItem")
pub fn to_camel_case(s: &str) -> String {
    let words = words(s);
    let mut iter = words.iter();
    match iter.next() {
        None => String::new(),
        Some(first) => {
            let mut out = first.clone();
            out.extend(iter.map(|w| capitalize(w)));
            out
        }
    }
}

/// Convert a string to snake_case (e.g., "OrderItem" -> "order_item")
pub fn to_snake_case(s: &str) -> String {
    words(s).join("_")
}

/// Convert a string to kebab-case (e.g., "OrderItem" -> "order-item")
pub fn to_kebab_case(s: &str) -> String {
    words(s).join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("user"), "User");
        assert_eq!(to_pascal_case("order_item"), "OrderItem");
        assert_eq!(to_pascal_case("OrderItem"), "OrderItem");
        assert_eq!(to_pascal_case("order-item"), "OrderItem");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("OrderItem"), "orderItem");
        assert_eq!(to_camel_case("user"), "user");
        assert_eq!(to_camel_case("created_at"), "createdAt");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("OrderItem"), "order_item");
        assert_eq!(to_snake_case("createdAt"), "created_at");
        assert_eq!(to_snake_case("order-item"), "order_item");
        assert_eq!(to_snake_case("User2Fa"), "user2_fa");
    }

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("OrderItem"), "order-item");
        assert_eq!(to_kebab_case("user"), "user");
        assert_eq!(to_kebab_case("APIKey"), "apikey");
    }
}
