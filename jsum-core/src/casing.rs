//! Key casing conversions.

/// Converts a `snake_case` key to `camelCase`.
///
/// Leading and trailing underscores are kept. A key without interior
/// underscores is returned unchanged, since it may already be camel cased.
///
/// ```
/// use jsum_core::snake_case_to_camel_case;
///
/// assert_eq!(snake_case_to_camel_case("user_id"), "userId");
/// assert_eq!(snake_case_to_camel_case("__private_key_"), "__privateKey_");
/// assert_eq!(snake_case_to_camel_case("alreadyCamel"), "alreadyCamel");
/// ```
pub fn snake_case_to_camel_case(key: &str) -> String {
    let Some(start) = key.find(|c| c != '_') else {
        return key.to_owned();
    };
    let end = key.trim_end_matches('_').len();
    let (leading, body, trailing) = (&key[..start], &key[start..end], &key[end..]);

    let mut words = body.split('_').filter(|w| !w.is_empty());
    let (Some(first), Some(_)) = (words.next(), body.find('_')) else {
        return key.to_owned();
    };

    let mut out = String::with_capacity(key.len());
    out.push_str(leading);
    out.push_str(&first.to_lowercase());
    for word in words {
        let mut chars = word.chars();
        if let Some(head) = chars.next() {
            out.extend(head.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out.push_str(trailing);
    out
}

/// Converts a `camelCase` key to `snake_case`.
///
/// A run of capitals is treated as one word, so `myURLKey` becomes
/// `my_url_key`.
pub fn camel_case_to_snake_case(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_uppercase() {
            out.push(c);
            continue;
        }
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let starts_word = match prev {
            Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
            Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
            _ => false,
        };
        if starts_word {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}
