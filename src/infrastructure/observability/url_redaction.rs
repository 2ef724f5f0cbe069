const MAX_VISIBLE_LENGTH: usize = 200;

/// Makes an audio URL safe to log.
///
/// Query strings and fragments often carry signed-access tokens, so they are
/// replaced wholesale. Userinfo before `@` is masked. Very long URLs are
/// truncated.
pub fn redact_url(url: &str) -> String {
    let trimmed = url.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let (base, had_query) = match trimmed.find(['?', '#']) {
        Some(idx) => (&trimmed[..idx], true),
        None => (trimmed, false),
    };

    let mut redacted = mask_userinfo(base);
    if had_query {
        redacted.push_str("?[REDACTED]");
    }

    if redacted.chars().count() > MAX_VISIBLE_LENGTH {
        let visible: String = redacted.chars().take(MAX_VISIBLE_LENGTH).collect();
        return format!("{}... ({} chars total)", visible, redacted.chars().count());
    }

    redacted
}

fn mask_userinfo(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };

    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{}://[REDACTED]@{}", scheme, &rest[at + 1..]),
        None => url.to_string(),
    }
}
