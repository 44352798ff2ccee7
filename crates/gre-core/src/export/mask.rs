//! PII masking for the GRE export.

/// `abcdef@x.com` -> `ab****f@x.com`. Values without a domain are returned unchanged.
pub fn mask_email(email: &str) -> String {
    if email.is_empty() {
        return String::new();
    }
    let Some((user, domain)) = email.split_once('@') else {
        return email.to_string();
    };
    if domain.is_empty() {
        return email.to_string();
    }

    let head: String = user.chars().take(2).collect();
    let tail = user.chars().last().map(String::from).unwrap_or_default();
    format!("{}****{}@{}", head, tail, domain)
}

/// `9876543210` -> `98******10`; anything shorter than four characters is `****`.
pub fn mask_phone(phone: &str) -> String {
    if phone.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() < 4 {
        return "****".to_string();
    }

    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}******{}", head, tail)
}
