use crate::export::format::ExportFormat;

/// Name used when the business has no usable display name.
pub const FALLBACK_NAME: &str = "business";

/// Strip characters that are illegal in common filesystems.
///
/// Removes `/ \ : * ? " < > |` and control characters, trims whitespace and falls back to
/// [`FALLBACK_NAME`] when nothing is left. Other characters (apostrophes, accents) are kept.
pub fn sanitize_name(name: Option<&str>) -> String {
    let cleaned: String = name
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect();
    let trimmed = cleaned.trim().trim_matches('.');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// `{name}-qr-code.{ext}`
pub fn export_filename(business_name: Option<&str>, format: ExportFormat) -> String {
    format!("{}-qr-code.{}", sanitize_name(business_name), format.extension())
}

/// `{name}-{template-kebab}-template.png`
pub fn card_filename(business_name: Option<&str>, template_name: &str) -> String {
    format!(
        "{}-{}-template.png",
        sanitize_name(business_name),
        kebab_case(template_name)
    )
}

/// Lowercase, with every run of non-alphanumerics collapsed to one `-`.
pub fn kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/export/filename.rs"]
mod tests;
