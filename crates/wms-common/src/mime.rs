//! MIME type lookup in both directions.

const OCTET_STREAM: &str = "application/octet-stream";

/// Convert a file extension into a MIME type.
///
/// Unknown extensions map to `application/octet-stream`.
pub fn extension_to_type(extension: &str) -> String {
    mime_guess::from_ext(extension)
        .first_raw()
        .unwrap_or(OCTET_STREAM)
        .to_string()
}

/// Convert a MIME type into its preferred file extension.
///
/// Parameters after `;` are ignored, so `image/png; mode=8bit` resolves to `png`.
pub fn type_to_extension(mime_type: &str) -> Option<&'static str> {
    let essence = mime_type.split(';').next().unwrap_or("").trim();
    if essence.is_empty() {
        return None;
    }

    let extensions = mime_guess::get_mime_extensions_str(&essence.to_ascii_lowercase())?;

    // mime_guess lists extensions alphabetically; prefer the one named after the subtype
    let subtype = essence.rsplit('/').next().unwrap_or("");
    extensions
        .iter()
        .copied()
        .find(|ext| ext.eq_ignore_ascii_case(subtype))
        .or_else(|| extensions.first().copied())
}
