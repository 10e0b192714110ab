use anyhow::{Result, anyhow};

/// Extensions accepted for upload. Matching is case-insensitive; the stored
/// key keeps the original casing.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "jpg", "jpeg", "png"];

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Sanitizes a client-supplied filename into a safe leaf name.
///
/// The result contains only `[A-Za-z0-9._-]`, never a path separator, and
/// never a leading dot, so it can be used directly as a flat object key.
/// Sanitization is idempotent: running it twice yields the same name.
///
/// Policy: take the last path component (both `/` and `\` count as
/// separators), replace every character outside the safe set with `_`, strip
/// leading dots, and cap the length at 255 bytes. A name that collapses to
/// nothing but filler is rejected.
pub fn sanitize_filename(filename: &str) -> Result<String> {
    let leaf = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = leaf
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // No hidden files; also neutralizes "." and ".." components.
    let cleaned = cleaned.trim_start_matches('.');

    // Safe to slice: everything outside ASCII was replaced above.
    let cleaned = if cleaned.len() > 255 {
        &cleaned[..255]
    } else {
        cleaned
    };

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '_' || c == '.' || c == '-') {
        return Err(anyhow!(ValidationError {
            code: "INVALID_FILENAME",
            message: format!("Filename '{}' has no usable name component", filename),
        }));
    }

    Ok(cleaned.to_string())
}

/// Extension of a filename: the substring after the last `.`, lower-cased.
/// `None` when there is no dot or the dot is the final character.
pub fn file_extension(filename: &str) -> Option<String> {
    match filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext.to_ascii_lowercase()),
        _ => None,
    }
}

/// Validates the extension of an already-sanitized filename against the
/// allow-set. Names without an extension are rejected.
pub fn validate_extension(filename: &str) -> Result<()> {
    let ext = file_extension(filename).ok_or_else(|| {
        anyhow!(ValidationError {
            code: "NO_EXTENSION",
            message: format!("Filename '{}' has no extension", filename),
        })
    })?;

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(anyhow!(ValidationError {
            code: "EXTENSION_NOT_ALLOWED",
            message: format!("File extension '.{}' is not allowed", ext),
        }));
    }

    Ok(())
}

/// Validates the upload size. Exactly `max_size` bytes passes; the first byte
/// over is rejected.
pub fn validate_file_size(size: usize, max_size: usize) -> Result<()> {
    if size > max_size {
        return Err(anyhow!(ValidationError {
            code: "FILE_TOO_LARGE",
            message: format!(
                "File size {} bytes exceeds maximum allowed {} bytes",
                size, max_size
            ),
        }));
    }
    Ok(())
}
