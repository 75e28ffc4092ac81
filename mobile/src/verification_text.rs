// Two-line verification text: a package id followed by a certificate fingerprint.
//
// com.example.app
// 96:C0:2C:55:75:5C:17:1C:68:13:70:29:3B:37:11:2B:4A:5D:F7:B9

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Shown by the invalid-format view.
pub const FORMAT_EXAMPLE: &str =
    "com.example.app\n96:C0:2C:55:75:5C:17:1C:68:13:70:29:3B:37:11:2B:4A:5D:F7:B9";

/// SHA-1 and SHA-256 certificate digests.
const FINGERPRINT_BYTE_COUNTS: [usize; 2] = [20, 32];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub package_name: String,
    /// Upper-case, colon separated
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    LineCount(usize),
    PackageName(String),
    Fingerprint(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::LineCount(n) => write!(f, "expected 2 lines, found {}", n),
            FormatError::PackageName(p) => write!(f, "invalid package name: {:?}", p),
            FormatError::Fingerprint(h) => write!(f, "invalid fingerprint: {:?}", h),
        }
    }
}

impl std::error::Error for FormatError {}

fn fingerprint_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9A-Fa-f]{2}(:[0-9A-Fa-f]{2})*$").unwrap())
}

fn package_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z0-9_]+)+$").unwrap())
}

pub fn is_fingerprint(hash: &str) -> bool {
    fingerprint_regex().is_match(hash)
        && FINGERPRINT_BYTE_COUNTS.contains(&hash.split(':').count())
}

/// Case-insensitive fingerprint comparison.
pub fn same_fingerprint(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

pub fn parse_verification_text(text: &str) -> Result<VerificationRequest, FormatError> {
    let lines: Vec<&str> = text
        .trim()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() != 2 {
        return Err(FormatError::LineCount(lines.len()));
    }

    let package_name = lines[0];
    if !crate::is_valid_package_id(package_name) || !package_regex().is_match(package_name) {
        return Err(FormatError::PackageName(package_name.to_string()));
    }

    let hash = lines[1];
    if !is_fingerprint(hash) {
        return Err(FormatError::Fingerprint(hash.to_string()));
    }

    Ok(VerificationRequest {
        package_name: package_name.to_string(),
        hash: hash.to_ascii_uppercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA256: &str = "96:C0:2C:55:75:5C:17:1C:68:13:70:29:3B:37:11:2B:4A:5D:F7:B9:82:C2:C5:58:05:4C:45:51:AD:F5:50:DC";

    #[test]
    fn test_example_parses() {
        let req = parse_verification_text(FORMAT_EXAMPLE).unwrap();
        assert_eq!(req.package_name, "com.example.app");
        assert_eq!(req.hash.split(':').count(), 20);
    }

    #[test]
    fn test_sha256_and_lowercase() {
        let text = format!("org.fossify.gallery\n{}\n", SHA256.to_lowercase());
        let req = parse_verification_text(&text).unwrap();
        assert_eq!(req.package_name, "org.fossify.gallery");
        assert_eq!(req.hash, SHA256);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let text = format!("\r\n  com.example.app  \r\n\r\n{}\r\n", SHA256);
        assert!(parse_verification_text(&text).is_ok());
    }

    #[test]
    fn test_rejects_single_line() {
        assert_eq!(
            parse_verification_text("com.example.app"),
            Err(FormatError::LineCount(1))
        );
    }

    #[test]
    fn test_rejects_bad_package() {
        let text = format!("example\n{}", SHA256);
        assert!(matches!(
            parse_verification_text(&text),
            Err(FormatError::PackageName(_))
        ));
    }

    #[test]
    fn test_rejects_bad_fingerprint() {
        assert!(matches!(
            parse_verification_text("com.example.app\nAA:BB"),
            Err(FormatError::Fingerprint(_))
        ));
        assert!(matches!(
            parse_verification_text("com.example.app\nZZ:BB:CC"),
            Err(FormatError::Fingerprint(_))
        ));
        assert!(!is_fingerprint("96C02C"));
    }

    #[test]
    fn test_same_fingerprint_ignores_case() {
        assert!(same_fingerprint("aa:bb", "AA:BB"));
        assert!(!same_fingerprint("AA:BB", "AA:BC"));
    }
}
