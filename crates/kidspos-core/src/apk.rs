//! # APK Release Rules
//!
//! Upload validation and stored file naming for distributable APKs.
//!
//! ```text
//! upload(file, "1.2.0", 12)
//!    │
//!    ├─ validate_apk_upload   version set, code > 0, *.apk, size ≤ max
//!    │
//!    └─ stored_file_name      "1.2.0-3f9a0c1d.apk"
//! ```

use crate::error::ValidationError;
use crate::ids::short_suffix;
use crate::validation::{validate_name, ValidationResult};

/// Default upload limit: 100 MiB.
pub const DEFAULT_MAX_APK_SIZE: u64 = 100 * 1024 * 1024;

pub const APK_EXTENSION: &str = ".apk";

/// MIME type served for downloads.
pub const APK_CONTENT_TYPE: &str = "application/vnd.android.package-archive";

/// Metadata of an upload, checked before anything touches the disk.
#[derive(Debug, Clone, Copy)]
pub struct ApkUpload<'a> {
    pub version: &'a str,
    pub version_code: i64,
    /// Client-side filename of the uploaded part, `None` when no file part
    /// was sent.
    pub file_name: Option<&'a str>,
    pub file_size: u64,
}

/// Validates an APK upload against the size limit.
pub fn validate_apk_upload(upload: &ApkUpload<'_>, max_size: u64) -> ValidationResult<()> {
    validate_name("version", upload.version)?;

    if upload.version_code <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "versionCode".to_string(),
        });
    }

    let file_name = upload
        .file_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ValidationError::required("file"))?;

    if upload.file_size > max_size {
        return Err(ValidationError::FileTooLarge {
            max_bytes: max_size,
        });
    }

    if !has_apk_extension(file_name) {
        return Err(ValidationError::InvalidFormat {
            field: "file".to_string(),
            reason: "must be an .apk file".to_string(),
        });
    }

    Ok(())
}

/// Case-insensitive `.apk` suffix check.
pub fn has_apk_extension(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(APK_EXTENSION)
}

/// Name the upload is stored under: `<version>-<8 hex>.apk`.
///
/// Path separators and quotes in the version are replaced so the file always
/// lands directly inside the upload directory and can be named in a header.
pub fn stored_file_name(version: &str) -> String {
    let safe: String = version
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '"') || c.is_control() { '_' } else { c })
        .collect();
    format!("{}-{}{}", safe, short_suffix(), APK_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload<'a>(file_name: Option<&'a str>, size: u64) -> ApkUpload<'a> {
        ApkUpload {
            version: "1.0.0",
            version_code: 1,
            file_name,
            file_size: size,
        }
    }

    #[test]
    fn test_valid_upload() {
        assert!(validate_apk_upload(&upload(Some("app.apk"), 1024), DEFAULT_MAX_APK_SIZE).is_ok());
        assert!(validate_apk_upload(&upload(Some("APP.APK"), 1024), DEFAULT_MAX_APK_SIZE).is_ok());
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            validate_apk_upload(&upload(None, 0), DEFAULT_MAX_APK_SIZE),
            Err(ValidationError::required("file"))
        );
        assert!(matches!(
            validate_apk_upload(&upload(Some("app.zip"), 10), DEFAULT_MAX_APK_SIZE),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert_eq!(
            validate_apk_upload(&upload(Some("app.apk"), 2048), 1024),
            Err(ValidationError::FileTooLarge { max_bytes: 1024 })
        );

        let mut bad_code = upload(Some("app.apk"), 10);
        bad_code.version_code = 0;
        assert!(validate_apk_upload(&bad_code, DEFAULT_MAX_APK_SIZE).is_err());

        let mut no_version = upload(Some("app.apk"), 10);
        no_version.version = " ";
        assert_eq!(
            validate_apk_upload(&no_version, DEFAULT_MAX_APK_SIZE),
            Err(ValidationError::required("version"))
        );
    }

    #[test]
    fn test_stored_file_name() {
        let name = stored_file_name("1.2.0");
        assert!(name.starts_with("1.2.0-"));
        assert!(name.ends_with(".apk"));
        assert_eq!(name.len(), "1.2.0-".len() + 8 + ".apk".len());

        assert!(!stored_file_name("../evil").contains('/'));
        assert!(stored_file_name(r#"1.0"x"#).starts_with("1.0_x-"));
    }
}
