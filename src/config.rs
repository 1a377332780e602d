// config: Company profile (letterhead text, admin credentials, document settings)
//
// The built-in defaults describe WNL Flooring. A TOML file may override any
// subset of keys; missing keys keep their defaults.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::{AppError, Result};

/// Admin login pair checked by the access gate.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Credentials::new("wnl", "wnl2025")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in mm
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: String,
    pub tagline: String,
    pub slogan: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: String,
    /// Logo file path or http(s) URL
    pub logo: Option<String>,
    /// Text drawn in place of the logo when no image is available
    pub logo_text: String,
    pub logo_subtext: String,
    pub quote_validity_days: u32,
    pub file_prefix: String,
    pub footer_note: String,
    pub page_size: PageSize,
    /// Replaces the standard terms when set
    pub terms: Option<Vec<String>>,
    pub admin: Credentials,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        CompanyInfo {
            name: "WNL FLOORING".to_string(),
            tagline: "Professional Tile & Bathroom Remodeling".to_string(),
            slogan: "The difference is in the details".to_string(),
            email: "wnlflooring@gmail.com".to_string(),
            phone: "(786) 762-6304".to_string(),
            address: "123 Main Street, Your City, State 12345".to_string(),
            website: "www.wnlflooring.com".to_string(),
            logo: None,
            logo_text: "WNL".to_string(),
            logo_subtext: "FLOORING".to_string(),
            quote_validity_days: 30,
            file_prefix: "WNL_Flooring_Quote".to_string(),
            footer_note: "Professional Installation - Quality Materials - Satisfaction Guaranteed"
                .to_string(),
            page_size: PageSize::A4,
            terms: None,
            admin: Credentials::default(),
        }
    }
}

impl CompanyInfo {
    /// Loads the profile from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .map_err(|e| AppError::ConfigError(format!("{}: {}", p.display(), e)))?;
                let info = Self::from_toml(&content)?;
                debug!(path = %p.display(), company = %info.name, "loaded company profile");
                Ok(info)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AppError::ConfigError(format!("Invalid TOML: {}", e)))
    }

    /// Contact line shown under the letterhead.
    pub fn contact_line(&self) -> String {
        let website = self
            .website
            .strip_prefix("www.")
            .unwrap_or(&self.website);
        format!(
            "Email: {}  Phone: {}  Web: {}",
            self.email, self.phone, website
        )
    }

    pub fn thank_you_line(&self) -> String {
        format!("Thank you for considering {} for your project.", self.name)
    }

    /// Terms and conditions, one entry per printed paragraph.
    pub fn terms(&self) -> Vec<String> {
        if let Some(ref terms) = self.terms {
            return terms.clone();
        }
        vec![
            format!(
                "1. This quotation is valid for {} days from the date specified above.",
                self.quote_validity_days
            ),
            "2. Prices are subject to change without notice after the expiration date."
                .to_string(),
            "3. Accepted payment methods: Zelle transfer or certified check.".to_string(),
            "4. Payment Schedule:".to_string(),
            "   - A 30% deposit is required prior to start of the project".to_string(),
            "   - A 40% progress payment will be due once the project is halfway completed"
                .to_string(),
            "   - The remaining 30% is due upon project completion and final approval"
                .to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_wnl_flooring() {
        let info = CompanyInfo::default();
        assert_eq!(info.name, "WNL FLOORING");
        assert_eq!(info.quote_validity_days, 30);
        assert_eq!(info.page_size, PageSize::A4);
        assert_eq!(info.admin, Credentials::new("wnl", "wnl2025"));
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let info = CompanyInfo::from_toml(
            r#"
            name = "ACME TILE"
            quote_validity_days = 15
            page_size = "letter"

            [admin]
            password = "s3cret"
            "#,
        )
        .unwrap();

        assert_eq!(info.name, "ACME TILE");
        assert_eq!(info.page_size, PageSize::Letter);
        assert_eq!(info.admin.username, "wnl");
        assert_eq!(info.admin.password, "s3cret");
        assert_eq!(info.email, "wnlflooring@gmail.com");
        assert!(info.terms()[0].contains("valid for 15 days"));
    }

    #[test]
    fn custom_terms_replace_standard_terms() {
        let info = CompanyInfo::from_toml(r#"terms = ["Net 15.", "No refunds."]"#).unwrap();
        assert_eq!(info.terms(), vec!["Net 15.".to_string(), "No refunds.".to_string()]);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = CompanyInfo::from_toml("name = ").unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = CompanyInfo::load(Some(Path::new("does/not/exist.toml"))).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn debug_output_hides_password() {
        let text = format!("{:?}", Credentials::new("admin", "hunter2"));
        assert!(text.contains("admin"));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn contact_line_drops_www_prefix() {
        let line = CompanyInfo::default().contact_line();
        assert_eq!(
            line,
            "Email: wnlflooring@gmail.com  Phone: (786) 762-6304  Web: wnlflooring.com"
        );
    }
}
