//! Tenant record model.
//!
//! The access core only ever looks at [`Tenant::id`]; the remaining fields are
//! carried so hosts can deserialize and validate tenant documents with one type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by [`Tenant::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TenantValidationError {
    #[error("tenant name must not be empty")]
    EmptyName,

    #[error("invalid tenant slug '{0}': use lowercase letters, digits and inner hyphens")]
    InvalidSlug(String),

    #[error("tenant must have at least one domain")]
    NoDomains,

    #[error("tenant domain at position {0} is empty")]
    EmptyDomain(usize),

    #[error("invalid color '{value}' for {field}: expected #rgb or #rrggbb")]
    InvalidColor { field: &'static str, value: String },
}

/// A tenant of the CMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub name: String,
    /// Unique across tenants; uniqueness is enforced by the datastore.
    pub slug: String,
    pub domains: Vec<TenantDomain>,
    #[serde(default)]
    pub branding: Branding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantDomain {
    pub domain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Branding {
    pub primary_color: String,
    pub secondary_color: String,
    pub font: String,
    /// Reference to an uploaded media document.
    pub logo: Option<String>,
    pub button_style: ButtonStyle,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            primary_color: "#000000".to_owned(),
            secondary_color: "#ffffff".to_owned(),
            font: "Inter".to_owned(),
            logo: None,
            button_style: ButtonStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Rounded,
    Square,
    Pill,
}

impl Tenant {
    /// Checks the record-local invariants of a tenant document.
    ///
    /// # Errors
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), TenantValidationError> {
        if self.name.trim().is_empty() {
            return Err(TenantValidationError::EmptyName);
        }
        if !is_valid_slug(&self.slug) {
            return Err(TenantValidationError::InvalidSlug(self.slug.clone()));
        }
        if self.domains.is_empty() {
            return Err(TenantValidationError::NoDomains);
        }
        if let Some(idx) = self.domains.iter().position(|d| d.domain.trim().is_empty()) {
            return Err(TenantValidationError::EmptyDomain(idx));
        }
        for (field, value) in [
            ("primaryColor", &self.branding.primary_color),
            ("secondaryColor", &self.branding.secondary_color),
        ] {
            if !is_hex_color(value) {
                return Err(TenantValidationError::InvalidColor {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// True if `host` is one of the tenant's domains (ASCII case-insensitive).
    #[must_use]
    pub fn serves_domain(&self, host: &str) -> bool {
        self.domains
            .iter()
            .any(|d| d.domain.eq_ignore_ascii_case(host))
    }
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    fn acme() -> Tenant {
        serde_json::from_value(json!({
            "id": "t1",
            "name": "Acme",
            "slug": "acme-corp",
            "domains": [{"domain": "acme.example.com"}],
            "branding": {"primaryColor": "#ff0000", "buttonStyle": "pill"},
        }))
        .unwrap()
    }

    #[test]
    fn valid_tenant_passes() {
        let tenant = acme();
        assert_eq!(tenant.validate(), Ok(()));
        assert_eq!(tenant.branding.button_style, ButtonStyle::Pill);
        assert_eq!(tenant.branding.secondary_color, "#ffffff");
    }

    #[test]
    fn slug_rules() {
        for bad in ["", "-acme", "acme-", "Acme", "ac me", "acme_corp"] {
            let mut tenant = acme();
            tenant.slug = bad.to_owned();
            assert_eq!(
                tenant.validate(),
                Err(TenantValidationError::InvalidSlug(bad.to_owned()))
            );
        }
    }

    #[test]
    fn requires_a_domain() {
        let mut tenant = acme();
        tenant.domains.clear();
        assert_eq!(tenant.validate(), Err(TenantValidationError::NoDomains));

        tenant.domains.push(TenantDomain {
            domain: "  ".to_owned(),
        });
        assert_eq!(tenant.validate(), Err(TenantValidationError::EmptyDomain(0)));
    }

    #[test]
    fn rejects_bad_colors() {
        let mut tenant = acme();
        tenant.branding.secondary_color = "blue".to_owned();
        assert!(matches!(
            tenant.validate(),
            Err(TenantValidationError::InvalidColor {
                field: "secondaryColor",
                ..
            })
        ));
    }

    #[test]
    fn domain_lookup_ignores_case() {
        assert!(acme().serves_domain("ACME.example.com"));
        assert!(!acme().serves_domain("other.example.com"));
    }
}
