//! Configuration for the access core.
//!
//! Sources merge in this order, later ones winning:
//!
//! 1. built-in defaults
//! 2. an optional YAML file
//! 3. `TENANCY_*` environment variables
//!
//! ```yaml
//! membership_field: tenants
//! membership_relation_key: tenant
//! id_property: id
//! page_tenant_property: tenant
//! default_created_role: tenant-admin
//! ```

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use tenancy_security::Role;

pub const ENV_PREFIX: &str = "TENANCY_";

const KEYS: &[&str] = &[
    "membership_field",
    "membership_relation_key",
    "id_property",
    "page_tenant_property",
    "default_created_role",
];

/// Configuration error
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to load tenancy config: {0}")]
    Load(#[from] figment::Error),
    #[error("config field '{field}' must not be empty")]
    EmptyField { field: &'static str },
    #[error("role '{role}' cannot be the default for created users")]
    ForbiddenDefaultRole { role: Role },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TenancyConfig {
    /// User field holding tenant memberships.
    pub membership_field: String,

    /// Key inside each membership entry pointing at the tenant.
    pub membership_relation_key: String,

    /// Record identifier property.
    pub id_property: String,

    /// Page field holding the owning tenant.
    pub page_tenant_property: String,

    /// Role given to users created without explicit roles by a non-super-admin.
    pub default_created_role: Role,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            membership_field: "tenants".to_owned(),
            membership_relation_key: "tenant".to_owned(),
            id_property: "id".to_owned(),
            page_tenant_property: "tenant".to_owned(),
            default_created_role: Role::TenantAdmin,
        }
    }
}

impl TenancyConfig {
    /// Figment with defaults, the optional YAML file and env overrides layered.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).only(KEYS))
    }

    /// Extracts and validates the configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` when extraction fails or a value is invalid.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let cfg: Self = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads from defaults, `path` (if any) and the environment.
    ///
    /// # Errors
    /// See [`TenancyConfig::from_figment`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment(path))
    }

    /// # Errors
    /// Returns `ConfigError` for empty names or a privileged default role.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("membership_field", &self.membership_field),
            ("membership_relation_key", &self.membership_relation_key),
            ("id_property", &self.id_property),
            ("page_tenant_property", &self.page_tenant_property),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField { field });
            }
        }
        match self.default_created_role {
            Role::SuperAdmin => Err(ConfigError::ForbiddenDefaultRole {
                role: self.default_created_role,
            }),
            Role::TenantAdmin | Role::TenantEditor => Ok(()),
        }
    }

    /// Filter property addressing the tenant of each user membership.
    #[must_use]
    pub fn membership_property(&self) -> String {
        format!("{}.{}", self.membership_field, self.membership_relation_key)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_are_valid() {
        let cfg = TenancyConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.membership_property(), "tenants.tenant");
    }

    #[test]
    fn file_then_env_precedence() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "tenancy.yaml",
                r"
membership_field: sites
default_created_role: tenant-editor
",
            )?;
            jail.set_env("TENANCY_MEMBERSHIP_FIELD", "workspaces");

            let cfg = TenancyConfig::load(Some(Path::new("tenancy.yaml"))).unwrap();

            assert_eq!(cfg.membership_field, "workspaces");
            assert_eq!(cfg.default_created_role, Role::TenantEditor);
            assert_eq!(cfg.membership_relation_key, "tenant");
            Ok(())
        });
    }

    #[test]
    fn unrelated_env_is_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("TENANCY_LOG_LEVEL", "debug");

            let cfg = TenancyConfig::load(None).unwrap();

            assert_eq!(cfg, TenancyConfig::default());
            Ok(())
        });
    }

    #[test]
    fn super_admin_default_role_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("TENANCY_DEFAULT_CREATED_ROLE", "super-admin");

            let err = TenancyConfig::load(None).unwrap_err();

            assert!(matches!(
                err,
                ConfigError::ForbiddenDefaultRole {
                    role: Role::SuperAdmin
                }
            ));
            Ok(())
        });
    }

    #[test]
    fn unknown_default_role_fails_to_load() {
        Jail::expect_with(|jail| {
            jail.set_env("TENANCY_DEFAULT_CREATED_ROLE", "billing-viewer");

            let err = TenancyConfig::load(None).unwrap_err();

            assert!(matches!(err, ConfigError::Load(_)));
            Ok(())
        });
    }

    #[test]
    fn empty_field_is_rejected() {
        let cfg = TenancyConfig {
            id_property: String::new(),
            ..TenancyConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::EmptyField {
                field: "id_property"
            })
        ));
    }

    #[test]
    fn unknown_file_keys_fail() {
        Jail::expect_with(|jail| {
            jail.create_file("tenancy.yaml", "tenant_field: x\n")?;

            let err = TenancyConfig::load(Some(Path::new("tenancy.yaml"))).unwrap_err();

            assert!(matches!(err, ConfigError::Load(_)));
            Ok(())
        });
    }
}
