use tenancy_security::RequestContext;

use super::{Collection, CollectionAccess};
use crate::combinators::{super_admin_only, tenant_scoped};
use crate::config::TenancyConfig;
use crate::decision::AccessDecision;

/// Tenants: managed by super-admins, readable by their members.
#[derive(Debug, Clone)]
pub struct Tenants {
    id_property: String,
}

impl Tenants {
    #[must_use]
    pub fn new(cfg: &TenancyConfig) -> Self {
        Self {
            id_property: cfg.id_property.clone(),
        }
    }
}

impl Default for Tenants {
    fn default() -> Self {
        Self::new(&TenancyConfig::default())
    }
}

impl CollectionAccess for Tenants {
    fn collection(&self) -> Collection {
        Collection::Tenants
    }

    fn create(&self, ctx: &RequestContext) -> AccessDecision {
        super_admin_only(ctx)
    }

    /// Members see the tenants they belong to.
    fn read(&self, ctx: &RequestContext) -> AccessDecision {
        tenant_scoped(ctx, &self.id_property)
    }

    fn update(&self, ctx: &RequestContext) -> AccessDecision {
        super_admin_only(ctx)
    }

    fn delete(&self, ctx: &RequestContext) -> AccessDecision {
        super_admin_only(ctx)
    }

    fn admin(&self, ctx: &RequestContext) -> AccessDecision {
        super_admin_only(ctx)
    }
}
