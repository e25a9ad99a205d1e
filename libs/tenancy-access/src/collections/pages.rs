use tenancy_security::{RequestContext, Role};

use super::{Collection, CollectionAccess};
use crate::combinators::{authenticated, tenant_scoped, tenant_scoped_for_roles};
use crate::config::TenancyConfig;
use crate::decision::AccessDecision;

const EDITING_ROLES: &[Role] = &[Role::TenantAdmin, Role::TenantEditor];

/// Pages: owned by one tenant, edited by that tenant's admins and editors.
///
/// Create returns a filter as well. The host checks the inbound document with
/// [`AccessDecision::permits`], so a page can only be created inside one of
/// the caller's tenants.
#[derive(Debug, Clone)]
pub struct Pages {
    tenant_property: String,
}

impl Pages {
    #[must_use]
    pub fn new(cfg: &TenancyConfig) -> Self {
        Self {
            tenant_property: cfg.page_tenant_property.clone(),
        }
    }

    fn editable(&self, ctx: &RequestContext) -> AccessDecision {
        tenant_scoped_for_roles(ctx, &self.tenant_property, EDITING_ROLES)
    }
}

impl Default for Pages {
    fn default() -> Self {
        Self::new(&TenancyConfig::default())
    }
}

impl CollectionAccess for Pages {
    fn collection(&self) -> Collection {
        Collection::Pages
    }

    fn create(&self, ctx: &RequestContext) -> AccessDecision {
        self.editable(ctx)
    }

    fn read(&self, ctx: &RequestContext) -> AccessDecision {
        tenant_scoped(ctx, &self.tenant_property)
    }

    fn update(&self, ctx: &RequestContext) -> AccessDecision {
        self.editable(ctx)
    }

    fn delete(&self, ctx: &RequestContext) -> AccessDecision {
        self.editable(ctx)
    }

    fn admin(&self, ctx: &RequestContext) -> AccessDecision {
        authenticated(ctx)
    }
}
