use tenancy_security::{RequestContext, Role};

use super::{Collection, CollectionAccess};
use crate::combinators::{authenticated, super_admin_only};
use crate::config::TenancyConfig;
use crate::constraint::Constraint;
use crate::decision::AccessDecision;
use crate::fields::FieldGuard;

/// Users: everyone sees themselves, tenant members see each other.
#[derive(Debug, Clone)]
pub struct Users {
    id_property: String,
    membership_field: String,
    membership_property: String,
}

impl Users {
    /// User field holding roles.
    pub const ROLES_FIELD: &'static str = "roles";

    #[must_use]
    pub fn new(cfg: &TenancyConfig) -> Self {
        Self {
            id_property: cfg.id_property.clone(),
            membership_field: cfg.membership_field.clone(),
            membership_property: cfg.membership_property(),
        }
    }

    /// Field-level override for `field`, if it has one.
    ///
    /// Existing roles and tenant memberships change only through super-admins,
    /// even on the caller's own record. Roles may be chosen at creation.
    #[must_use]
    pub fn field_guard(&self, field: &str) -> Option<FieldGuard> {
        if field == Self::ROLES_FIELD {
            Some(FieldGuard::ROLES)
        } else if field == self.membership_field {
            Some(FieldGuard::SUPER_ADMIN_WRITE)
        } else {
            None
        }
    }

    fn own_record(&self, user_id: &str) -> Constraint {
        Constraint::equals(self.id_property.as_str(), user_id)
    }
}

impl Default for Users {
    fn default() -> Self {
        Self::new(&TenancyConfig::default())
    }
}

impl CollectionAccess for Users {
    fn collection(&self) -> Collection {
        Collection::Users
    }

    /// Only super-admins and tenant-admins may provision users.
    fn create(&self, ctx: &RequestContext) -> AccessDecision {
        let Some(user) = ctx.user() else {
            return AccessDecision::DenyAll;
        };
        AccessDecision::from_bool(user.is_super_admin() || user.has_role(Role::TenantAdmin))
    }

    /// Own record, plus every user sharing one of the caller's tenants.
    fn read(&self, ctx: &RequestContext) -> AccessDecision {
        let Some(user) = ctx.user() else {
            return AccessDecision::DenyAll;
        };
        if user.is_super_admin() {
            return AccessDecision::GrantAll;
        }

        let own = self.own_record(user.id());
        let tenants = ctx.tenant_ids();
        if tenants.is_empty() {
            return AccessDecision::Filter(own);
        }
        AccessDecision::Filter(Constraint::any_of(vec![
            own,
            Constraint::is_in(self.membership_property.as_str(), tenants),
        ]))
    }

    fn update(&self, ctx: &RequestContext) -> AccessDecision {
        let Some(user) = ctx.user() else {
            return AccessDecision::DenyAll;
        };
        if user.is_super_admin() {
            return AccessDecision::GrantAll;
        }
        AccessDecision::Filter(self.own_record(user.id()))
    }

    fn delete(&self, ctx: &RequestContext) -> AccessDecision {
        super_admin_only(ctx)
    }

    fn admin(&self, ctx: &RequestContext) -> AccessDecision {
        authenticated(ctx)
    }
}
