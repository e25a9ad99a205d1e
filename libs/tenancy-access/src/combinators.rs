//! Shared building blocks for collection predicates.
//!
//! Every collection composes its rules from these helpers so that the
//! `super-admin` override and tenant scoping behave identically everywhere.

use tenancy_security::{RequestContext, Role};

use crate::constraint::Constraint;
use crate::decision::AccessDecision;

#[inline]
#[must_use]
pub fn is_super_admin(ctx: &RequestContext) -> bool {
    ctx.is_super_admin()
}

/// `GrantAll` for super-admins, `DenyAll` for everyone else.
#[must_use]
pub fn super_admin_only(ctx: &RequestContext) -> AccessDecision {
    AccessDecision::from_bool(is_super_admin(ctx))
}

/// `GrantAll` for any authenticated user.
#[must_use]
pub fn authenticated(ctx: &RequestContext) -> AccessDecision {
    AccessDecision::from_bool(ctx.is_authenticated())
}

/// Super-admins, or authenticated users holding at least one of `roles`.
#[must_use]
pub fn has_any_role(ctx: &RequestContext, roles: &[Role]) -> bool {
    ctx.user()
        .is_some_and(|u| u.is_super_admin() || u.roles().contains_any(roles))
}

/// Records whose `property` names one of the caller's tenants.
///
/// Super-admins get `GrantAll`; callers without any tenant get `DenyAll`.
#[must_use]
pub fn tenant_scoped(ctx: &RequestContext, property: &str) -> AccessDecision {
    if is_super_admin(ctx) {
        return AccessDecision::GrantAll;
    }
    let tenants = ctx.tenant_ids();
    if tenants.is_empty() {
        return AccessDecision::DenyAll;
    }
    AccessDecision::Filter(Constraint::is_in(property, tenants))
}

/// [`tenant_scoped`] restricted to callers holding one of `roles`.
#[must_use]
pub fn tenant_scoped_for_roles(
    ctx: &RequestContext,
    property: &str,
    roles: &[Role],
) -> AccessDecision {
    if !has_any_role(ctx, roles) {
        return AccessDecision::DenyAll;
    }
    tenant_scoped(ctx, property)
}

/// Field-level check: only super-admins.
#[must_use]
pub fn field_super_admin_only(ctx: &RequestContext) -> bool {
    is_super_admin(ctx)
}

/// Field-level check: any authenticated user.
#[must_use]
pub fn field_authenticated(ctx: &RequestContext) -> bool {
    ctx.is_authenticated()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use tenancy_security::{AuthUser, MembershipEntry};

    fn member(roles: &[Role], tenants: &[&str]) -> RequestContext {
        let user = AuthUser::new("u1")
            .with_roles(roles.iter().copied())
            .with_tenants(tenants.iter().map(|t| MembershipEntry::relation(*t)).collect());
        RequestContext::for_user(user)
    }

    #[test]
    fn tenant_scoped_outcomes() {
        assert_eq!(
            tenant_scoped(&RequestContext::anonymous(), "tenant"),
            AccessDecision::DenyAll
        );
        assert_eq!(
            tenant_scoped(&member(&[Role::SuperAdmin], &[]), "tenant"),
            AccessDecision::GrantAll
        );
        assert_eq!(
            tenant_scoped(&member(&[], &["t2", "t1"]), "tenant"),
            AccessDecision::Filter(Constraint::is_in("tenant", ["t1", "t2"]))
        );
        assert_eq!(
            tenant_scoped(&member(&[Role::TenantAdmin], &[]), "tenant"),
            AccessDecision::DenyAll
        );
    }

    #[test]
    fn role_gate_precedes_tenant_scope() {
        let editors = [Role::TenantEditor];

        assert!(tenant_scoped_for_roles(&member(&[], &["t1"]), "tenant", &editors).is_deny_all());
        assert!(
            tenant_scoped_for_roles(&member(&[Role::SuperAdmin], &[]), "tenant", &editors)
                .is_grant_all()
        );
        assert!(
            tenant_scoped_for_roles(&member(&[Role::TenantEditor], &["t1"]), "tenant", &editors)
                .constraint()
                .is_some()
        );
    }

    #[test]
    fn boolean_helpers() {
        let anon = RequestContext::anonymous();
        let admin = member(&[Role::SuperAdmin], &[]);
        let editor = member(&[Role::TenantEditor], &["t1"]);

        assert!(super_admin_only(&admin).is_grant_all());
        assert!(super_admin_only(&editor).is_deny_all());
        assert!(authenticated(&editor).is_grant_all());
        assert!(authenticated(&anon).is_deny_all());
        assert!(field_authenticated(&editor));
        assert!(!field_super_admin_only(&editor));
        assert!(has_any_role(&admin, &[Role::TenantAdmin]));
        assert!(!has_any_role(&anon, &[Role::TenantAdmin]));
    }
}
