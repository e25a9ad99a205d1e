//! Mutation hooks run by the host before a user record is written.

use serde_json::{Map, Value};
use tenancy_security::{RequestContext, Role};
use tracing::{debug, instrument, warn};

use crate::collections::{Operation, Users};
use crate::config::TenancyConfig;

/// Confines users created by non-super-admins to the creator's tenants.
///
/// On `create` by an authenticated non-super-admin the membership field is
/// replaced (never merged) with the creator's tenants, and missing roles
/// default to the configured role. Super-admins, anonymous callers and other
/// operations pass through untouched.
#[derive(Debug, Clone)]
pub struct TenantInheritance {
    membership_field: String,
    relation_key: String,
    default_role: Role,
}

impl TenantInheritance {
    #[must_use]
    pub fn new(cfg: &TenancyConfig) -> Self {
        Self {
            membership_field: cfg.membership_field.clone(),
            relation_key: cfg.membership_relation_key.clone(),
            default_role: cfg.default_created_role,
        }
    }

    #[instrument(skip_all, fields(operation = %operation))]
    #[must_use]
    pub fn apply(
        &self,
        ctx: &RequestContext,
        operation: Operation,
        mut payload: Map<String, Value>,
    ) -> Map<String, Value> {
        if operation != Operation::Create {
            return payload;
        }
        let Some(creator) = ctx.user() else {
            return payload;
        };
        if creator.is_super_admin() {
            return payload;
        }

        let tenants = ctx.tenant_ids();
        let memberships: Vec<Value> = tenants
            .iter()
            .map(|id| {
                let mut entry = Map::new();
                entry.insert(self.relation_key.clone(), Value::String(id.to_owned()));
                Value::Object(entry)
            })
            .collect();
        payload.insert(self.membership_field.clone(), Value::Array(memberships));

        let roles = payload.get(Users::ROLES_FIELD);
        if roles.is_some_and(grants_super_admin) {
            warn!(creator = creator.id(), "dropping super-admin role requested by non-super-admin");
            payload.remove(Users::ROLES_FIELD);
        }
        if payload.get(Users::ROLES_FIELD).is_none_or(Value::is_null) {
            payload.insert(
                Users::ROLES_FIELD.to_owned(),
                Value::Array(vec![Value::String(self.default_role.as_str().to_owned())]),
            );
        }

        debug!(
            creator = creator.id(),
            tenant_count = tenants.len(),
            "new user inherits creator tenants"
        );
        payload
    }
}

impl Default for TenantInheritance {
    fn default() -> Self {
        Self::new(&TenancyConfig::default())
    }
}

fn grants_super_admin(roles: &Value) -> bool {
    let tag = Value::String(Role::SuperAdmin.as_str().to_owned());
    match roles {
        Value::Array(items) => items.contains(&tag),
        other => *other == tag,
    }
}
