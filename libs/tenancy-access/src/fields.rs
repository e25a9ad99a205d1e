//! Field-level access overrides.
//!
//! A field guard narrows what the record-level predicate allows for one
//! field. Field checks are plain booleans.

use std::fmt;

use serde::{Deserialize, Serialize};
use tenancy_security::RequestContext;

use crate::combinators::{field_authenticated, field_super_admin_only};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOperation {
    Create,
    Read,
    Update,
}

impl fmt::Display for FieldOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
        })
    }
}

type FieldCheck = fn(&RequestContext) -> bool;

#[derive(Clone, Copy)]
pub struct FieldGuard {
    create: FieldCheck,
    read: FieldCheck,
    update: FieldCheck,
}

impl FieldGuard {
    /// Readable by any authenticated user, writable by super-admins only.
    pub const SUPER_ADMIN_WRITE: Self = Self {
        create: field_super_admin_only,
        read: field_authenticated,
        update: field_super_admin_only,
    };

    /// Settable on new records by any authenticated user, changeable by
    /// super-admins only. Creation by a non-super-admin goes through
    /// [`TenantInheritance`](crate::TenantInheritance), which strips `super-admin`.
    pub const ROLES: Self = Self {
        create: field_authenticated,
        read: field_authenticated,
        update: field_super_admin_only,
    };

    #[must_use]
    pub fn allows(&self, operation: FieldOperation, ctx: &RequestContext) -> bool {
        let check = match operation {
            FieldOperation::Create => self.create,
            FieldOperation::Read => self.read,
            FieldOperation::Update => self.update,
        };
        check(ctx)
    }
}

impl fmt::Debug for FieldGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldGuard").finish_non_exhaustive()
    }
}
