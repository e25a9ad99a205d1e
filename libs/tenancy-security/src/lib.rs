#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Identity primitives for the tenancy access core.
//!
//! - [`AuthUser`] - request-time snapshot of the authenticated user
//! - [`Role`], [`RoleSet`] - role tags carried by a user
//! - [`MembershipEntry`] - one tenant membership in any of its accepted shapes
//! - [`TenantIds`] - normalized tenant identifier set produced by the resolver
//! - [`RequestContext`] - what the host hands to every access decision
//! - [`Tenant`] - tenant record model with validation

pub mod context;
pub mod membership;
pub mod role;
pub mod tenant;
pub mod tenant_ids;
pub mod user;

pub use context::{RequestContext, RequestContextBuilder};
pub use membership::{MembershipEntry, TenantRef};
pub use role::{Role, RoleSet};
pub use tenant::{Branding, ButtonStyle, Tenant, TenantDomain, TenantValidationError};
pub use tenant_ids::{TenantIds, resolve_tenant_ids};
pub use user::AuthUser;
