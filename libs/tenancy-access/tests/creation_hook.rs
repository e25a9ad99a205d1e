#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::{Map, Value, json};
use tenancy_access::{AccessPolicy, Collection, FieldOperation, Operation};
use tenancy_security::{AuthUser, RequestContext, Role};

fn object(v: Value) -> Map<String, Value> {
    v.as_object().cloned().unwrap()
}

fn creator(roles: &[Role], tenants: Value) -> RequestContext {
    let user: AuthUser = serde_json::from_value(json!({
        "id": "creator",
        "roles": roles,
        "tenants": tenants,
    }))
    .unwrap();
    RequestContext::for_user(user)
}

#[test]
fn tenant_admin_provisions_into_own_tenants() {
    let policy = AccessPolicy::default();
    let ctx = creator(&[Role::TenantAdmin], json!(["t2", {"tenant": {"id": "t1"}}]));

    let out = policy.before_user_change(&ctx, Operation::Create, Map::new());

    assert_eq!(
        Value::Object(out),
        json!({
            "tenants": [{"tenant": "t1"}, {"tenant": "t2"}],
            "roles": ["tenant-admin"],
        })
    );
}

#[test]
fn requested_tenants_are_overwritten_not_merged() {
    let policy = AccessPolicy::default();
    let ctx = creator(&[Role::TenantAdmin], json!(["t1"]));

    let out = policy.before_user_change(
        &ctx,
        Operation::Create,
        object(json!({
            "email": "new@example.com",
            "tenants": [{"tenant": "t1"}, {"tenant": "victim"}],
        })),
    );

    assert_eq!(out.get("tenants"), Some(&json!([{"tenant": "t1"}])));
    assert_eq!(out.get("email"), Some(&json!("new@example.com")));
}

#[test]
fn super_admin_payload_passes_through() {
    let policy = AccessPolicy::default();
    let ctx = creator(&[Role::SuperAdmin], json!(["t1"]));
    let payload = object(json!({
        "tenants": [{"tenant": "t7"}, {"tenant": "t8"}],
        "roles": ["super-admin"],
    }));

    let out = policy.before_user_change(&ctx, Operation::Create, payload.clone());

    assert_eq!(out, payload);
}

#[test]
fn anonymous_payload_passes_through() {
    let policy = AccessPolicy::default();
    let payload = object(json!({"email": "signup@example.com"}));

    let out = policy.before_user_change(&RequestContext::anonymous(), Operation::Create, payload.clone());

    assert_eq!(out, payload);
}

#[test]
fn updates_are_left_alone() {
    let policy = AccessPolicy::default();
    let ctx = creator(&[Role::TenantAdmin], json!(["t1"]));
    let payload = object(json!({"name": "Renamed"}));

    for op in [Operation::Update, Operation::Delete] {
        let out = policy.before_user_change(&ctx, op, payload.clone());
        assert_eq!(out, payload);
    }
}

#[test]
fn roles_chosen_at_creation_are_allowed_and_kept() {
    let policy = AccessPolicy::default();
    let ctx = creator(&[Role::TenantAdmin], json!(["t1"]));

    assert!(policy.evaluate(Collection::Users, Operation::Create, &ctx).is_grant_all());
    assert!(policy.field_allows(Collection::Users, "roles", FieldOperation::Create, &ctx));

    let out = policy.before_user_change(
        &ctx,
        Operation::Create,
        object(json!({"roles": ["tenant-editor"]})),
    );

    assert_eq!(out.get("roles"), Some(&json!(["tenant-editor"])));
}

#[test]
fn anonymous_cannot_choose_roles() {
    let policy = AccessPolicy::default();

    assert!(!policy.field_allows(
        Collection::Users,
        "roles",
        FieldOperation::Create,
        &RequestContext::anonymous()
    ));
}
