use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, IdenStatic, Iterable};
use tenancy_access::{AccessDecision, Constraint};
use tracing::warn;

/// An entity whose rows can be filtered by access constraints.
///
/// The default mapping resolves a property to the column of the same name.
/// Entities storing a property elsewhere (for example `tenants.tenant`
/// denormalized into a `tenant_id` column) override [`property_column`].
///
/// [`property_column`]: ScopableEntity::property_column
pub trait ScopableEntity: EntityTrait {
    /// Column backing `property`, or `None` if rows cannot be filtered on it.
    fn property_column(property: &str) -> Option<Self::Column> {
        Self::Column::iter().find(|c| c.as_str() == property)
    }
}

/// Builds a SeaORM `Condition` from an access decision.
///
/// # Rules
/// 1. **`GrantAll`** → empty `Condition::all()` (no restriction)
/// 2. **`DenyAll`** → `false`
/// 3. **`Eq`** → `col = value`
/// 4. **`In`** → `col IN (values)`; an empty set denies all instead of emitting `IN ()`
/// 5. **`Or`** → `Condition::any()` over the arms; no arms denies all
///
/// A property the entity cannot map denies all. The caller `AND`s the
/// result onto its own query.
#[must_use]
pub fn build_condition<E>(decision: &AccessDecision) -> Condition
where
    E: ScopableEntity,
{
    match decision {
        AccessDecision::GrantAll => Condition::all(),
        AccessDecision::DenyAll => deny_all(),
        AccessDecision::Filter(constraint) => constraint_condition::<E>(constraint),
    }
}

#[must_use]
pub fn constraint_condition<E>(constraint: &Constraint) -> Condition
where
    E: ScopableEntity,
{
    match constraint {
        Constraint::Eq { property, value } => match column::<E>(property) {
            Some(col) => Condition::all().add(ColumnTrait::eq(&col, value.as_str())),
            None => deny_all(),
        },
        Constraint::In { property, values } => {
            if values.is_empty() {
                return deny_all();
            }
            match column::<E>(property) {
                Some(col) => Condition::all().add(col.is_in(values.iter().map(String::as_str))),
                None => deny_all(),
            }
        }
        Constraint::Or { any } => {
            if any.is_empty() {
                return deny_all();
            }
            any.iter()
                .fold(Condition::any(), |cond, arm| cond.add(constraint_condition::<E>(arm)))
        }
    }
}

fn column<E: ScopableEntity>(property: &str) -> Option<E::Column> {
    let col = E::property_column(property);
    if col.is_none() {
        let entity = E::default();
        warn!(
            entity = entity.table_name(),
            property, "constraint property has no column, denying all"
        );
    }
    col
}

fn deny_all() -> Condition {
    Condition::all().add(Expr::value(false))
}
