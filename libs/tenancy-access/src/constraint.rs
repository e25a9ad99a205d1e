//! Declarative row filters produced by access predicates.
//!
//! A [`Constraint`] restricts which records an operation may touch. The host
//! `AND`s it onto its own query. Three renderings exist:
//!
//! - [`Constraint::to_where`] - the host's JSON `where` document
//! - [`Constraint::matches`] - in-memory check against one JSON document
//! - `tenancy_db::build_condition` - sea-orm `Condition`
//!
//! Only `Eq`, `In` and `Or` are supported.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// A filter over record properties.
///
/// Properties are dotted paths (`tenants.tenant`). Values are identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Constraint {
    /// Equality: `property = value`
    Eq { property: String, value: String },
    /// Set membership: `property IN (values)`
    In {
        property: String,
        values: Vec<String>,
    },
    /// A record matches if it satisfies ANY of the inner constraints.
    Or { any: Vec<Constraint> },
}

impl Constraint {
    #[must_use]
    pub fn equals(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Eq {
            property: property.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn is_in<I, S>(property: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::In {
            property: property.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Disjunction of `arms`. A single arm is returned as is.
    #[must_use]
    pub fn any_of(mut arms: Vec<Constraint>) -> Self {
        if arms.len() == 1
            && let Some(only) = arms.pop()
        {
            return only;
        }
        Self::Or { any: arms }
    }

    /// Renders the host's JSON `where` form.
    ///
    /// ```text
    /// Eq  -> { "<property>": { "equals": "<value>" } }
    /// In  -> { "<property>": { "in": [..] } }
    /// Or  -> { "or": [ .. ] }
    /// ```
    #[must_use]
    pub fn to_where(&self) -> Value {
        match self {
            Self::Eq { property, value } => field_clause(property, "equals", json!(value)),
            Self::In { property, values } => field_clause(property, "in", json!(values)),
            Self::Or { any } => json!({ "or": any.iter().map(Self::to_where).collect::<Vec<_>>() }),
        }
    }

    /// Evaluates the constraint against one record.
    ///
    /// Dotted paths descend through objects and fan out over arrays. A leaf
    /// matches if it is a string equal to the wanted value, or a populated
    /// relation object whose `id` is. A bare string where the last segment's
    /// object was expected stands for that relation's id, so `tenants.tenant`
    /// also reads `{"tenants": ["t1"]}`. Empty `In` and `Or` never match.
    #[must_use]
    pub fn matches(&self, record: &Value) -> bool {
        match self {
            Self::Eq { property, value } => lookup(record, property)
                .into_iter()
                .any(|found| found == value),
            Self::In { property, values } => lookup(record, property)
                .into_iter()
                .any(|found| values.iter().any(|v| v == found)),
            Self::Or { any } => any.iter().any(|c| c.matches(record)),
        }
    }
}

fn field_clause(property: &str, operator: &str, operand: Value) -> Value {
    let mut clause = Map::new();
    clause.insert(operator.to_owned(), operand);
    let mut root = Map::new();
    root.insert(property.to_owned(), Value::Object(clause));
    Value::Object(root)
}

fn lookup<'a>(record: &'a Value, path: &str) -> Vec<&'a str> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut nodes = vec![record];
    for (idx, segment) in segments.iter().enumerate() {
        let bare_leaf = idx > 0 && idx + 1 == segments.len();
        nodes = nodes
            .into_iter()
            .flat_map(fan_out)
            .filter_map(|node| match node {
                Value::String(_) if bare_leaf => Some(node),
                _ => node.get(*segment),
            })
            .collect();
    }
    nodes
        .into_iter()
        .flat_map(fan_out)
        .filter_map(|leaf| match leaf {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => map.get("id").and_then(Value::as_str),
            _ => None,
        })
        .collect()
}

fn fan_out(node: &Value) -> Vec<&Value> {
    match node {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}
