use crate::{
    model::{EntityKind, FieldValues},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    ops::{BitAnd, BitOr, Not},
};
use thiserror::Error as ThisError;

///
/// QueryError
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("unknown field {field:?} (entity {entity})")]
    UnknownField { entity: &'static str, field: String },
}

///
/// Cmp
/// Comparison operators a clause may apply to a field.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cmp {
    Contains,
    ContainsCi,
    EndsWith,
    Eq,
    Gt,
    Gte,
    In,
    IsNone,
    IsSome,
    Lt,
    Lte,
    Ne,
    StartsWith,
}

impl Cmp {
    fn eval(self, actual: &Value, expected: &Value) -> bool {
        match self {
            Self::Eq => actual == expected,
            Self::Ne => actual != expected,
            Self::Lt => ordered(actual, expected, Ordering::is_lt),
            Self::Lte => ordered(actual, expected, Ordering::is_le),
            Self::Gt => ordered(actual, expected, Ordering::is_gt),
            Self::Gte => ordered(actual, expected, Ordering::is_ge),
            Self::Contains => text_pair(actual, expected, |a, e| a.contains(e)),
            Self::ContainsCi => text_pair(actual, expected, |a, e| {
                a.to_lowercase().contains(&e.to_lowercase())
            }),
            Self::StartsWith => text_pair(actual, expected, |a, e| a.starts_with(e)),
            Self::EndsWith => text_pair(actual, expected, |a, e| a.ends_with(e)),
            Self::In => match expected {
                Value::List(options) => options.contains(actual),
                _ => false,
            },
            Self::IsNone => actual.is_null(),
            Self::IsSome => !actual.is_null(),
        }
    }
}

fn ordered(actual: &Value, expected: &Value, pred: fn(Ordering) -> bool) -> bool {
    actual.partial_cmp_value(expected).is_some_and(pred)
}

fn text_pair(actual: &Value, expected: &Value, pred: impl Fn(&str, &str) -> bool) -> bool {
    match (actual.as_text(), expected.as_text()) {
        (Some(a), Some(e)) => pred(a, e),
        _ => false,
    }
}

///
/// FilterClause
/// A basic comparison: `field cmp value`.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FilterClause {
    pub field: String,
    pub cmp: Cmp,
    pub value: Value,
}

impl FilterClause {
    #[must_use]
    pub fn new(field: impl Into<String>, cmp: Cmp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            cmp,
            value: value.into(),
        }
    }

    fn matches<E: EntityKind + FieldValues>(&self, entity: &E) -> Result<bool, QueryError> {
        let actual = entity.field(&self.field).ok_or_else(|| {
            QueryError::UnknownField {
                entity: E::PATH,
                field: self.field.clone(),
            }
        })?;

        Ok(self.cmp.eval(&actual, &self.value))
    }
}

///
/// FilterExpr
///
/// Logical expression over clauses: constants, a single clause, or the
/// composites `And`, `Or`, and `Not`. Mismatched comparison types make a
/// clause false; only an unknown field name is an error.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub enum FilterExpr {
    #[default]
    True,
    False,
    Clause(FilterClause),
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
}

impl FilterExpr {
    pub fn clause(field: impl Into<String>, cmp: Cmp, value: impl Into<Value>) -> Self {
        Self::Clause(FilterClause::new(field, cmp, value))
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::clause(field, Cmp::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::clause(field, Cmp::Ne, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::clause(field, Cmp::Lt, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::clause(field, Cmp::Lte, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::clause(field, Cmp::Gt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::clause(field, Cmp::Gte, value)
    }

    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::clause(field, Cmp::Contains, value)
    }

    pub fn contains_ci(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::clause(field, Cmp::ContainsCi, value)
    }

    pub fn starts_with(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::clause(field, Cmp::StartsWith, value)
    }

    pub fn ends_with(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::clause(field, Cmp::EndsWith, value)
    }

    pub fn in_iter<I>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::clause(
            field,
            Cmp::In,
            Value::List(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn is_some(field: impl Into<String>) -> Self {
        Self::clause(field, Cmp::IsSome, Value::Null)
    }

    pub fn is_none(field: impl Into<String>) -> Self {
        Self::clause(field, Cmp::IsNone, Value::Null)
    }

    /// Evaluate against one entity.
    pub fn matches<E: EntityKind + FieldValues>(&self, entity: &E) -> Result<bool, QueryError> {
        match self {
            Self::True => Ok(true),
            Self::False => Ok(false),
            Self::Clause(clause) => clause.matches(entity),
            Self::And(children) => {
                // no short circuit on False: an unknown field must still error
                let mut all = true;
                for child in children {
                    all &= child.matches(entity)?;
                }
                Ok(all)
            }
            Self::Or(children) => {
                let mut any = false;
                for child in children {
                    any |= child.matches(entity)?;
                }
                Ok(any)
            }
            Self::Not(inner) => Ok(!inner.matches(entity)?),
        }
    }

    /// Combine into an `And`, flattening nested `And`s.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::And(mut a), Self::And(mut b)) => {
                a.append(&mut b);
                Self::And(a)
            }
            (Self::And(mut a), b) => {
                a.push(b);
                Self::And(a)
            }
            (a, Self::And(mut b)) => {
                let mut list = vec![a];
                list.append(&mut b);
                Self::And(list)
            }
            (a, b) => Self::And(vec![a, b]),
        }
    }

    /// Combine into an `Or`, flattening nested `Or`s.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::Or(mut a), Self::Or(mut b)) => {
                a.append(&mut b);
                Self::Or(a)
            }
            (Self::Or(mut a), b) => {
                a.push(b);
                Self::Or(a)
            }
            (a, Self::Or(mut b)) => {
                let mut list = vec![a];
                list.append(&mut b);
                Self::Or(list)
            }
            (a, b) => Self::Or(vec![a, b]),
        }
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Simplify recursively: double negation, De Morgan over composites,
    /// flattening, neutral-element removal, constant short-circuits.
    #[must_use]
    pub fn simplify(self) -> Self {
        match self {
            Self::Not(inner) => match *inner {
                Self::True => Self::False,
                Self::False => Self::True,
                Self::Not(inner2) => (*inner2).simplify(),
                Self::And(children) => {
                    Self::Or(children.into_iter().map(|c| c.not().simplify()).collect())
                }
                Self::Or(children) => {
                    Self::And(children.into_iter().map(|c| c.not().simplify()).collect())
                }
                clause @ Self::Clause(_) => Self::Not(Box::new(clause.simplify())),
            },

            Self::And(children) => {
                let flat = Self::simplify_children(children, |e| matches!(e, Self::And(_)));

                if flat.iter().any(|e| matches!(e, Self::False)) {
                    Self::False
                } else {
                    let kept: Vec<_> = flat
                        .into_iter()
                        .filter(|e| !matches!(e, Self::True))
                        .collect();

                    match kept.len() {
                        0 => Self::True,
                        1 => kept.into_iter().next().unwrap(),
                        _ => Self::And(kept),
                    }
                }
            }

            Self::Or(children) => {
                let flat = Self::simplify_children(children, |e| matches!(e, Self::Or(_)));

                if flat.iter().any(|e| matches!(e, Self::True)) {
                    Self::True
                } else {
                    let kept: Vec<_> = flat
                        .into_iter()
                        .filter(|e| !matches!(e, Self::False))
                        .collect();

                    match kept.len() {
                        0 => Self::False,
                        1 => kept.into_iter().next().unwrap(),
                        _ => Self::Or(kept),
                    }
                }
            }

            leaf => leaf,
        }
    }

    fn simplify_children(children: Vec<Self>, flatten_if: fn(&Self) -> bool) -> Vec<Self> {
        let mut flat = Vec::with_capacity(children.len());

        for child in children {
            let simplified = child.simplify();
            if flatten_if(&simplified) {
                if let Self::And(nested) | Self::Or(nested) = simplified {
                    flat.extend(nested);
                }
            } else {
                flat.push(simplified);
            }
        }

        flat
    }
}

impl BitAnd for FilterExpr {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitOr for FilterExpr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl Not for FilterExpr {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}

///
/// TESTS
///
