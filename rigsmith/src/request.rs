//! Inbound request: what the user wants from a PC build.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Budget as sent by the client: a bare number or free text such as `"₹40,000 - ₹60,000"`.
///
/// Any whole JSON number is an amount, including `75000.0` and integers beyond `i64`.
/// Floats outside the `i128` range saturate. Fractional numbers are rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Budget {
    Amount(i128),
    Text(String),
}

impl<'de> Deserialize<'de> for Budget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BudgetVisitor)
    }
}

struct BudgetVisitor;

impl<'de> Visitor<'de> for BudgetVisitor {
    type Value = Budget;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a whole number or a string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Budget, E> {
        Ok(Budget::Amount(i128::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Budget, E> {
        Ok(Budget::Amount(i128::from(v)))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Budget, E> {
        Ok(Budget::Amount(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Budget, E> {
        if v.is_finite() && v.fract() == 0.0 {
            Ok(Budget::Amount(v as i128))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Budget, E> {
        Ok(Budget::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Budget, E> {
        Ok(Budget::Text(v))
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::Amount(n) => write!(f, "{}", n),
            Budget::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Budget {
    fn from(n: i64) -> Self {
        Budget::Amount(i128::from(n))
    }
}

impl From<&str> for Budget {
    fn from(s: &str) -> Self {
        Budget::Text(s.to_string())
    }
}

impl From<String> for Budget {
    fn from(s: String) -> Self {
        Budget::Text(s)
    }
}

/// Preferred brands: a list, or one string delimited by `;` `,` `|` `/` `\`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Brands {
    List(Vec<String>),
    Joined(String),
}

/// Validated request body. Immutable once deserialized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRequest {
    pub usage: String,
    #[serde(default, alias = "brands")]
    pub preferred_brands: Option<Brands>,
    #[serde(default)]
    pub speed: Option<String>,
    #[serde(default)]
    pub storage_capacity: Option<String>,
    #[serde(default)]
    pub graphics_power: Option<String>,
    #[serde(default)]
    pub quiet_cooling: Option<String>,
    #[serde(default)]
    pub budget: Option<Budget>,
}

impl UserRequest {
    pub fn new(usage: impl Into<String>) -> Self {
        Self {
            usage: usage.into(),
            ..Self::default()
        }
    }

    pub fn with_budget(mut self, budget: impl Into<Budget>) -> Self {
        self.budget = Some(budget.into());
        self
    }

    pub fn with_brands(mut self, brands: Brands) -> Self {
        self.preferred_brands = Some(brands);
        self
    }
}
