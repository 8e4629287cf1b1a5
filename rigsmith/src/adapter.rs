//! Input adapters: turn a [`UserRequest`] into the field block embedded in a prompt.
//!
//! Two variants exist. [`normalize`] adds derived fields (numeric budget, component
//! priorities) for the normalized pipeline; [`format_direct`] cleans brands and renders the
//! budget as currency for the direct pipeline. Both are pure and never fail.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::request::{Brands, Budget, UserRequest};

/// Budget assumed when the request carries no digits at all.
pub const DEFAULT_BUDGET: u64 = 80_000;

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid digit regex"));
static BRAND_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[;,|/\\]+").expect("valid brand separator regex"));

/// Relative importance of a component, derived from the stated usage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

/// Request fields plus values derived for the normalized prompt.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NormalizedInput {
    pub usage: String,
    pub preferred_brands: Option<Brands>,
    pub speed: Option<String>,
    pub storage_capacity: Option<String>,
    pub graphics_power: Option<String>,
    pub quiet_cooling: Option<String>,
    pub budget: Option<Budget>,
    pub budget_numeric: u64,
    pub gpu_priority: Priority,
    pub cpu_priority: Priority,
    pub storage_priority: String,
}

/// Request fields cleaned up for the direct prompt.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormattedInput {
    pub usage: String,
    pub preferred_brands: Option<Vec<String>>,
    pub speed: Option<String>,
    pub storage_capacity: Option<String>,
    pub graphics_power: Option<String>,
    pub quiet_cooling: Option<String>,
    pub budget: Option<String>,
    pub budget_raw: Option<Budget>,
}

/// Digit runs of the budget text after dropping `,` separators. Runs too long for `u64`
/// saturate at `u64::MAX`.
fn budget_numbers(budget: &Budget) -> Vec<u64> {
    let text = budget.to_string().replace(',', "").replace('₹', "");
    DIGIT_RUN
        .find_iter(&text)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .collect()
}

/// Single amount, or the floor of the midpoint of the first two numbers of a range;
/// [`DEFAULT_BUDGET`] when there is nothing to parse.
pub fn parse_budget_amount(budget: Option<&Budget>) -> u64 {
    let nums = budget.map(budget_numbers).unwrap_or_default();
    match nums.as_slice() {
        [] => DEFAULT_BUDGET,
        [single] => *single,
        [low, high, ..] => ((u128::from(*low) + u128::from(*high)) / 2) as u64,
    }
}

/// Renders `n` with `,` every three digits: `100000` -> `100,000`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `₹low - ₹high` for a range, `₹amount` for a single value; text without digits is
/// returned unchanged.
pub fn format_budget(budget: &Budget) -> String {
    match budget_numbers(budget).as_slice() {
        [] => budget.to_string(),
        [amount] => format!("₹{}", group_thousands(*amount)),
        [low, high, ..] => format!("₹{} - ₹{}", group_thousands(*low), group_thousands(*high)),
    }
}

/// Trimmed, non-empty, first-seen-order unique brand names. `None` when nothing is left.
pub fn normalize_brands(brands: &Brands) -> Option<Vec<String>> {
    let parts: Vec<&str> = match brands {
        Brands::List(items) => items.iter().map(String::as_str).collect(),
        Brands::Joined(s) => BRAND_SEPARATORS.split(s).collect(),
    };
    let mut out: Vec<String> = Vec::new();
    for part in parts {
        let p = part.trim();
        if !p.is_empty() && !out.iter().any(|seen| seen == p) {
            out.push(p.to_string());
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// GPU priority is high for gaming; CPU priority is high for editing or programming.
pub fn derive_priorities(usage: &str) -> (Priority, Priority) {
    let usage = usage.to_lowercase();
    let gpu = if usage.contains("gaming") {
        Priority::High
    } else {
        Priority::Medium
    };
    let cpu = if usage.contains("editing") || usage.contains("programming") {
        Priority::High
    } else {
        Priority::Medium
    };
    (gpu, cpu)
}

pub fn normalize(req: &UserRequest) -> NormalizedInput {
    let (gpu_priority, cpu_priority) = derive_priorities(&req.usage);
    NormalizedInput {
        usage: req.usage.clone(),
        preferred_brands: req.preferred_brands.clone(),
        speed: req.speed.clone(),
        storage_capacity: req.storage_capacity.clone(),
        graphics_power: req.graphics_power.clone(),
        quiet_cooling: req.quiet_cooling.clone(),
        budget: req.budget.clone(),
        budget_numeric: parse_budget_amount(req.budget.as_ref()),
        gpu_priority,
        cpu_priority,
        storage_priority: req
            .storage_capacity
            .clone()
            .unwrap_or_else(|| "medium".to_string()),
    }
}

pub fn format_direct(req: &UserRequest) -> FormattedInput {
    FormattedInput {
        usage: req.usage.clone(),
        preferred_brands: req.preferred_brands.as_ref().and_then(normalize_brands),
        speed: req.speed.clone(),
        storage_capacity: req.storage_capacity.clone(),
        graphics_power: req.graphics_power.clone(),
        quiet_cooling: req.quiet_cooling.clone(),
        budget: req.budget.as_ref().map(format_budget),
        budget_raw: req.budget.clone(),
    }
}
