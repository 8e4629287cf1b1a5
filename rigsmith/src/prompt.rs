//! Prompt text for both pipeline variants.
//!
//! The user's fields are embedded as pretty-printed JSON, followed by a literal JSON-array
//! template naming every field a build must carry. Both variants share that output contract
//! and differ only in phrasing and in the input block.

use serde::Serialize;

use crate::adapter::{FormattedInput, NormalizedInput};

/// Output template shown to the model. Valid JSON: one object with every build field.
pub const OUTPUT_TEMPLATE: &str = r#"[
  {
    "build_name": "Short descriptive name",
    "cpu": "CPU model",
    "gpu": "GPU model",
    "ram": "RAM configuration",
    "storage": "SSD / HDD configuration",
    "motherboard": "Motherboard suggestion",
    "psu": "Power supply suggestion",
    "cabinet": "Cabinet type",
    "estimated_price": "Approximate total price in INR (₹)",
    "why_this_build": "2-3 line explanation tailored to the user"
  }
]"#;

fn pretty_block<T: Serialize>(input: &T) -> String {
    serde_json::to_string_pretty(input).unwrap_or_else(|_| "{}".to_string())
}

/// Prompt for the direct pipeline: form inputs with explicit priority rules.
pub fn build_direct_prompt(input: &FormattedInput) -> String {
    format!(
        r#"You are an expert professional PC builder with deep knowledge of modern computer hardware and Indian market pricing.

TASK:
Return the BEST 3 complete PC builds based DIRECTLY on the user's FORM INPUTS below.

PRIORITY RULES:
- Use `usage` as the primary driver.
- Respect `preferred_brands` when possible.
- Honor `budget` and use Indian pricing (₹) in `estimated_price`.
- Optimize for `speed`, `storage_capacity`, `graphics_power` and `quiet_cooling` as specified.
- Explain in `why_this_build` how the build meets the budget, brand, usage, speed, storage, graphics and cooling preferences.
- Do NOT include confidence scores, metadata, or any natural language outside the JSON.

USER FORM INPUT:
{block}

OUTPUT (STRICT JSON ONLY):
{template}

Return EXACTLY 3 builds as a JSON array. Return ONLY valid JSON: no markdown code fences, no text before or after the array.
"#,
        block = pretty_block(input),
        template = OUTPUT_TEMPLATE,
    )
}

/// Prompt for the normalized pipeline: derived priorities and a numeric budget.
pub fn build_normalized_prompt(input: &NormalizedInput) -> String {
    format!(
        r#"You are an expert PC builder in India.

User requirements (budget_numeric is the target total in INR; *_priority fields say which components matter most):
{block}

Use the budget, preferred brands, usage, speed, storage, graphics and cooling preferences to choose parts, and explain that choice in `why_this_build`.
Give `estimated_price` in Indian rupees formatted with the ₹ symbol.

Return EXACTLY 3 PC builds in JSON array format ONLY.
No text, no markdown, no code fences.

{template}
"#,
        block = pretty_block(input),
        template = OUTPUT_TEMPLATE,
    )
}
