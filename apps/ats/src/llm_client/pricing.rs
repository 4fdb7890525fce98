//! Token pricing for cost estimation of provider calls.
//!
//! Prices are USD per 1M tokens as `(model, input, output)`. Unknown models fall
//! back to `DEFAULT_PRICING` so estimates err on the expensive side.

use super::Usage;

const MODEL_PRICING: &[(&str, f64, f64)] = &[
    ("chatgpt-4o-latest", 5.00, 15.00),
    ("gpt-4-turbo", 10.00, 30.00),
    ("gpt-4-turbo-2024-04-09", 10.00, 30.00),
    ("gpt-4-0125-preview", 10.00, 30.00),
    ("gpt-4-1106-preview", 10.00, 30.00),
    ("gpt-4", 30.00, 60.00),
    ("gpt-4-0613", 30.00, 60.00),
    ("gpt-4-32k", 60.00, 120.00),
    ("gpt-3.5-turbo", 0.50, 1.50),
    ("gpt-3.5-turbo-0125", 0.50, 1.50),
    ("gpt-3.5-turbo-1106", 1.00, 2.00),
    ("gpt-3.5-turbo-0613", 1.50, 2.00),
    ("gpt-3.5-turbo-instruct", 1.50, 2.00),
    ("gpt-3.5-turbo-16k", 3.00, 4.00),
];

const DEFAULT_PRICING: (f64, f64) = (10.00, 30.00);

/// `(input, output)` USD per 1M tokens for `model`.
pub fn price_for(model: &str) -> (f64, f64) {
    MODEL_PRICING
        .iter()
        .find(|(name, _, _)| *name == model)
        .map(|&(_, input, output)| (input, output))
        .unwrap_or(DEFAULT_PRICING)
}

/// Estimated USD cost of one call.
pub fn estimate_cost(model: &str, usage: &Usage) -> f64 {
    let (input, output) = price_for(model);
    (usage.prompt_tokens as f64 * input + usage.completion_tokens as f64 * output) / 1_000_000.0
}
