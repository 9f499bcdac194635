//! Model pricing table

use std::collections::HashMap;

/// Price of a model per 1K tokens, in USD
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModelPrice {
    pub prompt_price_per_1k: f64,
    pub completion_price_per_1k: f64,
}

impl ModelPrice {
    pub const FREE: ModelPrice = ModelPrice::new(0.0, 0.0);

    pub const fn new(prompt_per_1k: f64, completion_per_1k: f64) -> Self {
        Self {
            prompt_price_per_1k: prompt_per_1k,
            completion_price_per_1k: completion_per_1k,
        }
    }

    /// Calculate cost in USD for given token counts
    pub fn calculate_cost(&self, prompt_tokens: u32, completion_tokens: u32) -> f64 {
        (f64::from(prompt_tokens) / 1000.0) * self.prompt_price_per_1k
            + (f64::from(completion_tokens) / 1000.0) * self.completion_price_per_1k
    }
}

const DEFAULT_PRICES: &[(&str, ModelPrice)] = &[
    ("ada", ModelPrice::new(0.0004, 0.0004)),
    ("babbage", ModelPrice::new(0.0005, 0.0005)),
    ("curie", ModelPrice::new(0.0020, 0.0020)),
    ("davinci", ModelPrice::new(0.0200, 0.0200)),
    ("gpt-3.5-turbo", ModelPrice::new(0.002, 0.002)),
    ("gpt-3.5-turbo-16k", ModelPrice::new(0.003, 0.004)),
    ("gpt-4", ModelPrice::new(0.03, 0.06)),
    ("gpt-4-32k", ModelPrice::new(0.06, 0.12)),
];

/// Read-only lookup from exact model id to price.
///
/// Built once and shared by reference; unknown models are free.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    prices: HashMap<String, ModelPrice>,
}

impl PriceTable {
    pub fn new(prices: HashMap<String, ModelPrice>) -> Self {
        Self { prices }
    }

    pub fn price(&self, model_id: &str) -> ModelPrice {
        self.prices.get(model_id).copied().unwrap_or(ModelPrice::FREE)
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.prices.contains_key(model_id)
    }

    /// Estimated cost in USD. Never fails; unlisted models cost nothing.
    pub fn cost(&self, model_id: &str, prompt_tokens: u32, completion_tokens: u32) -> f64 {
        self.price(model_id)
            .calculate_cost(prompt_tokens, completion_tokens)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        DEFAULT_PRICES
            .iter()
            .map(|(model, price)| (model.to_string(), *price))
            .collect()
    }
}

impl FromIterator<(String, ModelPrice)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (String, ModelPrice)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_gpt4_cost() {
        let table = PriceTable::default();

        // 10 prompt + 5 completion = 10/1000*0.03 + 5/1000*0.06
        let cost = table.cost("gpt-4", 10, 5);
        assert!(approx_eq(cost, 0.0006));
    }

    #[test]
    fn test_known_models_follow_formula() {
        let table = PriceTable::default();

        for (model, price) in DEFAULT_PRICES {
            for (p, c) in [(0, 0), (1, 1), (1000, 500), (123_456, 7)] {
                let expected = (f64::from(p) / 1000.0) * price.prompt_price_per_1k
                    + (f64::from(c) / 1000.0) * price.completion_price_per_1k;
                assert!(approx_eq(table.cost(model, p, c), expected), "{model} {p} {c}");
            }
        }
    }

    #[test]
    fn test_unknown_model_is_free() {
        let table = PriceTable::default();

        assert_eq!(table.cost("gpt-4o", 1000, 1000), 0.0);
        assert_eq!(table.cost("", 10, 10), 0.0);
        // exact match only
        assert_eq!(table.cost("GPT-4", 10, 10), 0.0);
        assert_eq!(table.cost("gpt-4-0613", 10, 10), 0.0);
    }

    #[test]
    fn test_default_table_entries() {
        let table = PriceTable::default();

        assert_eq!(table.len(), 8);
        assert!(table.contains("gpt-4-32k"));
        assert_eq!(table.price("gpt-3.5-turbo-16k"), ModelPrice::new(0.003, 0.004));
        assert_eq!(table.price("unknown"), ModelPrice::FREE);
    }

    #[test]
    fn test_custom_table() {
        let table: PriceTable = [("local-model".to_string(), ModelPrice::new(1.0, 2.0))]
            .into_iter()
            .collect();

        assert!(approx_eq(table.cost("local-model", 1000, 1000), 3.0));
        assert_eq!(table.cost("gpt-4", 1000, 1000), 0.0);
    }
}
