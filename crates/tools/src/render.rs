//! Human-readable rendering of query results.
//!
//! Rendering is presentation only; the structured results come from
//! `pcparts_core`. Every amount is printed as `<currency> 12,345`.

use pcparts_core::build::{BuildSuggestion, LowBudgetAdvisory};
use pcparts_core::part::PartRecord;

const DELIMITER_WIDTH: usize = 30;

#[derive(Debug, Clone)]
pub struct Renderer {
    currency: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new("NT$")
    }
}

impl Renderer {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn money(&self, amount: f64) -> String {
        format!("{} {}", self.currency, group_thousands(amount))
    }

    pub fn category(&self, category: &str, parts: &[PartRecord]) -> String {
        let mut out = format!("[{} PARTS]\n", category.to_uppercase());
        for part in parts {
            let specs = serde_json::to_string_pretty(&part.specs).unwrap_or_default();
            out.push_str(&format!("\nName: {}", part.name));
            out.push_str(&format!("\nBrand: {}", part.brand));
            out.push_str(&format!("\nPrice: {}", self.money(part.price)));
            out.push_str(&format!("\nSpecs: {specs}"));
            out.push_str(&format!("\nLast updated: {}", part.last_updated));
            out.push_str(&delimiter());
        }
        out
    }

    pub fn unknown_category<'a>(
        &self,
        category: &str,
        available: impl IntoIterator<Item = &'a str>,
    ) -> String {
        let available: Vec<&str> = available.into_iter().collect();
        format!(
            "Category not found: {category}. Available categories: {}",
            available.join(", ")
        )
    }

    pub fn price_range(&self, min_price: f64, max_price: f64, parts: &[&PartRecord]) -> String {
        if parts.is_empty() {
            return format!(
                "No parts found priced between {} and {}",
                self.money(min_price),
                self.money(max_price)
            );
        }

        let mut out = format!(
            "Parts priced {} to {}:\n",
            self.money(min_price),
            self.money(max_price)
        );
        for part in parts {
            out.push_str(&format!("\nCategory: {}", part.category));
            out.push_str(&format!("\nName: {}", part.name));
            out.push_str(&format!("\nBrand: {}", part.brand));
            out.push_str(&format!("\nPrice: {}", self.money(part.price)));
            out.push_str(&delimiter());
        }
        out
    }

    pub fn advisory(&self, advisory: &LowBudgetAdvisory) -> String {
        format!(
            "Budget too low: at least {} is recommended to assemble a basic build",
            self.money(advisory.minimum)
        )
    }

    pub fn build(&self, suggestion: &BuildSuggestion<'_>) -> String {
        let mut out = format!(
            "Suggested build for a budget of {}:\n\n",
            self.money(suggestion.budget)
        );
        for pick in &suggestion.picks {
            out.push_str(&format!("{}:\n", pick.part.category));
            out.push_str(&format!("- {} ({})\n", pick.part.name, pick.part.brand));
            out.push_str(&format!("- Price: {}\n\n", self.money(pick.part.price)));
        }
        out.push_str(&format!(
            "Total for the six core parts: {}\n",
            self.money(suggestion.total)
        ));
        out.push_str(&format!(
            "Remaining budget: {}\n",
            self.money(suggestion.remaining)
        ));
        out.push_str("(Consider spending the remaining budget on storage, cooling and other accessories)");
        out
    }

    pub fn freshness(&self, latest: &str) -> String {
        format!("Prices last updated: {latest}")
    }
}

fn delimiter() -> String {
    format!("\n{}\n", "-".repeat(DELIMITER_WIDTH))
}

/// Format an amount with comma thousands separators.
///
/// Whole amounts print without decimals; anything else prints two.
pub fn group_thousands(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = whole.bytes().all(|b| b == b'0') && frac == "00";
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };
    if frac == "00" {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}
