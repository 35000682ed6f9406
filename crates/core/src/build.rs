//! Build suggestion engine.
//!
//! Splits a total budget evenly across six required categories and picks
//! one part per category:
//!
//! 1. Among parts priced at or below the sub-budget, take the most
//!    expensive one (spend as much of the sub-budget as possible).
//! 2. If nothing fits, take the cheapest part of the category even though
//!    it overspends, so every category always yields a pick.
//!
//! Ties go to the part encountered first in catalog order. Because of the
//! fallback, `remaining` may come out negative.

use serde::Serialize;
use tracing::debug;

use crate::catalog::CatalogIndex;
use crate::error::CatalogError;
use crate::part::PartRecord;

/// Budgets below this produce an advisory instead of a suggestion.
pub const MIN_BUILD_BUDGET: f64 = 20_000.0;

/// The categories every build must cover, in presentation order.
pub const BUILD_CATEGORIES: [&str; 6] = ["cpu", "gpu", "motherboard", "ram", "psu", "case"];

/// The result of [`suggest_build`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildOutcome<'a> {
    /// Budget below [`MIN_BUILD_BUDGET`]; no selection was performed.
    Advisory(LowBudgetAdvisory),
    Suggested(BuildSuggestion<'a>),
}

/// Identical for every budget below the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LowBudgetAdvisory {
    pub minimum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildSuggestion<'a> {
    pub budget: f64,
    pub per_part_budget: f64,
    /// One pick per entry of [`BUILD_CATEGORIES`], same order.
    pub picks: Vec<Pick<'a>>,
    pub total: f64,
    /// `budget - total`; negative when fallbacks overspent.
    pub remaining: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pick<'a> {
    pub category: &'static str,
    pub part: &'a PartRecord,
    /// False when the part came from the cheapest-in-category fallback.
    pub within_budget: bool,
}

/// Suggest a balanced build for `budget`.
///
/// Fails with [`CatalogError::CategoryMissing`] if any required category
/// has no parts; no partial suggestion is returned in that case.
pub fn suggest_build(index: &CatalogIndex, budget: f64) -> Result<BuildOutcome<'_>, CatalogError> {
    if budget < MIN_BUILD_BUDGET {
        debug!(budget, minimum = MIN_BUILD_BUDGET, "budget below build minimum");
        return Ok(BuildOutcome::Advisory(LowBudgetAdvisory {
            minimum: MIN_BUILD_BUDGET,
        }));
    }

    let mut pools = Vec::with_capacity(BUILD_CATEGORIES.len());
    for category in BUILD_CATEGORIES {
        match index.get(category) {
            Some(parts) if !parts.is_empty() => pools.push((category, parts)),
            _ => return Err(CatalogError::CategoryMissing(category.to_string())),
        }
    }

    let per_part_budget = budget / BUILD_CATEGORIES.len() as f64;
    let picks: Vec<Pick<'_>> = pools
        .into_iter()
        .map(|(category, parts)| {
            let pick = select_part(category, parts, per_part_budget);
            debug!(
                category,
                part = %pick.part.name,
                price = pick.part.price,
                within_budget = pick.within_budget,
                "selected build part"
            );
            pick
        })
        .collect();

    let total: f64 = picks.iter().map(|p| p.part.price).sum();

    Ok(BuildOutcome::Suggested(BuildSuggestion {
        budget,
        per_part_budget,
        picks,
        total,
        remaining: budget - total,
    }))
}

/// Most expensive affordable part, else the cheapest overall.
///
/// `parts` must be non-empty.
fn select_part<'a>(category: &'static str, parts: &'a [PartRecord], cap: f64) -> Pick<'a> {
    let affordable = parts.iter().filter(|p| p.price <= cap).fold(
        None::<&PartRecord>,
        |best, p| match best {
            Some(b) if b.price >= p.price => Some(b),
            _ => Some(p),
        },
    );

    if let Some(part) = affordable {
        return Pick {
            category,
            part,
            within_budget: true,
        };
    }

    let cheapest = parts[1..]
        .iter()
        .fold(&parts[0], |best, p| if p.price < best.price { p } else { best });

    Pick {
        category,
        part: cheapest,
        within_budget: false,
    }
}
