//! Exchange-agnostic domain logic: units, parsing, costing and ranking.

pub mod analysis;
pub mod cost;
pub mod error;
pub mod market;
pub mod money;
pub mod part;
pub mod price;
pub mod recipe;
pub mod selection;

pub use analysis::{AnalysisResult, Outcome, SkipReason, Skipped};
pub use cost::{compute_cost, CostBreakdown, LineCost};
pub use error::{DomainError, NotRecognized, PriceParseError};
pub use market::MarketListing;
pub use money::{KeyRate, Money, Refined};
pub use part::{PartPrice, PriceTable, RecipeInputs};
pub use recipe::{normalize, NormalizedRecipe, Variant};
pub use selection::{fabricator_candidates, select, Selection, SelectionError};
