//! # pcparts core
//!
//! Domain types, traits, and error definitions for the PC parts catalog
//! service. The catalog index and the build suggestion engine live here;
//! storage and transport live in their own crates and depend inward on this one.

pub mod error;
pub mod part;
pub mod catalog;
pub mod build;
pub mod tool;
pub mod resource;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use error::{CatalogError, StoreError, ToolError};
pub use part::{PartRecord, SpecValue, Specs};
pub use catalog::{CatalogIndex, EPOCH_DATE};
pub use build::{
    BUILD_CATEGORIES, BuildOutcome, BuildSuggestion, LowBudgetAdvisory, MIN_BUILD_BUDGET, Pick,
    suggest_build,
};
pub use tool::{Tool, ToolCall, ToolDefinition, ToolRegistry, ToolResult};
pub use resource::{Resource, ResourceDefinition, ResourceRegistry};
pub use store::{PartStore, StoredPart};
