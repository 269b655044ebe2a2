//! Shared data model for the analytics pipeline.

pub mod basket;
pub mod context;
pub mod filter;
pub mod item_set;
pub mod itemsets;
pub mod rule;
pub mod transaction;
pub mod uplift;

pub use basket::{group_by_transaction, Basket};
pub use context::{valid_quarter, Context, DayType, TimeBin};
pub use filter::ContextFilter;
pub use item_set::ItemSet;
pub use itemsets::{FrequentItemset, FrequentItemsets};
pub use rule::ContextualRule;
pub use transaction::TransactionRecord;
pub use uplift::UpliftResult;
