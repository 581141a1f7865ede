pub mod store;

pub use store::{format_money, AddOutcome, CartStore, CartTotals, LineItem};
