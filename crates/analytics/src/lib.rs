//! Spend aggregation engine.
//!
//! Everything here is a pure function over an immutable [`models::Snapshot`]
//! of the entity store: per-card balances, per-budget spend rankings, pie
//! segmentation and the recent activity feed. Derived views are recomputed
//! per query and never cached; two queries over the same snapshot produce
//! identical output.

pub mod balance;
pub mod handler;
pub mod models;
pub mod period;
pub mod pie;
pub mod recent;
pub mod service;
pub mod spending;
