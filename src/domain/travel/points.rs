//! Loyalty points value objects.

use serde::{Deserialize, Serialize};

/// Points charged for a single boost.
pub const BOOST_COST: u64 = 5_000;

/// Earning multiplier granted by a boost.
pub const BOOST_MULTIPLIER: u32 = 2;

/// Outcome of spending points on an earning boost for a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsBoost {
    pub points_spent: u64,
    pub multiplier: u32,
    pub balance_after: u64,
}
