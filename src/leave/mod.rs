//! Leave entitlement accounting.

mod balance;

pub(crate) use balance::opening_balance;
pub use balance::{GrantCheck, LeaveBalanceEngine};
