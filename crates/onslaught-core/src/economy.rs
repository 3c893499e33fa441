//! Player accounts and purchase validation.
//!
//! Validation is pure: the caller supplies the live owned count and gets
//! back either a priced quote or the exact failure. Applying a quote
//! (balance decrement + spawns) is the sim's job, so a failure can never
//! leave partial state behind.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ArenaTables;
use crate::constants::UNIT_CAP;
use crate::enums::UnitArchetype;

/// Stable player identity (host-provided, never a connection handle).
pub type PlayerId = String;

/// Per-player balance, created on first join, reset with the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerAccount {
    pub player_id: PlayerId,
    pub money: u32,
}

impl PlayerAccount {
    pub fn new(player_id: PlayerId, money: u32) -> Self {
        Self { player_id, money }
    }
}

/// Why a purchase was refused. All variants are player-facing and leave
/// state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PurchaseError {
    #[error("amount must be positive")]
    InvalidAmount,
    #[error("no such unit type")]
    UnknownArchetype,
    #[error("unit cap reached: {owned} owned, cap {cap}")]
    UnitCapExceeded { owned: u32, cap: u32 },
    #[error("not enough money: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },
}

/// A validated, priced purchase ready to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseQuote {
    pub archetype: UnitArchetype,
    pub amount: u32,
    pub total_cost: u32,
}

/// Validate a purchase request. `owned` is the player's current live unit
/// count for the requested archetype. Check order: amount, archetype,
/// unit cap, funds.
pub fn validate_purchase(
    tables: &ArenaTables,
    archetype_name: &str,
    amount: Option<u32>,
    owned: u32,
    balance: u32,
) -> Result<PurchaseQuote, PurchaseError> {
    let amount = amount.unwrap_or(1);
    if amount == 0 {
        return Err(PurchaseError::InvalidAmount);
    }

    let archetype =
        UnitArchetype::parse(archetype_name).ok_or(PurchaseError::UnknownArchetype)?;
    let cost = tables
        .upgrade_cost(archetype)
        .ok_or(PurchaseError::UnknownArchetype)?;

    if owned + amount > UNIT_CAP {
        return Err(PurchaseError::UnitCapExceeded {
            owned,
            cap: UNIT_CAP,
        });
    }

    let total_cost = cost * amount;
    if balance < total_cost {
        return Err(PurchaseError::InsufficientFunds {
            needed: total_cost,
            available: balance,
        });
    }

    Ok(PurchaseQuote {
        archetype,
        amount,
        total_cost,
    })
}
