// GroupSwap — Trade Validation
// validate_trade (proposer side), validate_acceptance (acceptor side)
//
// Pure and synchronous: no network access, no side effects. Runs before any
// transaction is built so a failing trade never reaches a signing prompt.
// Every comparison happens in integer base units.

use std::collections::HashSet;

use super::helpers::{base_units_to_amount, to_base_units};
use crate::atoms::constants::{FEE_RESERVE_MICRO, NATIVE_DECIMALS};
use crate::atoms::error::ValidationError;
use crate::atoms::types::{AccountSnapshot, Trade, TradeLeg};

fn is_positive(amount: f64) -> bool {
    !amount.is_nan() && amount > 0.0
}

fn balance_units(balance: f64) -> u64 {
    // Negative or non-finite balances count as empty
    to_base_units(balance, NATIVE_DECIMALS).unwrap_or(0)
}

/// A native-coin payment of `amount` plus the group fee reserve must fit in
/// the balance. Amounts too large to scale can never be funded.
fn check_native_funding(balance_micro: u64, amount: f64) -> Result<(), ValidationError> {
    match to_base_units(amount, NATIVE_DECIMALS) {
        Ok(units) => {
            let required = units.saturating_add(FEE_RESERVE_MICRO);
            if required > balance_micro {
                return Err(ValidationError::InsufficientBalance {
                    required: base_units_to_amount(required, NATIVE_DECIMALS),
                });
            }
            Ok(())
        }
        Err(_) => Err(ValidationError::InsufficientBalance {
            required: format!("{}", amount + FEE_RESERVE_MICRO as f64 / 1e6),
        }),
    }
}

/// Check that the paying side can fund `leg` and still cover group fees.
/// A token leg only needs the fee reserve in native coin.
fn check_funding(balance_micro: u64, leg: &TradeLeg, amount: f64) -> Result<(), ValidationError> {
    match leg {
        TradeLeg::Native => check_native_funding(balance_micro, amount),
        TradeLeg::Asset(_) if balance_micro < FEE_RESERVE_MICRO => Err(ValidationError::InsufficientFeeReserve),
        TradeLeg::Asset(_) => Ok(()),
    }
}

fn check_opted_in(opted_in: &HashSet<u64>, leg: &TradeLeg) -> Result<(), ValidationError> {
    match leg {
        TradeLeg::Asset(asset) if !opted_in.contains(&asset.id) => {
            Err(ValidationError::NotOptedIn { asset: asset.name.clone() })
        }
        _ => Ok(()),
    }
}

/// Validate a trade from the proposer's side. Rules, first failure wins:
///   1. offer amount must be positive
///   2. native offer: offer + 0.002 ALGO fee reserve ≤ balance
///   3. token offer: balance ≥ 0.002 ALGO fee reserve
///   4. token request: proposer must already be opted in to it
pub fn validate_trade(
    account_balance: f64,
    opted_in: &HashSet<u64>,
    offer: &TradeLeg,
    offer_amount: f64,
    request: &TradeLeg,
) -> Result<(), ValidationError> {
    if !is_positive(offer_amount) {
        return Err(ValidationError::InvalidAmount);
    }
    check_funding(balance_units(account_balance), offer, offer_amount)?;
    check_opted_in(opted_in, request)
}

/// Validate a trade from the acceptor's side, mirroring `validate_trade`:
/// the acceptor pays the request leg and receives the offer leg.
/// Token payments additionally require the acceptor to hold enough of it.
pub fn validate_acceptance(acceptor: &AccountSnapshot, trade: &Trade) -> Result<(), ValidationError> {
    if !is_positive(trade.request_amount) {
        return Err(ValidationError::InvalidRequestAmount);
    }
    check_funding(acceptor.amount, &trade.request, trade.request_amount)?;

    if let TradeLeg::Asset(asset) = &trade.request {
        let held = acceptor
            .holding(asset.id)
            .ok_or_else(|| ValidationError::NotOptedIn { asset: asset.name.clone() })?;
        let short = match to_base_units(trade.request_amount, asset.decimals) {
            Ok(units) if held >= units => None,
            Ok(units) => Some(base_units_to_amount(units, asset.decimals)),
            Err(_) => Some(trade.request_amount.to_string()),
        };
        if let Some(required) = short {
            return Err(ValidationError::InsufficientAssetBalance { asset: asset.name.clone(), required });
        }
    }

    check_opted_in(&acceptor.opted_in(), &trade.offer)
}
