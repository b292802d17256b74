//! Fixed-width distribution encoding.
//!
//! A distribution is one amount per seniority index, ascending. Each amount
//! is stored as a 16-byte big-endian unsigned integer, so an encoding for
//! `n` pirates is exactly `16 * n` bytes.

use soroban_sdk::{Bytes, Env, Vec};

use crate::errors::PirateError;

pub const AMOUNT_WIDTH: u32 = 16;

/// Validate `amounts` against the pirate count and pot, then encode.
pub fn validate_and_encode(
    env: &Env,
    amounts: &Vec<i128>,
    pirate_count: u32,
    pot: i128,
) -> Result<Bytes, PirateError> {
    if amounts.len() != pirate_count {
        return Err(PirateError::DistributionLength);
    }
    let mut sum: i128 = 0;
    for amount in amounts.iter() {
        if amount < 0 {
            return Err(PirateError::NegativeAmount);
        }
        sum = sum
            .checked_add(amount)
            .ok_or(PirateError::ArithmeticOverflow)?;
    }
    if sum != pot {
        return Err(PirateError::DistributionSumMismatch);
    }
    Ok(encode(env, amounts))
}

/// Encode without validation. Negative amounts must be rejected beforehand.
pub fn encode(env: &Env, amounts: &Vec<i128>) -> Bytes {
    let mut out = Bytes::new(env);
    for amount in amounts.iter() {
        out.append(&Bytes::from_array(env, &(amount as u128).to_be_bytes()));
    }
    out
}

pub fn decode(env: &Env, encoded: &Bytes, pirate_count: u32) -> Result<Vec<i128>, PirateError> {
    if encoded.len() % AMOUNT_WIDTH != 0 || encoded.len() / AMOUNT_WIDTH != pirate_count {
        return Err(PirateError::MalformedDistribution);
    }
    let mut amounts = Vec::new(env);
    for i in 0..pirate_count {
        amounts.push_back(amount_at(encoded, i)?);
    }
    Ok(amounts)
}

/// Read one pirate's amount without decoding the whole vector.
pub fn amount_at(encoded: &Bytes, seniority: u32) -> Result<i128, PirateError> {
    let start = seniority
        .checked_mul(AMOUNT_WIDTH)
        .ok_or(PirateError::MalformedDistribution)?;
    let end = start
        .checked_add(AMOUNT_WIDTH)
        .ok_or(PirateError::MalformedDistribution)?;
    if end > encoded.len() {
        return Err(PirateError::MalformedDistribution);
    }
    let mut chunk = [0u8; 16];
    encoded.slice(start..end).copy_into_slice(&mut chunk);
    let raw = u128::from_be_bytes(chunk);
    if raw > i128::MAX as u128 {
        return Err(PirateError::MalformedDistribution);
    }
    Ok(raw as i128)
}
