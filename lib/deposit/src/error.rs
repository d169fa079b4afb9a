//! Deposit preparation errors.
use alloy::sol_types::SolError;

use crate::abi::{
    ERC20InsufficientAllowance, ERC20InsufficientBalance,
    ERC4626ExceededMaxDeposit, InvalidAmount,
};

/// A deposit preparation error.
///
/// The first four variants are domain errors: the request is not a legal
/// deposit against the state that was read. [`Error::Chain`] carries the
/// [`crate::ChainReader`]'s own error untouched, so "we could not reach the
/// chain" is never mistaken for "your deposit is invalid".
#[derive(thiserror::Error, Debug)]
pub enum Error<E> {
    /// The requested amount is zero.
    #[error("invalid amount: deposits must be strictly positive")]
    InvalidAmount(InvalidAmount),
    /// The wallet holds less of the asset than the requested amount.
    #[error(
        "not enough balance: wallet {} holds {}, needs {}",
        .0.sender, .0.balance, .0.needed
    )]
    NotEnoughBalance(ERC20InsufficientBalance),
    /// The wallet has not approved the vault for the requested amount.
    #[error(
        "missing allowance: vault {} may spend {}, needs {}",
        .0.spender, .0.allowance, .0.needed
    )]
    MissingAllowance(ERC20InsufficientAllowance),
    /// The vault does not accept that many assets for the receiver.
    #[error(
        "amount exceeds max deposit: {} requested, vault accepts at most {} for {}",
        .0.assets, .0.max, .0.receiver
    )]
    AmountExceedsMaxDeposit(ERC4626ExceededMaxDeposit),
    /// Reading from or simulating against the chain failed.
    #[error("chain request failed")]
    Chain(#[source] E),
}

impl<E> Error<E> {
    /// Whether this is one of the four precondition failures rather than a
    /// transport failure.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        !matches!(self, Self::Chain(_))
    }

    /// ABI-encoded Solidity error for domain errors, `None` for
    /// [`Error::Chain`].
    #[must_use]
    pub fn abi_encode(&self) -> Option<Vec<u8>> {
        match self {
            Self::InvalidAmount(e) => Some(e.abi_encode()),
            Self::NotEnoughBalance(e) => Some(e.abi_encode()),
            Self::MissingAllowance(e) => Some(e.abi_encode()),
            Self::AmountExceedsMaxDeposit(e) => Some(e.abi_encode()),
            Self::Chain(_) => None,
        }
    }
}
