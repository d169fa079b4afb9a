//! Deposit precondition checks and transaction assembly.
//!
//! [`prepare`] runs a fixed pipeline and stops at the first violated
//! precondition:
//!
//! 1. the amount must be non-zero;
//! 2. the vault's underlying `asset()` is read;
//! 3. balance, allowance and `maxDeposit` are read concurrently;
//! 4. balance, then allowance, then `maxDeposit` are compared to the amount;
//! 5. `deposit(amount, wallet)` is encoded, simulated and priced.
//!
//! The three reads of step 3 are issued at roughly the same time but are not
//! an atomic snapshot. A block may land between them, and nothing here
//! re-checks the state the transaction finally executes against.
use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    abi::{
        ERC20InsufficientAllowance, ERC20InsufficientBalance,
        ERC4626ExceededMaxDeposit, IErc20, IErc4626, InvalidAmount,
    },
    error::Error,
    reader::{CallRequest, ChainReader},
};

/// A request to deposit `amount` of the vault's asset from `wallet`, with
/// the shares minted back to `wallet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositRequest {
    /// Owner of the assets and receiver of the shares.
    pub wallet: Address,
    /// ERC-4626 vault to deposit into.
    pub vault: Address,
    /// Amount of the underlying asset, in base units.
    pub amount: U256,
}

impl DepositRequest {
    /// Creates a new [`DepositRequest`].
    #[must_use]
    pub fn new(wallet: Address, vault: Address, amount: U256) -> Self {
        Self { wallet, vault, amount }
    }
}

/// An unsigned, unsent deposit transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionDescriptor {
    /// The vault.
    pub to: Address,
    /// ABI-encoded `deposit(amount, wallet)`.
    pub data: Bytes,
    /// The wallet.
    pub from: Address,
    /// Always zero: deposits never carry native currency.
    pub value: U256,
    /// Gas limit for the call.
    pub gas: u64,
}

/// Chain state a deposit is validated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainState {
    /// Underlying asset reported by the vault.
    pub asset: Address,
    /// Wallet's balance of `asset`.
    pub balance: U256,
    /// Amount of `asset` the wallet approved the vault to spend.
    pub allowance: U256,
    /// Vault's `maxDeposit` with the wallet as receiver.
    pub max_deposit: U256,
}

impl ChainState {
    /// Checks balance, allowance and deposit cap, in that order. Thresholds
    /// are inclusive.
    ///
    /// # Errors
    ///
    /// * [`Error::NotEnoughBalance`] - If `balance < amount`.
    /// * [`Error::MissingAllowance`] - If `allowance < amount`.
    /// * [`Error::AmountExceedsMaxDeposit`] - If `max_deposit < amount`.
    pub fn validate<E>(&self, request: &DepositRequest) -> Result<(), Error<E>> {
        let DepositRequest { wallet, vault, amount } = *request;

        if self.balance < amount {
            return Err(Error::NotEnoughBalance(ERC20InsufficientBalance {
                sender: wallet,
                balance: self.balance,
                needed: amount,
            }));
        }

        if self.allowance < amount {
            return Err(Error::MissingAllowance(ERC20InsufficientAllowance {
                spender: vault,
                allowance: self.allowance,
                needed: amount,
            }));
        }

        if self.max_deposit < amount {
            return Err(Error::AmountExceedsMaxDeposit(
                ERC4626ExceededMaxDeposit {
                    receiver: wallet,
                    assets: amount,
                    max: self.max_deposit,
                },
            ));
        }

        Ok(())
    }
}

/// ABI-encodes `deposit(assets, receiver)`.
///
/// Pure: equal inputs always give byte-identical output.
#[must_use]
pub fn encode_deposit(assets: U256, receiver: Address) -> Bytes {
    IErc4626::depositCall { assets, receiver }.abi_encode().into()
}

/// Prepares deposits against a [`ChainReader`].
#[derive(Clone, Debug)]
pub struct DepositPreparer<R> {
    reader: R,
}

impl<R: ChainReader> DepositPreparer<R> {
    /// Creates a preparer reading through `reader`.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// The underlying reader.
    #[must_use]
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// See [`prepare`].
    ///
    /// # Errors
    ///
    /// See [`prepare`].
    pub async fn prepare(
        &self,
        request: &DepositRequest,
    ) -> Result<TransactionDescriptor, Error<R::Error>> {
        prepare(&self.reader, request).await
    }
}

/// Validates `request` against current chain state and assembles the
/// unsigned deposit transaction.
///
/// # Errors
///
/// Reports the first violated precondition, in this order:
///
/// * [`Error::InvalidAmount`] - If `request.amount` is zero. No request is
///   made to the chain.
/// * [`Error::NotEnoughBalance`] - If the wallet holds less than `amount` of
///   the vault's asset.
/// * [`Error::MissingAllowance`] - If the wallet approved the vault for less
///   than `amount`.
/// * [`Error::AmountExceedsMaxDeposit`] - If the vault's `maxDeposit` for the
///   wallet is below `amount`.
///
/// Any reader failure, including a reverting simulation, is returned as
/// [`Error::Chain`] as soon as it happens.
#[instrument(
    skip_all,
    fields(wallet = %request.wallet, vault = %request.vault, amount = %request.amount),
    err(level = "debug")
)]
pub async fn prepare<R: ChainReader>(
    reader: &R,
    request: &DepositRequest,
) -> Result<TransactionDescriptor, Error<R::Error>> {
    let DepositRequest { wallet, vault, amount } = *request;

    if amount.is_zero() {
        return Err(Error::InvalidAmount(InvalidAmount { assets: amount }));
    }

    let asset =
        reader.read(vault, IErc4626::assetCall {}).await.map_err(Error::Chain)?;
    debug!(%asset, "discovered vault asset");

    let (balance, allowance, max_deposit) = futures::try_join!(
        reader.read(asset, IErc20::balanceOfCall { account: wallet }),
        reader.read(asset, IErc20::allowanceCall { owner: wallet, spender: vault }),
        reader.read(vault, IErc4626::maxDepositCall { receiver: wallet }),
    )
    .map_err(Error::Chain)?;

    let state = ChainState { asset, balance, allowance, max_deposit };
    debug!(?state, "read deposit state");
    state.validate(request)?;

    let call = CallRequest {
        from: wallet,
        to: vault,
        data: encode_deposit(amount, wallet),
        value: U256::ZERO,
    };

    let simulation = reader.simulate(&call).await.map_err(Error::Chain)?;
    let gas = match simulation.gas {
        Some(gas) => {
            debug!(gas, "using simulated gas");
            gas
        }
        None => {
            // Price the call exactly as the node validated it.
            let gas = reader
                .estimate_gas(&simulation.request)
                .await
                .map_err(Error::Chain)?;
            debug!(gas, "using estimated gas");
            gas
        }
    };

    Ok(TransactionDescriptor {
        to: vault,
        data: call.data,
        from: wallet,
        value: U256::ZERO,
        gas,
    })
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, hex, uint};

    use super::*;

    const WALLET: Address =
        address!("0x00000000000000000000000000000000000000a1");
    const VAULT: Address =
        address!("0x00000000000000000000000000000000000000b2");

    #[derive(Debug, thiserror::Error)]
    #[error("unreachable")]
    struct Never;

    fn state(balance: u64, allowance: u64, max_deposit: u64) -> ChainState {
        ChainState {
            asset: Address::ZERO,
            balance: U256::from(balance),
            allowance: U256::from(allowance),
            max_deposit: U256::from(max_deposit),
        }
    }

    fn request(amount: u64) -> DepositRequest {
        DepositRequest::new(WALLET, VAULT, U256::from(amount))
    }

    #[test]
    fn validate_accepts_exact_thresholds() {
        assert!(state(10, 10, 10).validate::<Never>(&request(10)).is_ok());
    }

    #[test]
    fn validate_reports_balance_first() {
        let err = state(1, 1, 1).validate::<Never>(&request(10)).unwrap_err();
        assert!(matches!(
            err,
            Error::NotEnoughBalance(ERC20InsufficientBalance {
                sender: WALLET,
                ..
            })
        ));
    }

    #[test]
    fn validate_reports_allowance_before_max_deposit() {
        let err = state(10, 1, 1).validate::<Never>(&request(10)).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingAllowance(ERC20InsufficientAllowance {
                spender: VAULT,
                ..
            })
        ));
    }

    #[test]
    fn validate_reports_max_deposit() {
        let err = state(10, 10, 9).validate::<Never>(&request(10)).unwrap_err();
        let Error::AmountExceedsMaxDeposit(e) = err else {
            panic!("expected max deposit error, got {err:?}");
        };
        assert_eq!(e.receiver, WALLET);
        assert_eq!(e.assets, uint!(10_U256));
        assert_eq!(e.max, uint!(9_U256));
    }

    #[test]
    fn encodes_deposit_call() {
        let data = encode_deposit(uint!(12345_U256), WALLET);
        // deposit(uint256,address)
        assert_eq!(&data[..4], hex!("6e553f65").as_slice());
        assert_eq!(data.len(), 4 + 32 * 2);
        assert_eq!(U256::from_be_slice(&data[4..36]), uint!(12345_U256));
        assert_eq!(Address::from_slice(&data[48..68]), WALLET);
    }

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(
            encode_deposit(uint!(12345_U256), WALLET),
            encode_deposit(uint!(12345_U256), WALLET)
        );
    }
}
