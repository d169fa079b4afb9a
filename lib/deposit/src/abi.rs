//! Solidity bindings for the contracts a deposit touches, and the
//! Solidity-style payloads of the deposit precondition errors.
#![allow(missing_docs)]

use alloy::sol;

sol! {
    /// The subset of ERC-20 read by a deposit.
    interface IErc20 {
        /// Returns the amount of tokens owned by `account`.
        function balanceOf(address account) external view returns (uint256 balance);
        /// Returns the remaining number of tokens that `spender` will be
        /// allowed to spend on behalf of `owner`.
        function allowance(address owner, address spender) external view returns (uint256 remaining);
    }

    /// The subset of ERC-4626 used by a deposit.
    interface IErc4626 {
        /// Returns the address of the underlying token used by the vault.
        function asset() external view returns (address assetTokenAddress);
        /// Returns the maximum amount of the underlying asset that can be
        /// deposited into the vault for `receiver`.
        function maxDeposit(address receiver) external view returns (uint256 maxAssets);
        /// Deposits exactly `assets` of underlying tokens and mints vault
        /// shares to `receiver`.
        function deposit(uint256 assets, address receiver) external returns (uint256 shares);
    }
}

sol! {
    /// Indicates that a deposit of zero `assets` was requested.
    ///
    /// * `assets` - Requested amount.
    #[derive(Debug, PartialEq, Eq)]
    error InvalidAmount(uint256 assets);

    /// Indicates an error related to the current `balance` of `sender`.
    ///
    /// * `sender` - Wallet whose tokens would be deposited.
    /// * `balance` - Current asset balance of the wallet.
    /// * `needed` - Amount requested for the deposit.
    #[derive(Debug, PartialEq, Eq)]
    error ERC20InsufficientBalance(address sender, uint256 balance, uint256 needed);

    /// Indicates a failure with the `spender`'s `allowance`.
    ///
    /// * `spender` - Vault that would pull the tokens.
    /// * `allowance` - Amount the wallet approved for the vault.
    /// * `needed` - Amount requested for the deposit.
    #[derive(Debug, PartialEq, Eq)]
    error ERC20InsufficientAllowance(address spender, uint256 allowance, uint256 needed);

    /// Indicates that the deposit exceeds the vault's limit for `receiver`.
    ///
    /// * `receiver` - Wallet that would receive the shares.
    /// * `assets` - Amount requested for the deposit.
    /// * `max` - Vault's `maxDeposit` for the receiver.
    #[derive(Debug, PartialEq, Eq)]
    error ERC4626ExceededMaxDeposit(address receiver, uint256 assets, uint256 max);
}
