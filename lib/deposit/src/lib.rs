/*!
# Vault deposits

Client-side checks and transaction assembly for depositing an ERC-20 asset
into an [ERC-4626] vault.

Given a wallet, a vault and an amount, [`prepare`] reads the vault's
underlying asset, the wallet's balance and allowance for it, and the vault's
`maxDeposit` for the wallet. When every precondition holds it returns an
unsigned [`TransactionDescriptor`] ready to be signed and submitted by the
caller. Nothing is ever signed or broadcast here.

```ignore
use alloy::providers::ProviderBuilder;
use vault_deposit::{prepare, DepositRequest, RpcReader};

let provider = ProviderBuilder::new().connect(rpc_url).await?;
let reader = RpcReader::new(provider);
let request = DepositRequest::new(wallet, vault, amount);
let tx = prepare(&reader, &request).await?;
```

Chain state is injected through the [`ChainReader`] trait, so tests can swap
the RPC-backed [`RpcReader`] for an in-memory fake.

[ERC-4626]: https://eips.ethereum.org/EIPS/eip-4626
*/

#![allow(clippy::module_name_repetitions)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod abi;
pub mod deposit;
pub mod error;
pub mod reader;
pub mod retry;
pub mod rpc;

pub use deposit::{
    encode_deposit, prepare, ChainState, DepositPreparer, DepositRequest,
    TransactionDescriptor,
};
pub use error::Error;
pub use reader::{CallRequest, ChainReader, Simulation};
pub use retry::{prepare_with_retry, RetryPolicy};
pub use rpc::{RpcReader, RpcReaderError};
