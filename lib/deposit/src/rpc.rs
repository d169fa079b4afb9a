//! [`ChainReader`] over an `alloy` provider.
use alloy::{
    network::TransactionBuilder,
    primitives::Address,
    providers::Provider,
    rpc::types::TransactionRequest,
    sol_types::SolCall,
    transports::TransportError,
};

use crate::reader::{CallRequest, ChainReader, Simulation};

/// An [`RpcReader`] error.
#[derive(thiserror::Error, Debug)]
pub enum RpcReaderError {
    /// The JSON-RPC request failed or the node rejected it, reverts included.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The node answered with output that does not match the call's ABI.
    #[error("failed to decode call output: {0}")]
    Decode(#[from] alloy::sol_types::Error),
}

/// Reads chain state through JSON-RPC `eth_call` and `eth_estimateGas`.
#[derive(Clone, Debug)]
pub struct RpcReader<P> {
    provider: P,
}

impl<P> RpcReader<P> {
    /// Wraps `provider`.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The wrapped provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: Provider> ChainReader for RpcReader<P> {
    type Error = RpcReaderError;

    async fn read<C>(&self, to: Address, call: C) -> Result<C::Return, Self::Error>
    where
        C: SolCall + Send + Sync + 'static,
        C::Return: Send,
    {
        let tx = TransactionRequest::default()
            .with_to(to)
            .with_input(call.abi_encode());
        let output = self.provider.call(tx).await?;
        Ok(C::abi_decode_returns(&output)?)
    }

    /// `eth_call` does not report gas, so the simulation never carries a
    /// figure and callers fall back to [`ChainReader::estimate_gas`].
    async fn simulate(
        &self,
        request: &CallRequest,
    ) -> Result<Simulation, Self::Error> {
        self.provider.call(request.into()).await?;
        Ok(Simulation { request: request.clone(), gas: None })
    }

    async fn estimate_gas(
        &self,
        request: &CallRequest,
    ) -> Result<u64, Self::Error> {
        let gas =
            self.provider.estimate_gas(request.into()).await?;
        Ok(gas)
    }
}
