//! The chain capability a deposit is prepared against.
use std::future::Future;

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    rpc::types::TransactionRequest,
    sol_types::SolCall,
};

/// Parameters of a contract call that is simulated or estimated but never
/// sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallRequest {
    /// Account the call is made from.
    pub from: Address,
    /// Contract being called.
    pub to: Address,
    /// ABI-encoded call data.
    pub data: Bytes,
    /// Native currency attached to the call.
    pub value: U256,
}

impl From<&CallRequest> for TransactionRequest {
    fn from(request: &CallRequest) -> Self {
        TransactionRequest::default()
            .with_from(request.from)
            .with_to(request.to)
            .with_input(request.data.clone())
            .with_value(request.value)
    }
}

/// Outcome of simulating a call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Simulation {
    /// Call parameters as validated by the simulation.
    pub request: CallRequest,
    /// Gas figure, if the simulation produced one.
    pub gas: Option<u64>,
}

/// Read-only access to chain state.
///
/// Implementations own their transport policy: timeouts and retries of
/// individual requests happen below this trait, never in the deposit logic.
pub trait ChainReader {
    /// Transport-level failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Performs a read-only `call` against the contract at `to` and returns
    /// its decoded output.
    ///
    /// # Errors
    ///
    /// If the request fails, the call reverts, or the output does not decode.
    fn read<C>(
        &self,
        to: Address,
        call: C,
    ) -> impl Future<Output = Result<C::Return, Self::Error>> + Send
    where
        C: SolCall + Send + Sync + 'static,
        C::Return: Send;

    /// Simulates `request` against the current state.
    ///
    /// # Errors
    ///
    /// If the request fails or the call would revert.
    fn simulate(
        &self,
        request: &CallRequest,
    ) -> impl Future<Output = Result<Simulation, Self::Error>> + Send;

    /// Estimates the gas `request` would consume.
    ///
    /// # Errors
    ///
    /// If the request fails or the call would revert.
    fn estimate_gas(
        &self,
        request: &CallRequest,
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send;
}

impl<R: ChainReader + Sync> ChainReader for &R {
    type Error = R::Error;

    fn read<C>(
        &self,
        to: Address,
        call: C,
    ) -> impl Future<Output = Result<C::Return, Self::Error>> + Send
    where
        C: SolCall + Send + Sync + 'static,
        C::Return: Send,
    {
        (**self).read(to, call)
    }

    fn simulate(
        &self,
        request: &CallRequest,
    ) -> impl Future<Output = Result<Simulation, Self::Error>> + Send {
        (**self).simulate(request)
    }

    fn estimate_gas(
        &self,
        request: &CallRequest,
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send {
        (**self).estimate_gas(request)
    }
}
