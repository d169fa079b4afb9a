#![allow(dead_code)]
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use alloy::{
    primitives::{Address, U256},
    sol_types::{SolCall, SolValue},
};
use vault_deposit::{
    abi::{IErc20, IErc4626},
    CallRequest, ChainReader, Simulation,
};

/// Requests the mock can answer, in the order a deposit issues them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Asset,
    Balance,
    Allowance,
    MaxDeposit,
    Simulate,
    EstimateGas,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MockError {
    #[error("connection refused")]
    Unreachable,
    #[error("execution reverted")]
    Reverted,
    #[error("unknown selector 0x{}", alloy::hex::encode(.0))]
    UnknownSelector([u8; 4]),
}

/// In-memory chain that answers deposit reads from its fields.
#[derive(Debug, Default)]
pub struct MockChain {
    pub asset: Address,
    pub balance: U256,
    pub allowance: U256,
    pub max_deposit: U256,
    /// Gas reported by `simulate`; `None` forces a gas estimate.
    pub simulated_gas: Option<u64>,
    pub estimated_gas: u64,
    /// Step that fails with [`MockError::Unreachable`] every time.
    pub fail_at: Option<Step>,
    pub revert_simulation: bool,
    /// Number of upcoming requests that fail with
    /// [`MockError::Unreachable`].
    pub transient_failures: AtomicUsize,
    pub calls: Mutex<Vec<(Step, Address)>>,
    pub simulations: Mutex<Vec<CallRequest>>,
    pub estimates: Mutex<Vec<CallRequest>>,
}

impl MockChain {
    /// A chain where `amount` passes every check with room to spare.
    pub fn funded(asset: Address, amount: U256) -> Self {
        Self {
            asset,
            balance: amount,
            allowance: amount,
            max_deposit: amount,
            estimated_gas: 51_234,
            ..Self::default()
        }
    }

    /// Every request made so far, with its target.
    pub fn calls(&self) -> Vec<(Step, Address)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn steps(&self) -> Vec<Step> {
        self.calls().into_iter().map(|(step, _)| step).collect()
    }

    pub fn count(&self, step: Step) -> usize {
        self.steps().into_iter().filter(|s| *s == step).count()
    }

    pub fn simulations(&self) -> Vec<CallRequest> {
        self.simulations.lock().unwrap().clone()
    }

    pub fn estimates(&self) -> Vec<CallRequest> {
        self.estimates.lock().unwrap().clone()
    }

    fn record(&self, step: Step, to: Address) -> Result<(), MockError> {
        self.calls.lock().unwrap().push((step, to));

        if self.fail_at == Some(step) {
            return Err(MockError::Unreachable);
        }

        let transient = self
            .transient_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                n.checked_sub(1)
            })
            .is_ok();
        if transient {
            return Err(MockError::Unreachable);
        }

        Ok(())
    }
}

impl ChainReader for MockChain {
    type Error = MockError;

    async fn read<C>(&self, to: Address, call: C) -> Result<C::Return, MockError>
    where
        C: SolCall + Send + Sync + 'static,
        C::Return: Send,
    {
        let data = call.abi_encode();
        let selector: [u8; 4] =
            data[..4].try_into().expect("call data should have a selector");

        let (step, output) = if selector == IErc4626::assetCall::SELECTOR {
            (Step::Asset, self.asset.abi_encode())
        } else if selector == IErc20::balanceOfCall::SELECTOR {
            (Step::Balance, self.balance.abi_encode())
        } else if selector == IErc20::allowanceCall::SELECTOR {
            (Step::Allowance, self.allowance.abi_encode())
        } else if selector == IErc4626::maxDepositCall::SELECTOR {
            (Step::MaxDeposit, self.max_deposit.abi_encode())
        } else {
            return Err(MockError::UnknownSelector(selector));
        };

        self.record(step, to)?;
        Ok(C::abi_decode_returns(&output).expect("mock output should decode"))
    }

    async fn simulate(
        &self,
        request: &CallRequest,
    ) -> Result<Simulation, MockError> {
        self.record(Step::Simulate, request.to)?;
        self.simulations.lock().unwrap().push(request.clone());
        if self.revert_simulation {
            return Err(MockError::Reverted);
        }
        Ok(Simulation { request: request.clone(), gas: self.simulated_gas })
    }

    async fn estimate_gas(
        &self,
        request: &CallRequest,
    ) -> Result<u64, MockError> {
        self.record(Step::EstimateGas, request.to)?;
        self.estimates.lock().unwrap().push(request.clone());
        Ok(self.estimated_gas)
    }
}
