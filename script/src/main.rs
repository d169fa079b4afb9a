//! Prepares an unsigned ERC-4626 deposit and prints it as JSON.
//!
//! Nothing is signed or sent: the output is meant to be handed to a wallet.
use alloy::{
    primitives::{Address, U256},
    providers::ProviderBuilder,
};
use clap::Parser;
use eyre::{bail, WrapErr};
use tracing_subscriber::EnvFilter;
use vault_deposit::{
    prepare_with_retry, DepositRequest, Error, RetryPolicy, RpcReader,
};

/// Check that a deposit into an ERC-4626 vault would go through and print the
/// unsigned transaction.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// JSON-RPC endpoint to read chain state from.
    #[arg(long, env = "RPC_URL")]
    rpc_url: String,

    /// Wallet holding the assets and receiving the shares (0x...).
    #[arg(long, env = "WALLET")]
    wallet: Address,

    /// ERC-4626 vault to deposit into (0x...).
    #[arg(long, env = "VAULT")]
    vault: Address,

    /// Amount of the vault's asset, in base units.
    #[arg(long, env = "AMOUNT")]
    amount: U256,

    /// How many times to retry when the endpoint cannot be reached.
    #[arg(long, env = "RETRIES", default_value_t = 3)]
    retries: u32,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let provider = ProviderBuilder::new()
        .connect(&cli.rpc_url)
        .await
        .wrap_err_with(|| format!("failed to connect to {}", cli.rpc_url))?;
    let reader = RpcReader::new(provider);

    let request = DepositRequest::new(cli.wallet, cli.vault, cli.amount);
    let policy = RetryPolicy {
        max_attempts: cli.retries.saturating_add(1),
        ..RetryPolicy::default()
    };

    match prepare_with_retry(&reader, &request, &policy).await {
        Ok(tx) => {
            tracing::info!(gas = tx.gas, "deposit transaction prepared");
            println!("{}", serde_json::to_string_pretty(&tx)?);
            Ok(())
        }
        Err(err) if err.is_domain() => {
            bail!("deposit rejected ({}): {err}", kind(&err))
        }
        Err(err) => Err(err).wrap_err("failed to read chain state"),
    }
}

/// Stable name of the error kind, for scripts grepping the output.
fn kind<E>(err: &Error<E>) -> &'static str {
    match err {
        Error::InvalidAmount(_) => "InvalidAmount",
        Error::NotEnoughBalance(_) => "NotEnoughBalance",
        Error::MissingAllowance(_) => "MissingAllowance",
        Error::AmountExceedsMaxDeposit(_) => "AmountExceedsMaxDeposit",
        Error::Chain(_) => "Chain",
    }
}
