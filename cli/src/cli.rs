//! # CLI Interface
//!
//! Command-line argument structure for the `meridian` binary, using `clap`
//! derive. One subcommand per operation kind plus key management helpers.
//!
//! Every operation subcommand shares [`SubmitArgs`]: the secret key, the
//! node endpoint, the fee, and the offline `--dry-run` switch. With
//! `--dry-run` the command signs against a caller-supplied `--chain-id` and
//! `--period` and prints the submission envelope instead of talking to a
//! node; nothing network-facing runs at all.

use clap::{Args, Parser, Subcommand};

/// Meridian offline operation signer.
///
/// Builds, signs, and submits Meridian operations. Key material stays on
/// this machine: signing needs no network access, and submission sends only
/// the signed payload.
#[derive(Parser, Debug)]
#[command(
    name = "meridian",
    about = "Meridian offline operation signer",
    version,
    propagate_version = true
)]
pub struct MeridianCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a fresh keypair and print its secret key, public key, and
    /// address.
    Generate,
    /// Derive the public key and address controlled by a secret key.
    Address(KeyArgs),
    /// Transfer MER to a recipient.
    Transfer(TransferArgs),
    /// Buy staking rolls.
    BuyRolls(RollArgs),
    /// Sell staking rolls.
    SellRolls(RollArgs),
    /// Call a function on a deployed contract.
    Call(CallArgs),
    /// Deploy and execute bytecode.
    Execute(ExecuteArgs),
    /// Print version information and exit.
    Version,
}

/// A bare secret-key argument, for key-management subcommands.
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Secret key: chain form (`S…`) or 64 hex characters.
    #[arg(long, env = "MERIDIAN_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,
}

/// Arguments shared by every operation subcommand.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Secret key: chain form (`S…`) or 64 hex characters.
    ///
    /// Prefer the environment variable over the flag so the key stays out
    /// of shell history.
    #[arg(long, env = "MERIDIAN_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Node JSON-RPC endpoint.
    #[arg(long, env = "MERIDIAN_RPC_URL", default_value = "http://127.0.0.1:33035")]
    pub rpc_url: String,

    /// Operation fee in MER.
    #[arg(long, default_value = "0.01")]
    pub fee: String,

    /// Sign offline and print the submission envelope to stdout instead of
    /// submitting. Requires --chain-id and --period.
    #[arg(long)]
    pub dry_run: bool,

    /// Chain id to sign against when using --dry-run.
    #[arg(long, requires = "dry_run")]
    pub chain_id: Option<u64>,

    /// Current network period to stamp the expiry from when using
    /// --dry-run.
    #[arg(long, requires = "dry_run")]
    pub period: Option<u64>,
}

/// Arguments for `transfer`.
#[derive(Args, Debug)]
pub struct TransferArgs {
    #[command(flatten)]
    pub submit: SubmitArgs,

    /// Recipient address (`AU…`).
    #[arg(long)]
    pub to: String,

    /// Amount in MER, e.g. "1.5".
    #[arg(long)]
    pub amount: String,
}

/// Arguments for `buy-rolls` / `sell-rolls`.
#[derive(Args, Debug)]
pub struct RollArgs {
    #[command(flatten)]
    pub submit: SubmitArgs,

    /// Number of rolls to trade.
    #[arg(long)]
    pub rolls: u64,
}

/// Arguments for `call`.
#[derive(Args, Debug)]
pub struct CallArgs {
    #[command(flatten)]
    pub submit: SubmitArgs,

    /// Contract address (`AS…`).
    #[arg(long)]
    pub target: String,

    /// Function to invoke.
    #[arg(long)]
    pub function: String,

    /// Call parameter. Accepts a JSON byte object, JSON byte array,
    /// Base64, hex, or plain text; empty means no arguments.
    #[arg(long, default_value = "")]
    pub parameter: String,

    /// Coins to attach to the call, in MER.
    #[arg(long, default_value = "0")]
    pub coins: String,

    /// Gas ceiling for execution.
    #[arg(long, default_value_t = 1_000_000_000)]
    pub max_gas: u64,
}

/// Arguments for `execute`.
#[derive(Args, Debug)]
pub struct ExecuteArgs {
    #[command(flatten)]
    pub submit: SubmitArgs,

    /// Bytecode to deploy. Accepts a JSON byte array, hex, Base64, or raw
    /// text.
    #[arg(long)]
    pub bytecode: String,

    /// Datastore entries shipped with the deployment, as
    /// HEXKEY=HEXVALUE pairs. Repeat the flag for multiple entries.
    #[arg(long = "datastore-entry", value_parser = parse_datastore_entry)]
    pub datastore: Vec<(Vec<u8>, Vec<u8>)>,

    /// Coins to attach to the execution, in MER.
    #[arg(long, default_value = "0")]
    pub coins: String,

    /// Gas ceiling for execution.
    #[arg(long, default_value_t = 1_000_000_000)]
    pub max_gas: u64,
}

/// Parses one `HEXKEY=HEXVALUE` datastore entry.
pub fn parse_datastore_entry(input: &str) -> Result<(Vec<u8>, Vec<u8>), String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| "expected HEXKEY=HEXVALUE".to_string())?;
    let key = hex::decode(key).map_err(|e| format!("datastore key is not hex: {e}"))?;
    let value = hex::decode(value).map_err(|e| format!("datastore value is not hex: {e}"))?;
    Ok((key, value))
}
