// Copyright (c) 2026 Meridian Labs. MIT License.
// See LICENSE for details.

//! # Meridian CLI
//!
//! Entry point for the `meridian` binary: build, sign, and submit Meridian
//! operations from the command line, or sign them fully offline with
//! `--dry-run` and paste the printed envelope into any transport you like.
//!
//! Data goes to stdout, logs go to stderr. A secret key is read from a flag
//! or `MERIDIAN_SECRET_KEY`, lives for the duration of one command, and is
//! never echoed back.

mod cli;
mod logging;
mod rpc;

use anyhow::{Context, Result};
use clap::Parser;

use meridian_signer::config::EXPIRE_PERIOD_LOOKAHEAD;
use meridian_signer::identity::{Address, Keypair};
use meridian_signer::operation::{
    decode_bytecode, decode_parameter, Operation, TransferFormat,
};
use meridian_signer::amount::parse_amount;
use meridian_signer::signing::sign_serialized;
use meridian_signer::submit::OperationClient;

use cli::{CallArgs, Commands, ExecuteArgs, KeyArgs, MeridianCli, RollArgs, SubmitArgs, TransferArgs};
use rpc::HttpNodeRpc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = MeridianCli::parse();
    logging::init_logging("meridian_cli=info,meridian_signer=info");

    match cli.command {
        Commands::Generate => generate(),
        Commands::Address(args) => show_address(args),
        Commands::Transfer(args) => transfer(args).await,
        Commands::BuyRolls(args) => buy_rolls(args).await,
        Commands::SellRolls(args) => sell_rolls(args).await,
        Commands::Call(args) => call_contract(args).await,
        Commands::Execute(args) => execute_bytecode(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Key management
// ---------------------------------------------------------------------------

/// Generates a fresh keypair and prints all three identity forms.
fn generate() -> Result<()> {
    let keypair = Keypair::generate();
    let public_key = keypair.public_key();
    let address = Address::from_public_key(&public_key);

    println!("Secret key : {}", keypair.to_text());
    println!("Public key : {}", public_key.to_text());
    println!("Address    : {}", address.to_text());
    Ok(())
}

/// Derives and prints the public identity controlled by a secret key.
fn show_address(args: KeyArgs) -> Result<()> {
    let keypair = Keypair::parse(&args.secret_key).context("failed to parse the secret key")?;
    let public_key = keypair.public_key();

    println!("Public key : {}", public_key.to_text());
    println!("Address    : {}", Address::from_public_key(&public_key).to_text());
    Ok(())
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

async fn transfer(args: TransferArgs) -> Result<()> {
    let keypair = parse_keypair(&args.submit)?;

    if args.submit.dry_run {
        let context = offline_context(&args.submit)?;
        let operation = Operation::Transfer {
            fee: parse_amount(&args.submit.fee)?,
            expire_period: context.expire_period,
            recipient: Address::from_text(&args.to)?,
            amount: parse_amount(&args.amount)?,
        };
        return print_envelope(context.chain_id, &keypair, &operation);
    }

    let client = online_client(&args.submit);
    let id = client
        .send_transfer(&args.to, &args.amount, &args.submit.fee, &keypair)
        .await?;
    println!("{id}");
    Ok(())
}

async fn buy_rolls(args: RollArgs) -> Result<()> {
    let keypair = parse_keypair(&args.submit)?;

    if args.submit.dry_run {
        let context = offline_context(&args.submit)?;
        let operation = Operation::RollBuy {
            fee: parse_amount(&args.submit.fee)?,
            expire_period: context.expire_period,
            roll_count: args.rolls,
        };
        return print_envelope(context.chain_id, &keypair, &operation);
    }

    let client = online_client(&args.submit);
    let id = client
        .send_roll_buy(args.rolls, &args.submit.fee, &keypair)
        .await?;
    println!("{id}");
    Ok(())
}

async fn sell_rolls(args: RollArgs) -> Result<()> {
    let keypair = parse_keypair(&args.submit)?;

    if args.submit.dry_run {
        let context = offline_context(&args.submit)?;
        let operation = Operation::RollSell {
            fee: parse_amount(&args.submit.fee)?,
            expire_period: context.expire_period,
            roll_count: args.rolls,
        };
        return print_envelope(context.chain_id, &keypair, &operation);
    }

    let client = online_client(&args.submit);
    let id = client
        .send_roll_sell(args.rolls, &args.submit.fee, &keypair)
        .await?;
    println!("{id}");
    Ok(())
}

async fn call_contract(args: CallArgs) -> Result<()> {
    let keypair = parse_keypair(&args.submit)?;

    if args.submit.dry_run {
        let context = offline_context(&args.submit)?;
        let operation = Operation::CallContract {
            fee: parse_amount(&args.submit.fee)?,
            expire_period: context.expire_period,
            max_gas: args.max_gas,
            coins: parse_amount(&args.coins)?,
            target: Address::from_text(&args.target)?,
            function: args.function.clone(),
            parameter: decode_parameter(&args.parameter)?,
        };
        return print_envelope(context.chain_id, &keypair, &operation);
    }

    let client = online_client(&args.submit);
    let id = client
        .send_call_contract(
            &args.target,
            &args.function,
            &args.parameter,
            &args.coins,
            &args.submit.fee,
            args.max_gas,
            &keypair,
        )
        .await?;
    println!("{id}");
    Ok(())
}

async fn execute_bytecode(args: ExecuteArgs) -> Result<()> {
    let keypair = parse_keypair(&args.submit)?;

    if args.submit.dry_run {
        let context = offline_context(&args.submit)?;
        let operation = Operation::ExecuteBytecode {
            fee: parse_amount(&args.submit.fee)?,
            expire_period: context.expire_period,
            max_gas: args.max_gas,
            coins: parse_amount(&args.coins)?,
            bytecode: decode_bytecode(&args.bytecode)?,
            datastore: args.datastore.clone(),
        };
        return print_envelope(context.chain_id, &keypair, &operation);
    }

    let client = online_client(&args.submit);
    let id = client
        .send_execute_bytecode(
            &args.bytecode,
            args.datastore,
            &args.coins,
            &args.submit.fee,
            args.max_gas,
            &keypair,
        )
        .await?;
    println!("{id}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_keypair(args: &SubmitArgs) -> Result<Keypair> {
    Keypair::parse(&args.secret_key).context("failed to parse the secret key")
}

fn online_client(args: &SubmitArgs) -> OperationClient<HttpNodeRpc> {
    OperationClient::new(HttpNodeRpc::new(args.rpc_url.clone()))
}

/// Signing context assembled from `--chain-id` / `--period` for offline
/// runs.
struct OfflineContext {
    chain_id: u64,
    expire_period: u64,
}

fn offline_context(args: &SubmitArgs) -> Result<OfflineContext> {
    let chain_id = args
        .chain_id
        .context("--chain-id is required with --dry-run")?;
    let period = args.period.context("--period is required with --dry-run")?;
    Ok(OfflineContext {
        chain_id,
        expire_period: period + EXPIRE_PERIOD_LOOKAHEAD,
    })
}

/// Signs the operation with the current transfer layout and prints the
/// exact `send_operations` parameter payload.
fn print_envelope(chain_id: u64, keypair: &Keypair, operation: &Operation) -> Result<()> {
    let signed = sign_serialized(chain_id, keypair, operation, TransferFormat::Current);
    let envelope = serde_json::json!([[signed]]);
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn print_version() {
    println!("meridian {}", env!("CARGO_PKG_VERSION"));
}
