//! P2SH multisig command-line tool
//!
//! Creates M-of-N P2SH addresses and builds signed funding and spending
//! transactions for them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use p2sh_multisig::address::{address_hash, p2pkh_address};
use p2sh_multisig::pubkey::parse_public_key_list;
use p2sh_multisig::signature::{derive_public_key, generate_private_key, parse_private_key_hex};
use p2sh_multisig::transaction::{serialize_transaction, transaction_id};
use p2sh_multisig::{P2shMultisig, Transaction, P2PKH_VERSION_BYTE, P2SH_VERSION_BYTE};

#[derive(Parser)]
#[command(name = "p2sh-multisig")]
#[command(version = "0.1.0")]
#[command(about = "Create and spend Bitcoin P2SH multisig outputs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an M-of-N P2SH address and its redeem script
    Address {
        /// Minimum number of signatures needed to spend
        #[arg(short)]
        m: usize,

        /// Total number of public keys
        #[arg(short)]
        n: usize,

        /// Comma separated hex public keys, quotes allowed: key1,'key2',"key3"
        #[arg(long = "public-keys")]
        public_keys: String,
    },

    /// Fund a P2SH address from a P2PKH output
    Fund {
        /// Hex private key controlling the input
        #[arg(long = "private-key")]
        private_key: String,

        /// Hash of the transaction being spent (output 0)
        #[arg(long = "input-tx")]
        input_tx: String,

        /// Amount to send in satoshis
        #[arg(long)]
        satoshis: u64,

        /// Destination P2SH address
        #[arg(long)]
        destination: String,
    },

    /// Spend a P2SH multisig output to a P2PKH address
    Spend {
        /// Comma separated hex private keys, exactly M of them
        #[arg(long = "private-keys")]
        private_keys: String,

        /// Hex redeem script of the P2SH output
        #[arg(long = "redeem-script")]
        redeem_script: String,

        /// Hash of the transaction being spent (output 0)
        #[arg(long = "input-tx")]
        input_tx: String,

        /// Amount to send in satoshis
        #[arg(long)]
        satoshis: u64,

        /// Destination P2PKH address
        #[arg(long)]
        destination: String,
    },

    /// Generate a private key and its uncompressed public key
    Keys,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let multisig = P2shMultisig::new();

    match cli.command {
        Commands::Address { m, n, public_keys } => {
            let keys = parse_public_key_list(&public_keys).context("parsing --public-keys")?;
            let created = multisig
                .create_address(m, n, &keys)
                .with_context(|| format!("building {}-of-{} redeem script", m, n))?;
            if let Some(advisory) = &created.redeem_script.advisory {
                eprintln!("WARNING: {}", advisory);
            }
            println!("P2SH address:");
            println!("{}", created.address);
            println!("Redeem script:");
            println!("{}", hex::encode(created.redeem_script.as_bytes()));
        }

        Commands::Fund {
            private_key,
            input_tx,
            satoshis,
            destination,
        } => {
            let private_key =
                parse_private_key_hex(&private_key).context("parsing --private-key")?;
            let script_hash =
                address_hash(&destination, P2SH_VERSION_BYTE).context("parsing --destination")?;
            let tx = multisig.fund(&private_key, &input_tx, satoshis, &script_hash)?;
            print_transaction(&tx)?;
        }

        Commands::Spend {
            private_keys,
            redeem_script,
            input_tx,
            satoshis,
            destination,
        } => {
            let private_keys = private_keys
                .split(',')
                .map(|k| k.trim().trim_matches(|c: char| c == '"' || c == '\''))
                .map(parse_private_key_hex)
                .collect::<p2sh_multisig::Result<Vec<_>>>()
                .context("parsing --private-keys")?;
            let redeem_script =
                hex::decode(redeem_script.trim()).context("parsing --redeem-script")?;
            let destination_hash =
                address_hash(&destination, P2PKH_VERSION_BYTE).context("parsing --destination")?;
            let tx = multisig.spend(
                &private_keys,
                &redeem_script,
                &input_tx,
                satoshis,
                &destination_hash,
            )?;
            print_transaction(&tx)?;
        }

        Commands::Keys => {
            let private_key = generate_private_key();
            let public_key = derive_public_key(&private_key)?;
            println!("Private key: {}", hex::encode(private_key));
            println!("Public key:  {}", hex::encode(public_key));
            println!("Address:     {}", p2pkh_address(&public_key)?);
        }
    }

    Ok(())
}

fn print_transaction(tx: &Transaction) -> Result<()> {
    let raw = serialize_transaction(tx)?;
    println!("Transaction id:");
    println!("{}", transaction_id(tx)?);
    println!("Raw transaction:");
    println!("{}", hex::encode(raw));
    Ok(())
}
