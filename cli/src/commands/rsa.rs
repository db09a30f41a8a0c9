use clap::Subcommand;
use container::Container;
use pkcs::pkcs1::{RsaPrivateKey, RsaPublicKey};
use pkcs::{PrivateKey, PublicKey};
use serde::Serialize;

use super::InputConfig;
use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::{format_hex, read_input};

#[derive(Subcommand)]
pub(crate) enum RsaCommands {
    /// Show the components of an RSA key
    Show {
        #[command(flatten)]
        config: ShowConfig,
    },
}

#[derive(clap::Args)]
pub(crate) struct ShowConfig {
    #[command(flatten)]
    input: InputConfig,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value = "text")]
    output: OutputFormat,
}

#[derive(Serialize)]
struct RsaKeySummary {
    key_size: u32,
    public_exponent: String,
    modulus: String,
    private: bool,
}

pub(crate) fn show(config: ShowConfig) -> Result<()> {
    let data = read_input(config.input.input.as_deref())?;
    let chain = Container::parse_chain(&data)?;

    if let Some(PrivateKey::Rsa(key)) = chain.first_private_key() {
        return show_private(&key, config.output);
    }

    if let Some(PublicKey::Rsa(key)) = chain.first_public_key() {
        return show_public(&key, config.output);
    }

    Err("no RSA key found in input".into())
}

fn show_private(key: &RsaPrivateKey, output: OutputFormat) -> Result<()> {
    if output == OutputFormat::Json {
        let summary = RsaKeySummary {
            key_size: key.key_size(),
            public_exponent: key.public_exponent.to_string(),
            modulus: format!("{:x}", key.modulus),
            private: true,
        };
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    println!("RSA Private-Key: ({} bit, 2 primes)", key.key_size());
    print_magnitude("modulus", &key.modulus);
    println!(
        "publicExponent: {} (0x{:x})",
        key.public_exponent, key.public_exponent
    );
    print_magnitude("privateExponent", &key.private_exponent);
    print_magnitude("prime1", &key.prime1);
    print_magnitude("prime2", &key.prime2);
    Ok(())
}

fn show_public(key: &RsaPublicKey, output: OutputFormat) -> Result<()> {
    if output == OutputFormat::Json {
        let summary = RsaKeySummary {
            key_size: key.key_size(),
            public_exponent: key.public_exponent.to_string(),
            modulus: format!("{:x}", key.modulus),
            private: false,
        };
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    println!("RSA Public-Key: ({} bit)", key.key_size());
    print_magnitude("modulus", &key.modulus);
    println!(
        "publicExponent: {} (0x{:x})",
        key.public_exponent, key.public_exponent
    );
    Ok(())
}

fn print_magnitude(name: &str, value: &num_bigint::BigInt) {
    let (_, bytes) = value.to_bytes_be();
    println!("{}: [{} bytes]", name, bytes.len());
    println!("{}", format_hex(&bytes, 15, "    "));
}
