use asn1::{known_oid_name, Oid};
use clap::Subcommand;
use container::Container;
use pkcs::pkix::EcPublicKey;
use pkcs::sec1::EcPrivateKey;
use pkcs::{PrivateKey, PublicKey};

use super::InputConfig;
use crate::error::Result;
use crate::utils::{format_hex, read_input};

#[derive(Subcommand)]
pub(crate) enum EcCommands {
    /// Show the components of an EC key
    Show {
        #[command(flatten)]
        config: InputConfig,
    },
}

pub(crate) fn show(config: InputConfig) -> Result<()> {
    let data = read_input(config.input.as_deref())?;
    let chain = Container::parse_chain(&data)?;

    if let Some(PrivateKey::Ec(key)) = chain.first_private_key() {
        return show_private(&key);
    }

    if let Some(PublicKey::Ec(key)) = chain.first_public_key() {
        return show_public(&key);
    }

    Err("no EC key found in input".into())
}

fn print_curve(curve: Option<&Oid>) {
    match curve {
        Some(oid) => {
            let name = known_oid_name(oid).unwrap_or("unknown");
            println!("ASN1 OID: {oid} ({name})");
        }
        None => println!("ASN1 OID: unspecified"),
    }
}

fn show_private(key: &EcPrivateKey) -> Result<()> {
    println!("EC Private-Key: ({} bit)", key.key_size());
    println!("priv: [{} bytes]", key.private_key.len());
    println!("{}", format_hex(&key.private_key, 15, "    "));
    if let Some(point) = &key.public_key {
        println!("pub: [{} bytes]", point.len());
        println!("{}", format_hex(point, 15, "    "));
    }

    print_curve(key.curve.as_ref());
    Ok(())
}

fn show_public(key: &EcPublicKey) -> Result<()> {
    println!("EC Public-Key: ({} bit)", key.key_size());
    println!("pub: [{} bytes]", key.point.len());
    println!("{}", format_hex(&key.point, 15, "    "));
    print_curve(key.curve.as_ref());
    Ok(())
}
