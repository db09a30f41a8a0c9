use asn1::can_be_certificate;
use clap::Subcommand;

use super::InputConfig;
use crate::error::Result;
use crate::utils::{decode_objects, read_input};

#[derive(Subcommand)]
pub(crate) enum Asn1Commands {
    /// Decode and pretty-print an ASN.1 object tree
    Show {
        #[command(flatten)]
        config: InputConfig,
    },
    /// Check whether the input could be an X.509 certificate
    Guess {
        #[command(flatten)]
        config: InputConfig,
    },
}

pub(crate) fn show(config: InputConfig) -> Result<()> {
    let data = read_input(config.input.as_deref())?;
    for object in decode_objects(&data)? {
        println!("{}", object.pretty_string(""));
    }

    Ok(())
}

pub(crate) fn guess(config: InputConfig) -> Result<()> {
    let data = read_input(config.input.as_deref())?;
    for object in decode_objects(&data)? {
        println!("{}", object.pretty_string(""));
        match can_be_certificate(&object) {
            Ok(()) => println!("X.509 certificate"),
            Err(e) => println!("Not a X.509 certificate: {e}"),
        }
    }

    Ok(())
}
