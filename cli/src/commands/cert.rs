use clap::Subcommand;
use container::Container;

use super::InputConfig;
use crate::error::Result;
use crate::utils::read_input;

#[derive(Subcommand)]
pub(crate) enum CertCommands {
    /// Show the structure of certificates in the input
    Show {
        #[command(flatten)]
        config: InputConfig,
    },
}

pub(crate) fn show(config: InputConfig) -> Result<()> {
    let data = read_input(config.input.as_deref())?;
    let chain = Container::parse_chain(&data)?;

    let mut found = false;
    for element in chain.iter() {
        println!("{}", element.describe());
        if let Ok(certificate) = element.certificate() {
            found = true;
            if let Some(serial) = certificate.serial_number() {
                println!("Serial Number: {serial}");
            }

            println!("{}", certificate.tbs_certificate().pretty_string(""));
        }
    }

    if !found {
        return Err("no certificate found in input".into());
    }

    Ok(())
}
