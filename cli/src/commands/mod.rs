pub(crate) mod asn1;
pub(crate) mod cert;
pub(crate) mod ec;
pub(crate) mod format;
pub(crate) mod rsa;
pub(crate) mod version;

use clap::Args;

/// Shared input selection for the inspection commands.
#[derive(Args)]
pub(crate) struct InputConfig {
    /// Input file; reads stdin when omitted or "-"
    #[arg(short = 'i', long = "in")]
    pub(crate) input: Option<String>,
}
