use clap::{Parser, Subcommand};

mod commands;
mod error;
mod output;
mod utils;

use commands::asn1::Asn1Commands;
use commands::cert::CertCommands;
use commands::ec::EcCommands;
use commands::rsa::RsaCommands;
use error::Result;

#[derive(Parser)]
#[command(name = "gossl")]
#[command(about = "OpenSSL-like toolkit for inspecting cryptographic material", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version information
    Version,
    /// Detect the encoding of key and certificate files
    Format {
        #[command(flatten)]
        config: commands::format::Config,
    },
    /// ASN.1 object operations
    Asn1 {
        #[command(subcommand)]
        command: Asn1Commands,
    },
    /// Certificate operations
    Cert {
        #[command(subcommand)]
        command: CertCommands,
    },
    /// RSA key operations
    Rsa {
        #[command(subcommand)]
        command: RsaCommands,
    },
    /// EC key operations
    Ec {
        #[command(subcommand)]
        command: EcCommands,
    },
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Version => commands::version::execute(),
        Commands::Format { config } => commands::format::execute(config),
        Commands::Asn1 { command } => match command {
            Asn1Commands::Show { config } => commands::asn1::show(config),
            Asn1Commands::Guess { config } => commands::asn1::guess(config),
        },
        Commands::Cert { command } => match command {
            CertCommands::Show { config } => commands::cert::show(config),
        },
        Commands::Rsa { command } => match command {
            RsaCommands::Show { config } => commands::rsa::show(config),
        },
        Commands::Ec { command } => match command {
            EcCommands::Show { config } => commands::ec::show(config),
        },
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("gossl error: {e}");
        std::process::exit(1);
    }
}
