use clap::Args;

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::read_input;

#[derive(Args)]
pub(crate) struct Config {
    /// Files to inspect; reads stdin when empty
    files: Vec<String>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value = "text")]
    output: OutputFormat,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    if config.files.is_empty() {
        let data = read_input(None)?;
        return report("-", &data, config.output);
    }

    for file in &config.files {
        let data = read_input(Some(file))?;
        report(file, &data, config.output)?;
    }

    Ok(())
}

fn report(name: &str, data: &[u8], output: OutputFormat) -> Result<()> {
    let formats = container::detect(data);
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string(&formats)?),
        OutputFormat::Text => {
            let chain = formats
                .iter()
                .map(|format| format.to_string())
                .collect::<Vec<String>>()
                .join(" -> ");
            println!("{name}: {chain}");
        }
    }

    Ok(())
}
