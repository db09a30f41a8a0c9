use crate::error::Result;

pub(crate) fn execute() -> Result<()> {
    println!("gossl {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
