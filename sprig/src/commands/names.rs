use clap::Args;
use eyre::Result;
use sprig::{
    ops,
    reports::{Report, TerminalOutput},
};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct NamesCommand {
    /// Name to derive identifiers from
    pub name: String,
}

impl NamesCommand {
    pub fn run(&self) -> Result<()> {
        let report = ops::names(&self.name).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
