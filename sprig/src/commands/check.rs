use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use sprig::{
    ops,
    reports::{Report, TerminalOutput},
};
use sprig_tree::TemplateTree;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to a tree description (defaults to the builtin boilerplate)
    #[arg(short, long, value_name = "FILE")]
    pub tree: Option<PathBuf>,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let (tree, source) = match &self.tree {
            Some(path) => (
                TemplateTree::from_file(path).unwrap_or_exit(),
                path.display().to_string(),
            ),
            None => (TemplateTree::builtin().unwrap_or_exit(), "builtin".to_string()),
        };

        let report = ops::check(&tree, &source);
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
