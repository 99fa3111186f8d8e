use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use sprig::{
    answers::{Defaults, collect_config},
    ops,
    reports::{PlanReport, Report, TerminalOutput},
};

use super::{AnswerArgs, UnwrapOrExit, report_answer_error};

#[derive(Args)]
pub struct PlanCommand {
    /// Plugin name
    pub name: String,

    /// Directory the project would be created in
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    #[command(flatten)]
    pub args: AnswerArgs,
}

impl PlanCommand {
    pub fn run(&self) -> Result<()> {
        let tree = self.args.load_tree();
        let answers = self.args.answers(Some(self.name.clone()))?;
        let config = collect_config(answers, &Defaults::default(), &tree, None)
            .map_err(report_answer_error)?;

        let plan = ops::plan(&config, &tree).unwrap_or_exit();
        let report = PlanReport {
            title: plan.forms.title().to_string(),
            project_dir: self.output.join(plan.forms.file()).display().to_string(),
            manifest: plan.manifest,
        };
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
