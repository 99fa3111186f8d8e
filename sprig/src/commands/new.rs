use std::{io::IsTerminal, path::PathBuf};

use clap::Args;
use eyre::{Result, bail};
use sprig::{
    answers::{AnswerError, Defaults, Prompter, TerminalPrompter, collect_config},
    bundle::{LocalBundle, RefreshPolicy},
    ops::{self, GenerateOptions},
    render::TemplateRenderer,
    reports::{PlanReport, Report, TerminalOutput},
};
use sprig_core::Overwrite;

use super::{AnswerArgs, UnwrapOrExit, report_answer_error};

#[derive(Args)]
pub struct NewCommand {
    /// Plugin name (prompted for when omitted)
    pub name: Option<String>,

    /// Plugin URL
    #[arg(value_name = "URL")]
    pub project_url: Option<String>,

    /// Author email or URL
    #[arg(value_name = "AUTHOR_URI")]
    pub author_contact: Option<String>,

    /// Author name
    #[arg(value_name = "AUTHOR_NAME")]
    pub author_name: Option<String>,

    /// Template bundle directory
    #[arg(long, value_name = "DIR", required_unless_present = "dry_run")]
    pub templates: Option<PathBuf>,

    /// Directory the project is created in
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Accept defaults instead of prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Refresh the cached template bundle
    #[arg(long)]
    pub no_cache: bool,

    /// Write into an existing, non-empty project directory
    #[arg(long)]
    pub force: bool,

    /// Write into an existing project directory, leaving files already there untouched
    #[arg(long, conflicts_with = "force")]
    pub keep_existing: bool,

    /// Print the files that would be generated and exit
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub args: AnswerArgs,
}

impl NewCommand {
    pub fn run(&self) -> Result<()> {
        let tree = self.args.load_tree();

        let mut answers = self.args.answers(self.name.clone())?;
        // Positionals win over the equivalent flags.
        if self.project_url.is_some() {
            answers.url = self.project_url.clone();
        }
        if self.author_contact.is_some() {
            answers.author_uri = self.author_contact.clone();
        }
        if self.author_name.is_some() {
            answers.author = self.author_name.clone();
        }

        let mut terminal = TerminalPrompter::new();
        let prompter: Option<&mut dyn Prompter> =
            if self.yes || !std::io::stdin().is_terminal() {
                None
            } else {
                Some(&mut terminal)
            };

        let config = match collect_config(answers, &Defaults::from_git(), &tree, prompter) {
            Ok(config) => config,
            Err(AnswerError::UserAbort) => bail!("aborted"),
            Err(e) => return Err(report_answer_error(e)),
        };

        let plan = ops::plan(&config, &tree).unwrap_or_exit();

        if self.dry_run {
            let report = PlanReport {
                title: plan.forms.title().to_string(),
                project_dir: self.output.join(plan.forms.file()).display().to_string(),
                manifest: plan.manifest,
            };
            report.render(&mut TerminalOutput::new());
            return Ok(());
        }

        let Some(templates) = &self.templates else {
            bail!("--templates is required to generate a project");
        };
        let source = LocalBundle::new(templates, LocalBundle::default_cache_root());
        let renderer = TemplateRenderer::new(if self.keep_existing {
            Overwrite::IfMissing
        } else {
            Overwrite::Always
        });

        let report = ops::generate(
            &plan,
            &config,
            &tree,
            GenerateOptions {
                output_root: &self.output,
                source: &source,
                refresh: RefreshPolicy::from_no_cache(self.no_cache),
                renderer: &renderer,
                force: self.force || self.keep_existing,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
