mod check;
mod completions;
mod names;
mod new;
mod plan;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{ArgAction, Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use names::NamesCommand;
use new::NewCommand;
use plan::PlanCommand;
use sprig::answers::{AnswerError, Answers};
use sprig_tree::{License, TemplateTree};

/// Extension trait for exiting on diagnostic errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for sprig_tree::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for Result<T, sprig_core::InvalidName> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "sprig")]
#[command(version)]
#[command(about = "Scaffold a WordPress plugin skeleton from a project name")]
pub(crate) struct Cli {
    /// Show debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::New(cmd) => cmd.run(),
            Commands::Plan(cmd) => cmd.run(),
            Commands::Names(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project
    New(NewCommand),

    /// Show the files a project would get, without writing anything
    Plan(PlanCommand),

    /// Show the identifier forms derived from a name
    Names(NamesCommand),

    /// Validate a template tree description
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Answers that can be given on the command line.
#[derive(Args, Debug, Default)]
pub(crate) struct AnswerArgs {
    /// TOML file with answers (flags take precedence)
    #[arg(long, value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// Template tree description (defaults to the builtin boilerplate)
    #[arg(long, value_name = "FILE")]
    pub tree: Option<PathBuf>,

    /// Starting version
    #[arg(long, value_name = "VERSION")]
    pub start_version: Option<String>,

    /// Author name
    #[arg(long)]
    pub author: Option<String>,

    /// Author email or URL
    #[arg(long, value_name = "URI")]
    pub author_uri: Option<String>,

    /// Project URL
    #[arg(long)]
    pub url: Option<String>,

    /// License: GPLv2+, GPLv3, Apache, MIT, Public Domain, or any name with --license-uri
    #[arg(long)]
    pub license: Option<String>,

    /// URI for a custom license
    #[arg(long, value_name = "URI", requires = "license")]
    pub license_uri: Option<String>,

    /// Feature flag to enable (repeatable; replaces the defaults)
    #[arg(long = "feature", value_name = "FLAG", conflicts_with = "no_features")]
    pub features: Vec<String>,

    /// Enable no feature flags
    #[arg(long)]
    pub no_features: bool,

    /// Optional section to enable (repeatable; replaces the defaults)
    #[arg(long = "section", value_name = "SECTION", conflicts_with = "no_sections")]
    pub sections: Vec<String>,

    /// Enable no optional sections
    #[arg(long)]
    pub no_sections: bool,

    /// Skip the admin page
    #[arg(long)]
    pub no_admin: bool,
}

impl AnswerArgs {
    /// Load the template tree, exiting with a diagnostic if it is invalid.
    pub fn load_tree(&self) -> TemplateTree {
        match &self.tree {
            Some(path) => TemplateTree::from_file(path).unwrap_or_exit(),
            None => TemplateTree::builtin().unwrap_or_exit(),
        }
    }

    /// Flags merged over the answers file.
    pub fn answers(&self, name: Option<String>) -> Result<Answers> {
        let license = match (&self.license, &self.license_uri) {
            (Some(name), Some(uri)) => Some(License::other(name, uri)),
            (Some(name), None) => Some(name.parse::<License>().map_err(|e| eyre::eyre!(e))?),
            (None, _) => None,
        };

        let flags = Answers {
            name,
            version: self.start_version.clone(),
            author: self.author.clone(),
            author_uri: self.author_uri.clone(),
            url: self.url.clone(),
            license,
            features: list_answer(&self.features, self.no_features),
            sections: list_answer(&self.sections, self.no_sections),
            admin: self.no_admin.then_some(false),
        };

        let file = match &self.answers {
            Some(path) => Answers::from_file(path).map_err(report_answer_error)?,
            None => Answers::default(),
        };
        Ok(flags.or(file))
    }
}

fn list_answer(values: &[String], none: bool) -> Option<Vec<String>> {
    if none {
        Some(Vec::new())
    } else if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

pub(crate) fn report_answer_error(e: AnswerError) -> eyre::Report {
    eyre::Report::new(e)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_answer_args_to_answers() {
        let cli = Cli::parse_from([
            "sprig",
            "plan",
            "My Plugin",
            "--license",
            "mit",
            "--feature",
            "js",
            "--no-sections",
            "--no-admin",
        ]);
        let Commands::Plan(cmd) = &cli.command else {
            panic!("expected plan");
        };
        let answers = cmd.args.answers(Some(cmd.name.clone())).unwrap();

        assert_eq!(answers.name.as_deref(), Some("My Plugin"));
        assert_eq!(answers.license, Some(License::Mit));
        assert_eq!(answers.features, Some(vec!["js".to_string()]));
        assert_eq!(answers.sections, Some(vec![]));
        assert_eq!(answers.admin, Some(false));
        assert!(answers.version.is_none());
    }

    #[test]
    fn test_keep_existing_conflicts_with_force() {
        let cli = Cli::try_parse_from([
            "sprig",
            "new",
            "Busy",
            "--templates",
            "tpl",
            "--keep-existing",
        ])
        .unwrap();
        let Commands::New(cmd) = cli.command else {
            panic!("expected new");
        };
        assert!(cmd.keep_existing);
        assert!(!cmd.force);

        let err = Cli::try_parse_from([
            "sprig",
            "new",
            "Busy",
            "--templates",
            "tpl",
            "--keep-existing",
            "--force",
        ])
        .err()
        .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_custom_license() {
        let args = AnswerArgs {
            license: Some("WTFPL".to_string()),
            license_uri: Some("http://www.wtfpl.net".to_string()),
            ..Default::default()
        };
        let answers = args.answers(None).unwrap();
        assert_eq!(
            answers.license,
            Some(License::other("WTFPL", "http://www.wtfpl.net"))
        );
    }

    #[test]
    fn test_unknown_license_without_uri_fails() {
        let args = AnswerArgs {
            license: Some("WTFPL".to_string()),
            ..Default::default()
        };
        assert!(args.answers(None).is_err());
    }
}
