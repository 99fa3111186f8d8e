//! Collecting the project configuration.
//!
//! Answers come from, in priority order: command-line flags, an optional
//! TOML answers file, interactive prompts, and defaults derived from the
//! local git setup.

use std::{path::Path, process::Command};

use serde::Deserialize;
use sprig_core::pretty_name;
use sprig_tree::{
    ADMIN_SECTION, DEFAULT_FEATURES, DEFAULT_SECTIONS, License, ProjectConfig, TemplateTree,
};
use thiserror::Error;
use tracing::warn;

/// Name offered when none is given.
pub const DEFAULT_NAME: &str = "My Amazing Plugin";

/// Failure to collect answers.
#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("aborted by user")]
    UserAbort,

    #[error("prompt failed")]
    Prompt(#[from] dialoguer::Error),

    #[error("failed to read answers file '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse answers file '{path}'")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Partial answers; unset fields fall through to the next source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Answers {
    pub name: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub author_uri: Option<String>,
    pub url: Option<String>,
    pub license: Option<License>,
    pub features: Option<Vec<String>>,
    pub sections: Option<Vec<String>>,
    pub admin: Option<bool>,
}

impl Answers {
    /// Read answers from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AnswerError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| AnswerError::Read {
            path: display.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| AnswerError::Parse {
            path: display,
            source,
        })
    }

    /// Fill unset fields from `fallback`.
    pub fn or(self, fallback: Answers) -> Answers {
        Answers {
            name: self.name.or(fallback.name),
            version: self.version.or(fallback.version),
            author: self.author.or(fallback.author),
            author_uri: self.author_uri.or(fallback.author_uri),
            url: self.url.or(fallback.url),
            license: self.license.or(fallback.license),
            features: self.features.or(fallback.features),
            sections: self.sections.or(fallback.sections),
            admin: self.admin.or(fallback.admin),
        }
    }
}

/// Defaults offered when neither flags nor the answers file decide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub name: String,
    pub author: String,
    pub author_uri: String,
    pub url: String,
}

impl Default for Defaults {
    fn default() -> Self {
        let base = ProjectConfig::new(DEFAULT_NAME);
        Self {
            name: DEFAULT_NAME.to_string(),
            author: base.author.name,
            author_uri: base.author.contact,
            url: base.url,
        }
    }
}

impl Defaults {
    /// Defaults taken from git's user settings and the `origin` remote.
    pub fn from_git() -> Self {
        let fallback = Self::default();
        Self {
            name: fallback.name,
            author: git(&["config", "--get", "user.name"]).unwrap_or(fallback.author),
            author_uri: git(&["config", "--get", "user.email"]).unwrap_or(fallback.author_uri),
            url: git(&["remote", "get-url", "origin"])
                .and_then(|remote| web_url_from_git(&remote))
                .unwrap_or(fallback.url),
        }
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// Turn a git remote into a browsable https URL
/// (e.g., "git@github.com:user/repo.git" -> "https://github.com/user/repo").
pub fn web_url_from_git(remote: &str) -> Option<String> {
    let remote = remote.trim();
    let host_and_path = if let Some(rest) = remote.strip_prefix("git@") {
        rest.replacen(':', "/", 1)
    } else if let Some(rest) = ["https://", "http://", "ssh://git@", "git://"]
        .iter()
        .find_map(|scheme| remote.strip_prefix(scheme))
    {
        rest.to_string()
    } else {
        return None;
    };

    // Drop credentials such as "user:token@github.com/...".
    let host_and_path = match host_and_path.split_once('@') {
        Some((creds, rest)) if !creds.contains('/') => rest.to_string(),
        _ => host_and_path,
    };
    let trimmed = host_and_path.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    if !trimmed.contains('/') {
        return None;
    }
    Some(format!("https://{}", trimmed))
}

/// Asks the user for answers.
pub trait Prompter {
    fn input(&mut self, prompt: &str, default: &str) -> Result<String, AnswerError>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, AnswerError>;

    /// Returns the index of the chosen item.
    fn select(&mut self, prompt: &str, items: &[String], default: usize)
    -> Result<usize, AnswerError>;

    /// Returns the indices of the checked items.
    fn multi_select(
        &mut self,
        prompt: &str,
        items: &[String],
        checked: &[bool],
    ) -> Result<Vec<usize>, AnswerError>;
}

/// Prompts on the terminal with dialoguer.
pub struct TerminalPrompter {
    theme: dialoguer::theme::ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: dialoguer::theme::ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str, default: &str) -> Result<String, AnswerError> {
        Ok(dialoguer::Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, AnswerError> {
        dialoguer::Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()?
            .ok_or(AnswerError::UserAbort)
    }

    fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<usize, AnswerError> {
        dialoguer::Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()?
            .ok_or(AnswerError::UserAbort)
    }

    fn multi_select(
        &mut self,
        prompt: &str,
        items: &[String],
        checked: &[bool],
    ) -> Result<Vec<usize>, AnswerError> {
        dialoguer::MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .defaults(checked)
            .interact_opt()?
            .ok_or(AnswerError::UserAbort)
    }
}

/// Build the project configuration.
///
/// `answers` holds everything already decided (flags merged over the answers
/// file). Remaining questions go to `prompter`, or take their defaults when
/// there is none. Feature and section choices are offered from `tree`.
pub fn collect_config(
    answers: Answers,
    defaults: &Defaults,
    tree: &TemplateTree,
    mut prompter: Option<&mut dyn Prompter>,
) -> Result<ProjectConfig, AnswerError> {
    let mut ask_text = |value: Option<String>, prompt: &str, default: &str| match value {
        Some(v) => Ok(v),
        None => match prompter.as_deref_mut() {
            Some(p) => p.input(prompt, default),
            None => Ok(default.to_string()),
        },
    };

    let name = ask_text(
        answers.name,
        "What will be the name for the new plugin?",
        &pretty_name(&defaults.name),
    )?;
    let version = ask_text(answers.version, "What will be the starting version?", "1.0.0")?;
    let author = ask_text(
        answers.author,
        "Please give the author's name (First & Last):",
        &pretty_name(&defaults.author),
    )?;
    let author_uri = ask_text(
        answers.author_uri,
        "Please give an Email or URL for the author:",
        &defaults.author_uri,
    )?;
    let url = ask_text(
        answers.url,
        "Please give a URL for this plugin (Website/GitHub/etc.):",
        &defaults.url,
    )?;

    let features = match answers.features {
        Some(features) => features,
        None => choose_many(
            prompter.as_deref_mut(),
            "Which resources will be needed for this plugin?",
            &tree.flags,
            DEFAULT_FEATURES,
        )?,
    };

    let hook_choices: Vec<String> = tree
        .sections
        .iter()
        .filter(|s| *s != ADMIN_SECTION)
        .cloned()
        .collect();
    let sections = match answers.sections {
        Some(sections) => sections,
        None => choose_many(
            prompter.as_deref_mut(),
            "Which lifecycle hooks should be generated?",
            &hook_choices,
            DEFAULT_SECTIONS,
        )?,
    };

    let admin = match (answers.admin, prompter.as_deref_mut()) {
        (Some(admin), _) => admin,
        (None, Some(p)) => p.confirm("Will this plugin need its own admin page?", true)?,
        (None, None) => true,
    };

    let license = match (answers.license, prompter.as_deref_mut()) {
        (Some(license), _) => license,
        (None, Some(p)) => prompt_license(p)?,
        (None, None) => License::default(),
    };

    warn_unknown("feature", &features, &tree.flags);
    warn_unknown("section", &sections, &tree.sections);

    Ok(ProjectConfig::new(name)
        .with_version(version)
        .with_author(pretty_name(&author), author_uri)
        .with_url(url)
        .with_license(license)
        .with_features(features)
        .with_sections(sections)
        .with_admin(admin))
}

fn choose_many<'p>(
    prompter: Option<&mut (dyn Prompter + 'p)>,
    prompt: &str,
    choices: &[String],
    defaults: &[&str],
) -> Result<Vec<String>, AnswerError> {
    let checked: Vec<bool> = choices
        .iter()
        .map(|c| defaults.contains(&c.as_str()))
        .collect();
    match prompter {
        Some(p) if !choices.is_empty() => Ok(p
            .multi_select(prompt, choices, &checked)?
            .into_iter()
            .filter_map(|i| choices.get(i).cloned())
            .collect()),
        _ => Ok(defaults.iter().map(|s| s.to_string()).collect()),
    }
}

fn prompt_license(prompter: &mut (dyn Prompter + '_)) -> Result<License, AnswerError> {
    let mut items: Vec<String> = License::KNOWN.iter().map(|l| l.name().to_string()).collect();
    items.push("Other".to_string());

    let choice = prompter.select("Select the license for this plugin:", &items, 0)?;
    match License::KNOWN.get(choice) {
        Some(license) => Ok(license.clone()),
        None => {
            let name = prompter.input("License name:", "")?;
            let uri = prompter.input("License URL:", "")?;
            Ok(License::other(name, uri))
        }
    }
}

fn warn_unknown(kind: &str, requested: &[String], vocabulary: &[String]) {
    for name in requested {
        if !vocabulary.contains(name) {
            warn!("{kind} '{name}' is not used by the template tree");
        }
    }
}
