//! Rendering templates against the project context.
//!
//! Templates are handlebars files rendered in strict mode without HTML
//! escaping: `{{name.symbol}}`, `{{#if admin}}...{{/if}}`,
//! `{{#each features}}{{this}}{{/each}}`. A reference to a missing value is
//! an error, never an empty string.

use std::{
    collections::BTreeSet,
    io,
    path::{Path, PathBuf},
};

use handlebars::Handlebars;
use serde::Serialize;
use sprig_core::{File, IdentifierForms, Overwrite, WriteResult};
use sprig_tree::{License, ProjectConfig};
use thiserror::Error;

/// Values available to templates.
///
/// ```text
/// name.title  name.file  name.symbol  name.snake
/// version  url  admin  features  sections
/// author.name  author.contact  license.name  license.uri
/// ```
///
/// The names used by the WordPress boilerplate bundle are served too:
/// `pluginName.titleCase`, `pluginName.fileCase`, `pluginName.snakeCase`,
/// `pluginName.classCase`, `author.uri`, `langResources`,
/// `installRequirements` and `needAdmin`.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    name: &'a IdentifierForms,
    #[serde(rename = "pluginName")]
    plugin_name: BoilerplateName<'a>,
    version: &'a str,
    author: AuthorValues<'a>,
    url: &'a str,
    license: &'a License,
    features: &'a BTreeSet<String>,
    sections: &'a BTreeSet<String>,
    admin: bool,
    #[serde(rename = "langResources")]
    lang_resources: &'a BTreeSet<String>,
    #[serde(rename = "installRequirements")]
    install_requirements: &'a BTreeSet<String>,
    #[serde(rename = "needAdmin")]
    need_admin: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct BoilerplateName<'a> {
    title_case: &'a str,
    file_case: &'a str,
    snake_case: &'a str,
    class_case: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct AuthorValues<'a> {
    name: &'a str,
    contact: &'a str,
    uri: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(forms: &'a IdentifierForms, config: &'a ProjectConfig) -> Self {
        Self {
            name: forms,
            plugin_name: BoilerplateName {
                title_case: forms.title(),
                file_case: forms.file(),
                snake_case: forms.snake(),
                class_case: forms.symbol(),
            },
            version: &config.version,
            author: AuthorValues {
                name: &config.author.name,
                contact: &config.author.contact,
                uri: &config.author.contact,
            },
            url: &config.url,
            license: &config.license,
            features: &config.features,
            sections: &config.sections,
            admin: config.admin,
            lang_resources: &config.features,
            install_requirements: &config.sections,
            need_admin: config.admin,
        }
    }
}

/// Failure to render or write one manifest entry.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read template '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to render template '{path}'")]
    Template {
        path: PathBuf,
        #[source]
        source: handlebars::RenderError,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Renders one template file to its destination.
pub trait Renderer {
    fn render_and_write(
        &self,
        template: &Path,
        output: &Path,
        ctx: &RenderContext<'_>,
    ) -> Result<WriteResult, RenderError>;
}

/// Reads templates from disk, renders them and writes the result.
///
/// Files that are not valid UTF-8 are copied byte for byte.
pub struct TemplateRenderer {
    overwrite: Overwrite,
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new(overwrite: Overwrite) -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        Self {
            overwrite,
            registry,
        }
    }

    /// Render template text against `ctx`.
    pub fn render_str(
        &self,
        text: &str,
        ctx: &RenderContext<'_>,
    ) -> Result<String, handlebars::RenderError> {
        self.registry.render_template(text, ctx)
    }

    fn write(&self, output: &Path, content: Vec<u8>) -> Result<WriteResult, RenderError> {
        File::new(output, content)
            .with_overwrite(self.overwrite)
            .write()
            .map_err(|e| RenderError::Write {
                path: output.to_path_buf(),
                source: e.into(),
            })
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new(Overwrite::default())
    }
}

impl Renderer for TemplateRenderer {
    fn render_and_write(
        &self,
        template: &Path,
        output: &Path,
        ctx: &RenderContext<'_>,
    ) -> Result<WriteResult, RenderError> {
        let bytes = std::fs::read(template).map_err(|source| RenderError::Read {
            path: template.to_path_buf(),
            source,
        })?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => return self.write(output, e.into_bytes()),
        };

        let rendered = self
            .render_str(&text, ctx)
            .map_err(|source| RenderError::Template {
                path: template.to_path_buf(),
                source,
            })?;
        self.write(output, rendered.into_bytes())
    }
}
