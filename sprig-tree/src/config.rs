//! Project configuration collected before a run.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeStruct};

/// Section enabled whenever the project asks for an admin surface.
pub const ADMIN_SECTION: &str = "admin";

/// Feature flags requested when the user does not choose.
pub const DEFAULT_FEATURES: &[&str] = &["css", "js"];

/// Optional sections requested when the user does not choose.
pub const DEFAULT_SECTIONS: &[&str] = &["activator", "deactivator", "uninstall"];

/// Author information written into file headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name, e.g. "George Burdell"
    pub name: String,
    /// Email address or URL
    pub contact: String,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            name: "George Burdell".to_string(),
            contact: "george.burdell@gmail.com".to_string(),
        }
    }
}

/// License for the generated project.
///
/// Serializes as a `{ name, uri }` table. Deserializes from either a known
/// license name (`"MIT"`) or a `{ name, uri }` table for anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum License {
    #[default]
    Gpl2Plus,
    Gpl3,
    Apache,
    Mit,
    PublicDomain,
    /// A user-supplied license
    Other { name: String, uri: String },
}

impl License {
    /// The fixed set offered to the user, in prompt order.
    pub const KNOWN: [License; 5] = [
        License::Gpl2Plus,
        License::Gpl3,
        License::Apache,
        License::Mit,
        License::PublicDomain,
    ];

    pub fn name(&self) -> &str {
        match self {
            License::Gpl2Plus => "GPLv2+",
            License::Gpl3 => "GPLv3",
            License::Apache => "Apache",
            License::Mit => "MIT",
            License::PublicDomain => "Public Domain",
            License::Other { name, .. } => name,
        }
    }

    pub fn uri(&self) -> &str {
        match self {
            License::Gpl2Plus => "http://www.gnu.org/licenses/gpl-2.0.txt",
            License::Gpl3 => "http://www.gnu.org/licenses/gpl-3.0.txt",
            License::Apache => "http://www.apache.org/licenses/LICENSE-2.0",
            License::Mit => "https://opensource.org/licenses/MIT",
            License::PublicDomain => "http://unlicense.org",
            License::Other { uri, .. } => uri,
        }
    }

    /// Build a user-supplied license.
    pub fn other(name: impl Into<String>, uri: impl Into<String>) -> Self {
        License::Other {
            name: name.into(),
            uri: uri.into(),
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for License {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_' | '.'))
            .collect();
        match key.as_str() {
            "gplv2+" | "gpl2+" | "gpl20+" | "gpl20orlater" | "gplv2" | "gpl2" => {
                Ok(License::Gpl2Plus)
            }
            "gplv3" | "gpl3" | "gpl30" => Ok(License::Gpl3),
            "apache" | "apache2" | "apache20" => Ok(License::Apache),
            "mit" => Ok(License::Mit),
            "publicdomain" | "unlicense" => Ok(License::PublicDomain),
            _ => Err(format!(
                "unknown license '{}', expected one of: GPLv2+, GPLv3, Apache, MIT, Public Domain",
                s
            )),
        }
    }
}

impl Serialize for License {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("License", 2)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("uri", self.uri())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for License {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawLicense {
            Named(String),
            Custom { name: String, uri: String },
        }

        match RawLicense::deserialize(deserializer)? {
            RawLicense::Named(name) => name.parse().map_err(D::Error::custom),
            RawLicense::Custom { name, uri } => Ok(License::Other { name, uri }),
        }
    }
}

/// Answers that parameterize one generator run.
///
/// Built once before derivation and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    /// Project name as supplied, before normalization
    pub name: String,
    /// Starting version (free-form)
    pub version: String,
    pub author: Author,
    /// Project homepage or repository URL
    pub url: String,
    pub license: License,
    /// Requested feature flags, e.g. `css`
    pub features: BTreeSet<String>,
    /// Requested optional sections, e.g. `activator`
    pub sections: BTreeSet<String>,
    /// Whether the project gets its own admin page
    pub admin: bool,
}

impl ProjectConfig {
    /// Create a configuration with the default answers for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: "1.0.0".to_string(),
            author: Author::default(),
            url: "https://github.com/<username>/<repository-name>".to_string(),
            license: License::default(),
            features: DEFAULT_FEATURES.iter().map(|s| s.to_string()).collect(),
            sections: DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect(),
            admin: true,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_author(mut self, name: impl Into<String>, contact: impl Into<String>) -> Self {
        self.author = Author {
            name: name.into(),
            contact: contact.into(),
        };
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_license(mut self, license: License) -> Self {
        self.license = license;
        self
    }

    /// Replace the requested feature flags.
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the requested optional sections.
    pub fn with_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections = sections.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    /// Whether a feature flag was requested.
    pub fn has_feature(&self, flag: &str) -> bool {
        self.features.contains(flag)
    }

    /// Whether an optional section is active. The admin section follows
    /// [`ProjectConfig::admin`] as well as the explicit section set.
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains(section) || (self.admin && section == ADMIN_SECTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProjectConfig::new("My Plugin");
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.license, License::Gpl2Plus);
        assert!(config.has_feature("css"));
        assert!(config.has_feature("js"));
        assert!(config.has_section("activator"));
        assert!(config.has_section(ADMIN_SECTION));
    }

    #[test]
    fn test_admin_drives_admin_section() {
        let config = ProjectConfig::new("x").with_admin(false);
        assert!(!config.has_section(ADMIN_SECTION));

        let config = config.with_sections(["admin"]);
        assert!(config.has_section(ADMIN_SECTION));
    }

    #[test]
    fn test_license_from_str() {
        assert_eq!("MIT".parse::<License>().unwrap(), License::Mit);
        assert_eq!("gplv2+".parse::<License>().unwrap(), License::Gpl2Plus);
        assert_eq!("GPL-3.0".parse::<License>().unwrap(), License::Gpl3);
        assert_eq!("apache-2.0".parse::<License>().unwrap(), License::Apache);
        assert_eq!(
            "Public Domain".parse::<License>().unwrap(),
            License::PublicDomain
        );
        assert!("WTFPL".parse::<License>().is_err());
    }

    #[test]
    fn test_license_names_round_trip() {
        for license in License::KNOWN {
            assert_eq!(license.name().parse::<License>().unwrap(), license);
        }
    }

    #[test]
    fn test_license_serializes_as_table() {
        let json = serde_json::to_value(License::Mit).unwrap();
        assert_eq!(json["name"], "MIT");
        assert_eq!(json["uri"], "https://opensource.org/licenses/MIT");
    }

    #[test]
    fn test_license_deserialize() {
        #[derive(Deserialize)]
        struct Doc {
            license: License,
        }

        let doc: Doc = toml::from_str("license = \"GPLv3\"").unwrap();
        assert_eq!(doc.license, License::Gpl3);

        let doc: Doc =
            toml::from_str("license = { name = \"WTFPL\", uri = \"http://www.wtfpl.net\" }")
                .unwrap();
        assert_eq!(doc.license, License::other("WTFPL", "http://www.wtfpl.net"));

        assert!(toml::from_str::<Doc>("license = \"nope\"").is_err());
    }
}
