//! `forge.toml` loading.
//!
//! The file lives at the project root. Only the sections the compiler reads
//! are typed; runtime sections (`server`, `tools`, `api`, `observe`, `jobs`)
//! are accepted and ignored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use forge_codegen::EmitContext;
use serde::Deserialize;

/// Name of the configuration file at the project root.
pub const CONFIG_FILE: &str = "forge.toml";

/// Environment variable overriding `database.url`.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no forge.toml found at {}", path.display())]
    NotFound { path: PathBuf },
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
    #[error("{}: `{key}` is required for this command", path.display())]
    Missing { path: PathBuf, key: &'static str },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectSection,
    pub database: DatabaseSection,
    pub paths: PathsSection,
    pub dev: DevSection,
    pub migrate: MigrateSection,
    pub deploy: DeploySection,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    pub name: Option<String>,
    pub module: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    pub resources: String,
    pub internal: String,
    pub generated: String,
    pub migrations: String,
}

impl Default for PathsSection {
    fn default() -> Self {
        PathsSection {
            resources: "resources".to_string(),
            internal: "internal".to_string(),
            generated: "gen".to_string(),
            migrations: "migrations".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DevSection {
    /// Quiet period before a burst of changes triggers a rebuild.
    pub debounce_ms: u64,
}

impl Default for DevSection {
    fn default() -> Self {
        DevSection { debounce_ms: 300 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MigrateSection {
    /// Scratch database the migration engine diffs against.
    pub dev_url: String,
}

impl Default for MigrateSection {
    fn default() -> Self {
        MigrateSection {
            dev_url: "docker://postgres/16/dev".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeploySection {
    /// Program and arguments run by `forge deploy`.
    pub command: Vec<String>,
}

impl Config {
    /// Parse configuration text. `path` is only used in errors.
    pub fn parse(path: &Path, text: &str) -> Result<Config, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Read `<root>/forge.toml` and apply environment overrides.
    pub fn load(root: &Path) -> Result<Config, ConfigError> {
        let path = root.join(CONFIG_FILE);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound { path });
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        let config = Config::parse(&path, &text)?
            .with_database_url(std::env::var(DATABASE_URL_ENV).ok());
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Replace `database.url` when an override is present and non-empty.
    #[must_use]
    pub fn with_database_url(mut self, url: Option<String>) -> Config {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            self.database.url = Some(url);
        }
        self
    }
}

/// A loaded project: root directory plus its configuration.
#[derive(Clone, Debug)]
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Project {
            root: root.into(),
            config,
        }
    }

    pub fn load(root: impl Into<PathBuf>) -> Result<Project, ConfigError> {
        let root = root.into();
        let config = Config::load(&root)?;
        Ok(Project::new(root, config))
    }

    fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    fn missing(&self, key: &'static str) -> ConfigError {
        ConfigError::Missing {
            path: self.config_path(),
            key,
        }
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.resources)
    }

    pub fn internal_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.internal)
    }

    pub fn generated_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.generated)
    }

    pub fn migrations_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.migrations)
    }

    /// Title of API documents: the project name, else the module's last
    /// path segment.
    pub fn title(&self) -> String {
        let project = &self.config.project;
        project
            .name
            .clone()
            .or_else(|| {
                project
                    .module
                    .as_deref()
                    .and_then(|m| m.rsplit('/').next())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "api".to_string())
    }

    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.config
            .database
            .url
            .as_deref()
            .ok_or_else(|| self.missing("database.url"))
    }

    pub fn deploy_command(&self) -> Result<&[String], ConfigError> {
        let command = &self.config.deploy.command;
        if command.is_empty() {
            return Err(self.missing("deploy.command"));
        }
        Ok(command)
    }

    /// Emitter settings. Requires `project.module`.
    pub fn emit_context(&self) -> Result<EmitContext, ConfigError> {
        let module = self
            .config
            .project
            .module
            .as_deref()
            .filter(|m| !m.is_empty())
            .ok_or_else(|| self.missing("project.module"))?;
        let paths = &self.config.paths;
        let mut cx = EmitContext::new(module);
        cx.generated_dir.clone_from(&paths.generated);
        cx.resources_dir.clone_from(&paths.resources);
        cx.migrations_dir.clone_from(&paths.migrations);
        cx.dev_url.clone_from(&self.config.migrate.dev_url);
        Ok(cx)
    }
}
