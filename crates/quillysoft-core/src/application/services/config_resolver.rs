//! Configuration Resolver - locate, load, auto-detect and persist configuration.
//!
//! # Resolution order
//!
//! 1. An explicit path (`--config FILE`), if that file exists.
//! 2. `quillysoft-cli.json` in the working directory, then in each ancestor
//!    up to the filesystem root. The first one found wins.
//! 3. Built-in defaults, with `rootPath` auto-detected.
//!
//! Loading is **fail-soft**: an unreadable or malformed file is logged at
//! `WARN` and replaced by defaults. Saving is not; write failures are returned.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{CONFIG_FILE_NAME, Configuration, ProjectPaths},
    error::{QuillysoftError, QuillysoftResult},
};

/// Directory entries that mark a repository root.
const REPOSITORY_MARKERS: &[&str] = &[".git", ".hg", ".svn"];

/// File extension of solution / workspace files that also mark a root.
const SOLUTION_EXTENSION: &str = "sln";

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// A configuration plus its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfiguration {
    pub configuration: Configuration,
    pub source: ConfigSource,
}

/// Loads and saves [`Configuration`] through a [`Filesystem`] port.
pub struct ConfigResolver {
    fs: Box<dyn Filesystem>,
}

impl ConfigResolver {
    pub fn new(fs: Box<dyn Filesystem>) -> Self {
        Self { fs }
    }

    /// Load the configuration. Never fails.
    pub fn load(&self, explicit_path: Option<&Path>) -> Configuration {
        self.load_with_source(explicit_path).configuration
    }

    /// Like [`ConfigResolver::load`], also reporting which file was used.
    #[instrument(skip(self))]
    pub fn load_with_source(&self, explicit_path: Option<&Path>) -> LoadedConfiguration {
        let Some(path) = self.locate(explicit_path) else {
            debug!("no configuration file found, using defaults");
            return self.defaults();
        };

        match self.read(&path) {
            Ok(configuration) => {
                info!(path = %path.display(), "configuration loaded");
                LoadedConfiguration {
                    configuration,
                    source: ConfigSource::File(path),
                }
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "ignoring invalid configuration file, using defaults"
                );
                self.defaults()
            }
        }
    }

    /// Find the configuration file to load, if any.
    pub fn locate(&self, explicit_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit_path {
            if self.fs.exists(path) {
                return Some(path.to_path_buf());
            }
            debug!(path = %path.display(), "explicit configuration missing, searching upward");
        }

        let cwd = match self.fs.current_dir() {
            Ok(cwd) => cwd,
            Err(e) => {
                warn!(error = %e, "cannot determine working directory");
                return None;
            }
        };

        cwd.ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .inspect(|candidate| debug!(path = %candidate.display(), "checking"))
            .find(|candidate| self.fs.exists(candidate))
    }

    /// Default project paths with `root_path` auto-detected.
    ///
    /// Walks up from the working directory looking for a version-control
    /// directory or a solution file. Falls back to the working directory, and
    /// to `.` if even that is unavailable.
    pub fn auto_detect_paths(&self) -> ProjectPaths {
        let Ok(cwd) = self.fs.current_dir() else {
            return ProjectPaths::default();
        };

        let root = cwd
            .ancestors()
            .find(|dir| self.is_repository_root(dir))
            .map(Path::to_path_buf)
            .unwrap_or_else(|| {
                debug!("no repository marker found, using working directory as root");
                cwd.clone()
            });

        debug!(root = %root.display(), "detected project root");
        ProjectPaths::with_root(root)
    }

    /// Write `configuration` as pretty JSON to `path`, or to
    /// `quillysoft-cli.json` in the working directory when omitted.
    /// Overwrites unconditionally.
    ///
    /// Extensions named like a fixed section are rejected; they would be
    /// written as duplicate keys and make the file unreadable.
    #[instrument(skip(self, configuration))]
    pub fn save(
        &self,
        configuration: &Configuration,
        path: Option<&Path>,
    ) -> QuillysoftResult<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => self.fs.current_dir()?.join(CONFIG_FILE_NAME),
        };

        let reserved = configuration.reserved_extension_keys();
        if !reserved.is_empty() {
            return Err(ApplicationError::ConfigSerialization {
                reason: format!(
                    "extension keys clash with built-in sections: {}",
                    reserved.join(", ")
                ),
            }
            .into());
        }

        let mut json = serde_json::to_string_pretty(configuration).map_err(|e| {
            ApplicationError::ConfigSerialization {
                reason: e.to_string(),
            }
        })?;
        json.push('\n');

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs.create_dir_all(parent)?;
        }
        self.fs.write_file(&path, &json)?;

        info!(path = %path.display(), "configuration saved");
        Ok(path)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn defaults(&self) -> LoadedConfiguration {
        LoadedConfiguration {
            configuration: Configuration {
                project_paths: self.auto_detect_paths(),
                ..Configuration::default()
            },
            source: ConfigSource::Defaults,
        }
    }

    fn read(&self, path: &Path) -> QuillysoftResult<Configuration> {
        let text = self.fs.read_to_string(path)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
        serde_json::from_str(text).map_err(|e| QuillysoftError::Configuration {
            message: format!("{}: {e}", path.display()),
        })
    }

    fn is_repository_root(&self, dir: &Path) -> bool {
        if REPOSITORY_MARKERS
            .iter()
            .any(|marker| self.fs.exists(&dir.join(marker)))
        {
            return true;
        }

        self.fs
            .list_dir(dir)
            .map(|entries| {
                entries
                    .iter()
                    .any(|e| e.extension().is_some_and(|ext| ext == SOLUTION_EXTENSION))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;

    fn fs_at(cwd: &'static str) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_current_dir()
            .returning(move || Ok(PathBuf::from(cwd)));
        fs.expect_list_dir().returning(|_| Ok(vec![]));
        fs
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let mut fs = fs_at("/work/app");
        fs.expect_exists()
            .returning(|p| p == Path::new("/work/app/quillysoft-cli.json"));
        fs.expect_read_to_string().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });

        let loaded = ConfigResolver::new(Box::new(fs)).load_with_source(None);

        assert_eq!(loaded.source, ConfigSource::Defaults);
        assert_eq!(
            loaded.configuration.project_paths.root_path,
            PathBuf::from("/work/app")
        );
    }

    #[test]
    fn explicit_path_wins_over_search() {
        let mut fs = fs_at("/work");
        fs.expect_exists().returning(|_| true);
        fs.expect_read_to_string()
            .returning(|_| Ok(r#"{ "projectInfo": { "name": "Explicit" } }"#.into()));

        let loaded = ConfigResolver::new(Box::new(fs))
            .load_with_source(Some(Path::new("/custom/settings.json")));

        assert_eq!(
            loaded.source,
            ConfigSource::File(PathBuf::from("/custom/settings.json"))
        );
        assert_eq!(loaded.configuration.project_info.name, "Explicit");
    }

    #[test]
    fn missing_working_directory_still_yields_defaults() {
        let mut fs = MockFilesystem::new();
        fs.expect_current_dir().returning(|| {
            Err(QuillysoftError::Internal {
                message: "gone".into(),
            })
        });

        let cfg = ConfigResolver::new(Box::new(fs)).load(None);
        assert_eq!(cfg.project_paths, ProjectPaths::default());
    }

    #[test]
    fn solution_file_marks_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_current_dir()
            .returning(|| Ok(PathBuf::from("/repo/src/Api")));
        fs.expect_exists().returning(|_| false);
        fs.expect_list_dir().returning(|dir| {
            if dir == Path::new("/repo") {
                Ok(vec![PathBuf::from("/repo/Shop.sln")])
            } else {
                Ok(vec![])
            }
        });

        let paths = ConfigResolver::new(Box::new(fs)).auto_detect_paths();
        assert_eq!(paths.root_path, PathBuf::from("/repo"));
    }

    #[test]
    fn save_creates_parent_and_writes_json() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all()
            .withf(|p| p == Path::new("out/cfg"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|p, content| {
                p == Path::new("out/cfg/quillysoft-cli.json")
                    && content.contains("\"projectInfo\"")
                    && content.ends_with('\n')
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let written = ConfigResolver::new(Box::new(fs))
            .save(
                &Configuration::default(),
                Some(Path::new("out/cfg/quillysoft-cli.json")),
            )
            .unwrap();
        assert_eq!(written, PathBuf::from("out/cfg/quillysoft-cli.json"));
    }

    #[test]
    fn save_defaults_to_working_directory_file_name() {
        let mut fs = fs_at("/work");
        fs.expect_create_dir_all()
            .withf(|p| p == Path::new("/work"))
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|p, _| p == Path::new("/work/quillysoft-cli.json"))
            .times(1)
            .returning(|_, _| Ok(()));

        let written = ConfigResolver::new(Box::new(fs))
            .save(&Configuration::default(), None)
            .unwrap();
        assert_eq!(written, PathBuf::from("/work/quillysoft-cli.json"));
    }

    #[test]
    fn save_rejects_extension_named_like_a_section() {
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().never();

        let mut config = Configuration::default();
        config
            .extensions
            .insert("projectInfo".into(), serde_json::json!("shadow"));

        let err = ConfigResolver::new(Box::new(fs))
            .save(&config, Some(Path::new("cfg.json")))
            .unwrap_err();
        assert!(matches!(
            err,
            QuillysoftError::Application(ApplicationError::ConfigSerialization { .. })
        ));
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let mut fs = fs_at("/work");
        fs.expect_exists()
            .returning(|p| p == Path::new("/work/quillysoft-cli.json"));
        fs.expect_read_to_string()
            .returning(|_| Ok("\u{feff}{ \"projectInfo\": { \"name\": \"Bom\" } }".into()));

        let loaded = ConfigResolver::new(Box::new(fs)).load_with_source(None);
        assert_eq!(loaded.configuration.project_info.name, "Bom");
    }
}
