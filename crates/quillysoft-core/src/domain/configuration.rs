//! Project configuration aggregate.
//!
//! [`Configuration`] mirrors the `quillysoft-cli.json` file one-to-one. Every
//! field has a built-in default, and `#[serde(default)]` on each section means
//! a partially written file fills the gaps instead of failing.
//!
//! Unknown top-level keys are captured in [`Configuration::extensions`] and
//! written back at the top level on save. Unknown keys inside the fixed
//! sections are ignored.
//!
//! The aggregate is a plain value. It is created per invocation and passed to
//! whoever needs it; there is no process-wide instance.

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{DomainError, Model, Renderable};

/// Name of the configuration file searched for in the working directory and
/// its ancestors.
pub const CONFIG_FILE_NAME: &str = "quillysoft-cli.json";

/// Top-level keys owned by the fixed sections. An extension under one of
/// these names would be written as a duplicate key.
pub const RESERVED_KEYS: [&str; 6] = [
    "schemaVersion",
    "projectInfo",
    "projectPaths",
    "codeGenerationSettings",
    "templateSettings",
    "projectType",
];

/// Root configuration aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// Informational only; never validated.
    pub schema_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_info: ProjectInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub project_paths: ProjectPaths,
    #[serde(deserialize_with = "null_as_default")]
    pub code_generation_settings: CodeGenerationSettings,
    #[serde(deserialize_with = "null_as_default")]
    pub template_settings: TemplateSettings,
    /// Stored verbatim. Use [`Configuration::project_type_kind`] for a typed view.
    pub project_type: String,
    /// Open extension point: every unknown top-level key, in file order.
    #[serde(flatten)]
    pub extensions: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectInfo {
    pub name: String,
    pub namespace: String,
    pub description: String,
    pub author: String,
    pub version: String,
}

/// Filesystem layout of the generated solution.
///
/// Sub-paths are usually relative to `root_path`; absolute sub-paths are kept
/// as they are by [`ProjectPaths::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPaths {
    pub root_path: PathBuf,
    pub domain_path: PathBuf,
    pub application_path: PathBuf,
    pub infrastructure_path: PathBuf,
    pub persistence_path: PathBuf,
    pub web_api_path: PathBuf,
    pub shared_path: PathBuf,
    pub tests_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeGenerationSettings {
    pub default_entity_type: EntityType,
    pub generate_events: bool,
    pub generate_mapping_profiles: bool,
    pub generate_permissions: bool,
    pub generate_tests: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateSettings {
    pub default_template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_templates_path: Option<PathBuf>,
    pub enable_custom_templates: bool,
    /// Template name → name of the template that should be rendered instead.
    #[serde(deserialize_with = "null_as_default")]
    pub template_overrides: BTreeMap<String, String>,
}

/// An explicit `null` reads as the field's default instead of failing the file.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Base type generated entities derive from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntityType {
    Simple,
    Audited,
    #[default]
    FullyAudited,
    BaseEntity,
}

/// Well-known project layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectType {
    #[default]
    CleanArchitecture,
    OnionArchitecture,
    MinimalApi,
    Microservice,
}

// ----------------------------------------------------------------------------
// Defaults
// ----------------------------------------------------------------------------

impl Default for Configuration {
    fn default() -> Self {
        Self {
            schema_version: "1.0".into(),
            project_info: ProjectInfo::default(),
            project_paths: ProjectPaths::default(),
            code_generation_settings: CodeGenerationSettings::default(),
            template_settings: TemplateSettings::default(),
            project_type: ProjectType::default().to_string(),
            extensions: serde_json::Map::new(),
        }
    }
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: "MyProject".into(),
            namespace: "MyProject".into(),
            description: String::new(),
            author: String::new(),
            version: "1.0.0".into(),
        }
    }
}

impl Default for ProjectPaths {
    fn default() -> Self {
        Self::with_root(".")
    }
}

impl Default for CodeGenerationSettings {
    fn default() -> Self {
        Self {
            default_entity_type: EntityType::default(),
            generate_events: true,
            generate_mapping_profiles: true,
            generate_permissions: true,
            generate_tests: true,
        }
    }
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            default_template: "default".into(),
            custom_templates_path: None,
            enable_custom_templates: false,
            template_overrides: BTreeMap::new(),
        }
    }
}

// ----------------------------------------------------------------------------
// Behaviour
// ----------------------------------------------------------------------------

impl Configuration {
    /// Default configuration rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            project_paths: ProjectPaths::with_root(root),
            ..Self::default()
        }
    }

    /// A fully populated example, meant to be shown or written by `init --sample`.
    pub fn sample() -> Self {
        let mut overrides = BTreeMap::new();
        overrides.insert("entity".to_string(), "audited-entity".to_string());

        let mut extensions = serde_json::Map::new();
        extensions.insert(
            "fileHeader".into(),
            serde_json::json!({
                "enabled": true,
                "text": "Copyright (c) Contoso. All rights reserved."
            }),
        );

        Self {
            schema_version: "1.0".into(),
            project_info: ProjectInfo {
                name: "Contoso.Inventory".into(),
                namespace: "Contoso.Inventory".into(),
                description: "Inventory management service".into(),
                author: "Contoso Engineering".into(),
                version: "0.1.0".into(),
            },
            project_paths: ProjectPaths::default(),
            code_generation_settings: CodeGenerationSettings {
                default_entity_type: EntityType::Audited,
                ..CodeGenerationSettings::default()
            },
            template_settings: TemplateSettings {
                default_template: "entity".into(),
                custom_templates_path: Some(PathBuf::from(".quillysoft/templates")),
                enable_custom_templates: true,
                template_overrides: overrides,
            },
            project_type: ProjectType::CleanArchitecture.to_string(),
            extensions,
        }
    }

    /// Extension keys that collide with a fixed section, in map order.
    pub fn reserved_extension_keys(&self) -> Vec<&str> {
        self.extensions
            .keys()
            .map(String::as_str)
            .filter(|key| RESERVED_KEYS.contains(key))
            .collect()
    }

    /// Typed view of [`Configuration::project_type`].
    pub fn project_type_kind(&self) -> Result<ProjectType, DomainError> {
        self.project_type.parse()
    }

    /// Look up a setting by dotted camelCase path, e.g. `projectInfo.name`.
    pub fn lookup(&self, key: &str) -> Result<serde_json::Value, DomainError> {
        let not_found = || DomainError::UnknownSetting { key: key.into() };
        let root = serde_json::to_value(self).map_err(|_| not_found())?;

        key.split('.')
            .try_fold(&root, |node, segment| node.get(segment))
            .cloned()
            .ok_or_else(not_found)
    }
}

impl ProjectPaths {
    /// Default sub-paths under the given root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root.into(),
            domain_path: "src/Domain".into(),
            application_path: "src/Application".into(),
            infrastructure_path: "src/Infrastructure".into(),
            persistence_path: "src/Persistence".into(),
            web_api_path: "src/WebApi".into(),
            shared_path: "src/Shared".into(),
            tests_path: "tests".into(),
        }
    }

    /// Join a sub-path onto the root. Absolute sub-paths win.
    pub fn resolve(&self, sub_path: impl AsRef<Path>) -> PathBuf {
        self.root_path.join(sub_path)
    }

    /// Named sub-paths in declaration order (root excluded).
    pub fn sub_paths(&self) -> [(&'static str, &Path); 7] {
        [
            ("DomainPath", self.domain_path.as_path()),
            ("ApplicationPath", self.application_path.as_path()),
            ("InfrastructurePath", self.infrastructure_path.as_path()),
            ("PersistencePath", self.persistence_path.as_path()),
            ("WebApiPath", self.web_api_path.as_path()),
            ("SharedPath", self.shared_path.as_path()),
            ("TestsPath", self.tests_path.as_path()),
        ]
    }
}

/// Config-derived fields every generated file can use.
impl Renderable for Configuration {
    fn to_model(&self) -> Model {
        let info = &self.project_info;
        let paths = &self.project_paths;
        let codegen = &self.code_generation_settings;

        let mut model = Model::new()
            .with("ProjectName", &info.name)
            .with("Namespace", &info.namespace)
            .with("Description", &info.description)
            .with("Author", &info.author)
            .with("Version", &info.version)
            .with("ProjectType", &self.project_type)
            .with("RootPath", paths.root_path.display().to_string());

        for (name, path) in paths.sub_paths() {
            model.set(name, path.display().to_string());
        }

        model
            .with("DefaultEntityType", codegen.default_entity_type.to_string())
            .with("GenerateEvents", codegen.generate_events)
            .with("GenerateMappingProfiles", codegen.generate_mapping_profiles)
            .with("GeneratePermissions", codegen.generate_permissions)
            .with("GenerateTests", codegen.generate_tests)
    }
}

// ----------------------------------------------------------------------------
// Enum conversions
// ----------------------------------------------------------------------------

impl EntityType {
    pub const ALL: [EntityType; 4] = [
        Self::Simple,
        Self::Audited,
        Self::FullyAudited,
        Self::BaseEntity,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Audited => "Audited",
            Self::FullyAudited => "FullyAudited",
            Self::BaseEntity => "BaseEntity",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownEntityType(s.to_string()))
    }
}

impl ProjectType {
    pub const ALL: [ProjectType; 4] = [
        Self::CleanArchitecture,
        Self::OnionArchitecture,
        Self::MinimalApi,
        Self::Microservice,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CleanArchitecture => "CleanArchitecture",
            Self::OnionArchitecture => "OnionArchitecture",
            Self::MinimalApi => "MinimalApi",
            Self::Microservice => "Microservice",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownProjectType(s.to_string()))
    }
}
