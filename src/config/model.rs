// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [paths]
/// temp_dir = "tmp"
/// build_dir = "build"
///
/// [groups]
/// library = ["lib/**/*.js", "espree.js"]
///
/// [bundle]
/// global_name = "espree"
/// ```
///
/// All sections are optional; an empty file (or no file at all) yields the
/// stock project layout.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub paths: PathsSection,

    #[serde(default)]
    pub tools: ToolsSection,

    #[serde(default)]
    pub groups: GroupsSection,

    #[serde(default)]
    pub test: TestSection,

    #[serde(default)]
    pub bundle: BundleSection,
}

/// Validated configuration, anchored at a project root.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`),
/// followed by [`ConfigFile::with_root`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub paths: PathsSection,
    pub tools: ToolsSection,
    pub groups: GroupsSection,
    pub test: TestSection,
    pub bundle: BundleSection,
    root: PathBuf,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            paths: raw.paths,
            tools: raw.tools,
            groups: raw.groups,
            test: raw.test,
            bundle: raw.bundle,
            root: PathBuf::from("."),
        }
    }

    /// Anchor all relative paths at `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Directory every tool runs in and every relative path is joined onto.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a config-relative path. Absolute paths pass through unchanged.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.resolve(&self.paths.temp_dir)
    }

    pub fn build_dir(&self) -> PathBuf {
        self.resolve(&self.paths.build_dir)
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.resolve(&self.paths.docs_dir)
    }

    pub fn readme(&self) -> PathBuf {
        self.resolve(&self.paths.readme)
    }

    /// The four lint groups, in the order `lint` must visit them.
    pub fn lint_groups(&self) -> Vec<FileGroup> {
        vec![
            FileGroup::new(
                "build-script",
                self.groups.build_script.join(" "),
                self.groups.build_script.clone(),
            ),
            FileGroup::new(
                "config",
                "configuration files",
                self.groups.config.clone(),
            ),
            FileGroup::new(
                "library",
                "JavaScript files",
                self.groups.library.clone(),
            ),
            FileGroup::new(
                "tests",
                "JavaScript test files",
                self.groups.tests.clone(),
            ),
        ]
    }
}

/// A named, fixed set of glob patterns handed to the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    /// Stable identifier used in logs.
    pub name: &'static str,
    /// Human-readable label for the progress message.
    pub description: String,
    pub patterns: Vec<String>,
}

impl FileGroup {
    pub fn new(
        name: &'static str,
        description: impl Into<String>,
        patterns: Vec<String>,
    ) -> Self {
        Self {
            name,
            description: description.into(),
            patterns,
        }
    }

    /// Line printed to stdout before the group is linted.
    pub fn progress_message(&self) -> String {
        format!("Validating {}", self.description)
    }
}

/// `[paths]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsSection {
    /// Scratch directory for `browserify`; created and removed on every run.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,

    /// Bundle output directory; persisted between runs.
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// The root README that `docs` copies into `docs_dir`.
    #[serde(default = "default_readme")]
    pub readme: PathBuf,
}

fn default_temp_dir() -> PathBuf {
    PathBuf::from("tmp")
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_readme() -> PathBuf {
    PathBuf::from("README.md")
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            temp_dir: default_temp_dir(),
            build_dir: default_build_dir(),
            docs_dir: default_docs_dir(),
            readme: default_readme(),
        }
    }
}

/// `[tools]` section: which external programs to run.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolsSection {
    /// Directory searched before `PATH` when resolving a program name.
    #[serde(default = "default_bin_dir")]
    pub bin_dir: PathBuf,

    #[serde(default = "default_linter")]
    pub linter: String,

    /// Coverage wrapper; receives the test runner as its first argument.
    #[serde(default = "default_coverage")]
    pub coverage: String,

    #[serde(default = "default_test_runner")]
    pub test_runner: String,

    #[serde(default = "default_bundler")]
    pub bundler: String,
}

fn default_bin_dir() -> PathBuf {
    PathBuf::from("node_modules/.bin")
}

fn default_linter() -> String {
    "eslint".to_string()
}

fn default_coverage() -> String {
    "nyc".to_string()
}

fn default_test_runner() -> String {
    "node_modules/mocha/bin/_mocha".to_string()
}

fn default_bundler() -> String {
    "browserify".to_string()
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            bin_dir: default_bin_dir(),
            linter: default_linter(),
            coverage: default_coverage(),
            test_runner: default_test_runner(),
            bundler: default_bundler(),
        }
    }
}

/// `[groups]` section: the glob patterns each lint group covers.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupsSection {
    #[serde(default = "default_build_script_group")]
    pub build_script: Vec<String>,

    #[serde(default = "default_config_group")]
    pub config: Vec<String>,

    #[serde(default = "default_library_group")]
    pub library: Vec<String>,

    /// Also the pattern the test runner is pointed at.
    #[serde(default = "default_tests_group")]
    pub tests: Vec<String>,
}

fn default_build_script_group() -> Vec<String> {
    vec!["Makefile.js".to_string()]
}

fn default_config_group() -> Vec<String> {
    vec![".eslintrc.js".to_string()]
}

fn default_library_group() -> Vec<String> {
    vec!["lib/**/*.js".to_string(), "espree.js".to_string()]
}

fn default_tests_group() -> Vec<String> {
    vec!["tests/lib/**/*.js".to_string()]
}

impl Default for GroupsSection {
    fn default() -> Self {
        Self {
            build_script: default_build_script_group(),
            config: default_config_group(),
            library: default_library_group(),
            tests: default_tests_group(),
        }
    }
}

/// `[test]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TestSection {
    #[serde(default = "default_reporter")]
    pub reporter: String,

    /// Per-test timeout handed to the test runner (the orchestrator itself
    /// never times out).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_reporter() -> String {
    "progress".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for TestSection {
    fn default() -> Self {
        Self {
            reporter: default_reporter(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// `[bundle]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleSection {
    /// Directory copied recursively into `<temp_dir>/lib`.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Bundler entry file, copied into the temp root.
    #[serde(default = "default_entry")]
    pub entry: PathBuf,

    /// Package manifest, copied next to the entry file.
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// File name of the bundle inside `build_dir`.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Name of the global the bundle exports.
    #[serde(default = "default_global_name")]
    pub global_name: String,

    /// When true, a failing bundler fails the task like lint/test do.
    #[serde(default)]
    pub fail_on_bundler_error: bool,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("lib")
}

fn default_entry() -> PathBuf {
    PathBuf::from("espree.js")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("package.json")
}

fn default_output() -> PathBuf {
    PathBuf::from("espree.js")
}

fn default_global_name() -> String {
    "espree".to_string()
}

impl Default for BundleSection {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            entry: default_entry(),
            manifest: default_manifest(),
            output: default_output(),
            global_name: default_global_name(),
            fail_on_bundler_error: false,
        }
    }
}
