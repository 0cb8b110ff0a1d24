//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use quickjet::{DiscoveryConfig, Environment, Platform};
use tempfile::TempDir;

/// Builder for a fake home directory holding a Toolbox apps root, IDE config
/// directories and project directories
///
/// Layout:
/// - `<home>/apps/<App>/ch-0/.history.json`
/// - `<home>/config/<App>/options/recentProjects.xml`
/// - `<home>/<project paths>`
pub struct ToolboxDirBuilder {
    temp_dir: TempDir,
}

impl ToolboxDirBuilder {
    /// Create a new builder with an empty apps root
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join("apps")).expect("Failed to create apps root");
        Self { temp_dir }
    }

    pub fn home(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Install an app described by `app`
    pub fn with_app(self, app: AppBuilder) -> Self {
        app.create_in(self.temp_dir.path());
        self
    }

    /// Create a project directory relative to the home directory
    pub fn with_project_dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.temp_dir.path().join(relative))
            .expect("Failed to create project dir");
        self
    }

    /// Put a plain file into the apps root
    pub fn with_apps_root_file(self, name: &str) -> Self {
        fs::write(self.temp_dir.path().join("apps").join(name), "not an app")
            .expect("Failed to write file");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ToolboxDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

enum HistoryContent {
    Generated,
    Raw(String),
    Missing,
}

enum DescriptorContent {
    Projects,
    NoRecentProjects,
    Raw(String),
    Missing,
}

/// Builder for one installed app
pub struct AppBuilder {
    dir_name: String,
    display_name: String,
    shell_script: String,
    history: HistoryContent,
    earlier_installs: usize,
    legacy_installs: usize,
    descriptor: DescriptorContent,
    descriptor_file: String,
    projects: Vec<(String, i64)>,
}

impl AppBuilder {
    /// Create an app with the given Toolbox directory name and no projects
    pub fn new(dir_name: &str) -> Self {
        Self {
            dir_name: dir_name.to_string(),
            display_name: dir_name.to_string(),
            shell_script: "idea".to_string(),
            history: HistoryContent::Generated,
            earlier_installs: 0,
            legacy_installs: 0,
            descriptor: DescriptorContent::Projects,
            descriptor_file: "recentProjects.xml".to_string(),
            projects: Vec::new(),
        }
    }

    pub fn display_name(mut self, name: &str) -> Self {
        self.display_name = name.to_string();
        self
    }

    pub fn shell_script(mut self, name: &str) -> Self {
        self.shell_script = name.to_string();
        self
    }

    /// Record a recent project; `key` may use `$USER_HOME$`
    pub fn project(mut self, key: &str, timestamp: i64) -> Self {
        self.projects.push((key.to_string(), timestamp));
        self
    }

    /// Prepend older install records that point at a different config directory
    pub fn earlier_installs(mut self, count: usize) -> Self {
        self.earlier_installs = count;
        self
    }

    /// Prepend older install records written before `intellij_platform` existed
    pub fn legacy_installs(mut self, count: usize) -> Self {
        self.legacy_installs = count;
        self
    }

    /// Write the descriptor the way a fresh IDE does: no projects map at all
    pub fn no_recent_projects(mut self) -> Self {
        self.descriptor = DescriptorContent::NoRecentProjects;
        self
    }

    pub fn raw_history(mut self, content: &str) -> Self {
        self.history = HistoryContent::Raw(content.to_string());
        self
    }

    pub fn without_history(mut self) -> Self {
        self.history = HistoryContent::Missing;
        self
    }

    pub fn raw_descriptor(mut self, content: &str) -> Self {
        self.descriptor = DescriptorContent::Raw(content.to_string());
        self
    }

    pub fn without_descriptor(mut self) -> Self {
        self.descriptor = DescriptorContent::Missing;
        self
    }

    pub fn descriptor_file(mut self, filename: &str) -> Self {
        self.descriptor_file = filename.to_string();
        self
    }

    /// Where the active install's binaries live
    pub fn system_app_path(&self) -> PathBuf {
        PathBuf::from(format!("/opt/toolbox/{}/current", self.dir_name))
    }

    fn install_record(&self, config_dir: &str) -> String {
        format!(
            r#"{{"timestamp":"2024-05-01T10:00:00Z","item":{{"id":"{id}","name":"{name}","system-app-path":"{app_path}","package":{{"command":"bin/{shell}64.exe"}},"intellij_platform":{{"shell_script_name":"{shell}","default_config_directories":{{"idea.config.path":"{config}"}}}}}}}}"#,
            id = self.dir_name,
            name = self.display_name,
            app_path = self.system_app_path().display(),
            shell = self.shell_script,
            config = config_dir,
        )
    }

    /// Convert to `.history.json` content
    pub fn history_json(&self) -> String {
        let mut records: Vec<String> = (0..self.legacy_installs)
            .map(|i| {
                format!(
                    r#"{{"item":{{"name":"{} (legacy {})","system-app-path":"/opt/toolbox/{}/legacy"}}}}"#,
                    self.display_name, i, self.dir_name
                )
            })
            .collect();
        records.extend(
            (0..self.earlier_installs)
                .map(|i| self.install_record(&format!("$HOME/config/{}-old{}", self.dir_name, i))),
        );
        records.push(self.install_record(&format!("$HOME/config/{}", self.dir_name)));
        format!(r#"{{"history":[{}]}}"#, records.join(","))
    }

    /// Convert to recent-projects XML content
    pub fn descriptor_xml(&self) -> String {
        match &self.descriptor {
            DescriptorContent::Projects => recent_projects_xml(&self.projects),
            DescriptorContent::NoRecentProjects => r#"<application>
  <component name="RecentProjectsManager">
    <option name="lastOpenedProject" />
  </component>
</application>"#
                .to_string(),
            DescriptorContent::Raw(content) => content.clone(),
            DescriptorContent::Missing => String::new(),
        }
    }

    pub fn create_in(&self, home: &Path) {
        let install_dir = home.join("apps").join(&self.dir_name).join("ch-0");
        fs::create_dir_all(&install_dir).expect("Failed to create install dir");

        match &self.history {
            HistoryContent::Generated => {
                fs::write(install_dir.join(".history.json"), self.history_json())
                    .expect("Failed to write history");
            }
            HistoryContent::Raw(content) => {
                fs::write(install_dir.join(".history.json"), content)
                    .expect("Failed to write history");
            }
            HistoryContent::Missing => {}
        }

        let options = home.join("config").join(&self.dir_name).join("options");
        fs::create_dir_all(&options).expect("Failed to create options dir");
        if !matches!(self.descriptor, DescriptorContent::Missing) {
            fs::write(options.join(&self.descriptor_file), self.descriptor_xml())
                .expect("Failed to write descriptor");
        }
    }
}

/// A recent-projects descriptor with one entry per `(key, timestamp)`
pub fn recent_projects_xml(projects: &[(String, i64)]) -> String {
    let entries: String = projects
        .iter()
        .map(|(key, timestamp)| {
            format!(
                r#"
        <entry key="{key}">
          <value>
            <RecentProjectMetaInfo frameTitle="{key}" opened="false">
              <option name="binFolder" value="$APPLICATION_HOME_DIR$/bin" />
              <option name="build" value="IU-241.15989.150" />
              <option name="buildTimestamp" value="1715000000000" />
              <option name="productionCode" value="IU" />
              <option name="projectOpenTimestamp" value="{timestamp}" />
            </RecentProjectMetaInfo>
          </value>
        </entry>"#
            )
        })
        .collect();

    format!(
        r#"<application>
  <component name="RecentProjectsManager">
    <option name="additionalInfo">
      <map>{entries}
      </map>
    </option>
    <option name="lastProjectLocation" value="$USER_HOME$/IdeaProjects" />
  </component>
</application>"#
    )
}

/// Linux-layout configuration rooted at a test home directory
pub fn config_for(home: &Path) -> DiscoveryConfig {
    DiscoveryConfig::new(Platform::Linux, Environment::with_home(home))
        .with_apps_root(home.join("apps"))
}

/// Two apps with three live projects and one vanished project
pub fn realistic_toolbox_dir() -> TempDir {
    ToolboxDirBuilder::new()
        .with_project_dir("IdeaProjects/api")
        .with_project_dir("IdeaProjects/web-client")
        .with_project_dir("PycharmProjects/etl")
        .with_app(
            AppBuilder::new("IDEA-U")
                .display_name("IntelliJ IDEA Ultimate")
                .project("$USER_HOME$/IdeaProjects/api", 3000)
                .project("$USER_HOME$/IdeaProjects/web-client", 1000)
                .project("$USER_HOME$/IdeaProjects/deleted", 5000),
        )
        .with_app(
            AppBuilder::new("PyCharm-P")
                .display_name("PyCharm Professional")
                .shell_script("pycharm")
                .project("$USER_HOME$/PycharmProjects/etl", 2000),
        )
        .build()
}
