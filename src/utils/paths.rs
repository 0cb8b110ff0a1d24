use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tokio::fs;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::error::{DiscoveryError, Result};
use crate::utils::{Environment, Platform};

// Maximum size for descriptor files: 10MB
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Path of the apps directory relative to the installer's data root
const TOOLBOX_APPS: [&str; 3] = ["JetBrains", "Toolbox", "apps"];

// Characters that are not allowed verbatim in a file URI path
const URI_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Computes where Toolbox keeps its managed applications, without touching the filesystem
///
/// - Windows: `%LOCALAPPDATA%\JetBrains\Toolbox\apps` (falls back to `<home>\AppData\Local`)
/// - macOS: `~/Library/Application Support/JetBrains/Toolbox/apps`
/// - Linux: `$XDG_DATA_HOME/JetBrains/Toolbox/apps` (falls back to `~/.local/share`)
///
/// # Errors
///
/// Returns [`DiscoveryError::EnvironmentUnresolved`] if neither the platform's data
/// directory variable nor the home directory is known.
pub fn apps_root_candidate(platform: Platform, env: &Environment) -> Result<PathBuf> {
    let base = match platform {
        Platform::Windows => match &env.local_app_data {
            Some(local) => local.clone(),
            None => env.home()?.join("AppData").join("Local"),
        },
        Platform::MacOS => env.home()?.join("Library").join("Application Support"),
        Platform::Linux => match &env.xdg_data_home {
            Some(data) => data.clone(),
            None => env.home()?.join(".local").join("share"),
        },
    };

    Ok(TOOLBOX_APPS.iter().fold(base, |path, segment| path.join(segment)))
}

/// Resolves the Toolbox apps root and checks that it exists
///
/// # Errors
///
/// - [`DiscoveryError::EnvironmentUnresolved`] if no home/app-data variable is set
/// - [`DiscoveryError::PathNotFound`] if the computed directory does not exist
pub async fn resolve_apps_root(platform: Platform, env: &Environment) -> Result<PathBuf> {
    let root = apps_root_candidate(platform, env)?;
    ensure_dir(&root).await?;
    debug!(path = %root.display(), %platform, "resolved Toolbox apps root");
    Ok(root)
}

/// Fails with [`DiscoveryError::PathNotFound`] unless `path` is an existing directory
pub async fn ensure_dir(path: &Path) -> Result<()> {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(DiscoveryError::PathNotFound(path.to_path_buf())),
    }
}

/// Substitutes `$HOME`, `$APPDATA` and `$LOCALAPPDATA` in a Toolbox config directory template
///
/// # Errors
///
/// Returns [`DiscoveryError::TemplateUnresolved`] if the template references a
/// variable that is not set. This is a per-app failure, unlike an unresolvable
/// apps root.
pub fn expand_config_template(template: &str, env: &Environment) -> Result<PathBuf> {
    let unresolved = |e: DiscoveryError| e.in_template(template);
    let mut expanded = template.to_string();

    // $LOCALAPPDATA first so its value is never scanned for the shorter tokens
    if expanded.contains("$LOCALAPPDATA") {
        let local = env.local_app_data().map_err(unresolved)?.to_string_lossy().into_owned();
        expanded = expanded.replace("$LOCALAPPDATA", &local);
    }
    if expanded.contains("$APPDATA") {
        let app_data = env.app_data().map_err(unresolved)?.to_string_lossy().into_owned();
        expanded = expanded.replace("$APPDATA", &app_data);
    }
    if expanded.contains("$HOME") {
        let home = env.home().map_err(unresolved)?.to_string_lossy().into_owned();
        expanded = expanded.replace("$HOME", &home);
    }

    Ok(PathBuf::from(expanded))
}

/// Derives a project display name from its path
///
/// Splits on both `/` and `\` since descriptors may use either convention, then
/// upper-cases the first character of the last segment.
///
/// # Examples
///
/// ```
/// use quickjet::project_name_from_path;
///
/// assert_eq!(project_name_from_path(r"C:\Users\me\Projects\myApp"), "MyApp");
/// assert_eq!(project_name_from_path("/home/me/projects/my-app"), "My-app");
/// ```
pub fn project_name_from_path(raw: &str) -> String {
    let trimmed = raw.trim_end_matches(['/', '\\']);
    let segment = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);

    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Wraps a filesystem path in a `file://` URI
///
/// Backslashes become forward slashes, drive-letter paths gain a leading `/`,
/// and URI-unsafe characters are percent-encoded.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use quickjet::file_uri;
///
/// let icon = Path::new("/Users/me/Library/Application Support/idea.svg");
/// assert_eq!(file_uri(icon), "file:///Users/me/Library/Application%20Support/idea.svg");
/// ```
pub fn file_uri(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let rooted =
        if normalized.starts_with('/') { normalized } else { format!("/{}", normalized) };
    format!("file://{}", utf8_percent_encode(&rooted, URI_ENCODE_SET))
}

/// Formats a path with ~ substitution for the home directory
pub fn format_path_with_tilde(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home
        && let Ok(rest) = path.strip_prefix(home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", rest.display());
    }

    // Avoid double allocation when converting Cow to String
    match path.to_string_lossy() {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

/// Validates that a descriptor's size is within acceptable limits (10MB)
///
/// # Errors
///
/// Returns an [`io::ErrorKind::InvalidData`] error if the file is larger than 10MB.
pub fn validate_file_size(len: u64, path: &Path) -> io::Result<()> {
    if len > MAX_FILE_SIZE_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "file too large: {} ({} bytes, max {} bytes)",
                path.display(),
                len,
                MAX_FILE_SIZE_BYTES
            ),
        ));
    }
    Ok(())
}

/// Reads a descriptor file as UTF-8, enforcing the size limit on the open handle
pub(crate) async fn read_descriptor(path: &Path) -> io::Result<String> {
    let mut file = fs::File::open(path).await?;
    let len = file.metadata().await?.len();
    validate_file_size(len, path)?;

    let mut content = String::with_capacity(len as usize);
    file.read_to_string(&mut content).await?;
    Ok(content)
}
