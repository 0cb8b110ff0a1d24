use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;

use crate::error::{DiscoveryError, Result};
use crate::host::Launcher;

/// Spawns the IDE as an independent process that outlives the caller
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedLauncher;

impl Launcher for DetachedLauncher {
    fn launch(&self, exec: &Path, project: &Path) -> Result<()> {
        let mut command = Command::new(exec);
        command.arg(project).stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
        detach(&mut command);

        let child = command.spawn().map_err(|source| DiscoveryError::LaunchFailed {
            exec: exec.to_path_buf(),
            source,
        })?;

        info!(pid = child.id(), exec = %exec.display(), project = %project.display(), "launched project");
        Ok(())
    }
}

#[cfg(unix)]
fn detach(command: &mut Command) {
    use std::io;
    use std::os::unix::process::CommandExt;

    // SAFETY: setsid is async-signal-safe and only touches the forked child
    unsafe {
        command.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        });
    }
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    use std::os::windows::process::CommandExt;

    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

    command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_command: &mut Command) {}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_launch_missing_binary_fails() {
        let exec = PathBuf::from("/definitely/not/an/ide/idea.sh");
        let err = DetachedLauncher.launch(&exec, Path::new("/tmp")).unwrap_err();

        assert!(matches!(err, DiscoveryError::LaunchFailed { ref exec, .. } if exec.ends_with("idea.sh")));
        assert!(!err.is_root_level());
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_detached_process() {
        assert!(DetachedLauncher.launch(Path::new("true"), Path::new("/tmp")).is_ok());
    }
}
