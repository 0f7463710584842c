use std::path::PathBuf;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, UpdateKind};

/// A running process that can be attached to.
pub struct TargetProcess {
    pid: u32,
    name: String,
    exe: PathBuf,
}

impl TargetProcess {
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exe(&self) -> &std::path::Path {
        &self.exe
    }
}

/// Scan running processes for executables whose file name contains
/// `pattern` (case insensitive). An empty pattern matches everything.
pub fn find_processes(pattern: &str) -> Vec<TargetProcess> {
    let pattern = pattern.to_lowercase();

    let mut sysinfo = sysinfo::System::new();
    sysinfo.refresh_processes_specifics(
        ProcessesToUpdate::All,
        true,
        ProcessRefreshKind::new().with_exe(UpdateKind::Always),
    );

    let mut matched = Vec::new();
    for (pid, proc) in sysinfo.processes() {
        let Some(exe) = proc.exe() else { continue };
        let Some(file_name) = exe.file_name() else {
            continue;
        };
        let file_name = file_name.to_string_lossy();
        if !file_name.to_lowercase().contains(&pattern) {
            continue;
        }

        matched.push(TargetProcess {
            pid: pid.as_u32(),
            name: file_name.into_owned(),
            exe: exe.to_owned(),
        });
    }

    matched.sort_by_key(|process| process.pid);
    matched
}
