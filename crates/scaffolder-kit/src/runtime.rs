//! JavaScript package manager and git identity detection

use std::fmt;
use std::process::Command;
use tokio::process::Command as TokioCommand;

/// Package managers in order of preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Bun,
    Pnpm,
    Npm,
}

impl PackageManager {
    pub const ALL: [PackageManager; 3] = [
        PackageManager::Bun,
        PackageManager::Pnpm,
        PackageManager::Npm,
    ];

    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Bun => "bun",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Npm => "npm",
        }
    }

    pub fn install_command(&self) -> String {
        format!("{} install", self.command())
    }

    /// Command that runs a package.json script
    pub fn run_command(&self, script: &str) -> String {
        format!("{} run {}", self.command(), script)
    }

    /// Installed version, if the tool is on PATH
    pub fn version(&self) -> Option<String> {
        Command::new(self.command())
            .arg("--version")
            .output()
            .ok()
            .filter(|output| output.status.success())
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    pub fn is_available(&self) -> bool {
        self.version().is_some()
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

/// Detect the preferred available package manager
pub fn detect_package_manager() -> PackageManager {
    PackageManager::ALL
        .into_iter()
        .find(PackageManager::is_available)
        // Default to npm if nothing detected (the next steps still make sense)
        .unwrap_or(PackageManager::Npm)
}

/// `git config user.name`, if git is installed and the name is set
pub async fn git_user_name() -> Option<String> {
    let output = TokioCommand::new("git")
        .args(["config", "--get", "user.name"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }
    let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!name.is_empty()).then_some(name)
}
