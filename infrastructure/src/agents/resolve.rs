//! Executable discovery for agent CLIs

use std::path::{Path, PathBuf};
use tracing::debug;

/// Locate the executable for an agent CLI.
///
/// Order: the configured command (with `~/` expanded), then `PATH`, then
/// `~/.npm-global/bin/<name>`. When nothing is found the bare name is
/// returned and the spawn reports it as missing.
pub fn resolve_command(name: &str, configured: Option<&str>) -> PathBuf {
    if let Some(command) = configured.map(str::trim).filter(|c| !c.is_empty()) {
        return expand_home(command);
    }

    if let Ok(path) = which::which(name) {
        debug!("Resolved {} on PATH: {}", name, path.display());
        return path;
    }

    if let Some(path) = dirs::home_dir().map(|home| npm_global_bin(&home, name))
        && path.is_file()
    {
        debug!("Resolved {} under npm global prefix: {}", name, path.display());
        return path;
    }

    debug!("{} not found, leaving it to the spawn to report", name);
    PathBuf::from(name)
}

fn npm_global_bin(home: &Path, name: &str) -> PathBuf {
    home.join(".npm-global").join("bin").join(name)
}

fn expand_home(command: &str) -> PathBuf {
    match command.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(command)),
        None => PathBuf::from(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_command_wins() {
        assert_eq!(
            resolve_command("codex", Some("/opt/codex/bin/codex")),
            PathBuf::from("/opt/codex/bin/codex")
        );
    }

    #[test]
    fn test_blank_configured_command_is_ignored() {
        let resolved = resolve_command("definitely-not-an-agent-cli", Some("  "));
        assert_eq!(resolved, PathBuf::from("definitely-not-an-agent-cli"));
    }

    #[test]
    fn test_tilde_expansion() {
        let resolved = resolve_command("codex", Some("~/bin/codex"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(resolved, home.join("bin").join("codex"));
        }
    }

    #[test]
    fn test_npm_global_layout() {
        assert_eq!(
            npm_global_bin(Path::new("/home/me"), "gemini"),
            PathBuf::from("/home/me/.npm-global/bin/gemini")
        );
    }
}
