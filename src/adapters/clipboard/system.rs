//! System clipboard via an external tool (wl-copy, pbcopy, xclip, clip.exe).
//!
//! Text is piped to the tool's stdin.

use crate::domain::DomainError;
use crate::ports::ClipboardPort;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Candidates tried in order when no command is configured.
const CANDIDATES: &[&[&str]] = &[
    &["wl-copy"],
    &["pbcopy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
    &["clip.exe"],
];

pub struct SystemClipboard {
    /// Program + args. `None` when nothing usable was found.
    command: Option<Vec<String>>,
}

impl SystemClipboard {
    /// Use `configured` (whitespace-separated program and args) if given, otherwise the
    /// first candidate found on PATH.
    pub fn new(configured: Option<&str>) -> Self {
        let command = match configured {
            Some(cmd) if !cmd.trim().is_empty() => {
                Some(cmd.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            }
            _ => CANDIDATES
                .iter()
                .find(|argv| on_path(argv[0]))
                .map(|argv| argv.iter().map(|s| s.to_string()).collect::<Vec<_>>()),
        };
        Self { command }
    }

    /// Program that `copy` runs, if any.
    pub fn program(&self) -> Option<&str> {
        self.command.as_ref().map(|argv| argv[0].as_str())
    }
}

fn on_path(program: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

#[async_trait]
impl ClipboardPort for SystemClipboard {
    async fn copy(&self, text: &str) -> Result<(), DomainError> {
        let argv = self.command.as_ref().ok_or_else(|| {
            DomainError::Clipboard(
                "no clipboard tool found (set LEADSENSE_CLIPBOARD_CMD)".to_string(),
            )
        })?;

        let mut child = Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| DomainError::Clipboard(format!("{}: {}", argv[0], e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| DomainError::Clipboard(e.to_string()))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| DomainError::Clipboard(e.to_string()))?;
        if !status.success() {
            return Err(DomainError::Clipboard(format!(
                "{} exited with {}",
                argv[0], status
            )));
        }
        debug!(len = text.len(), "copied to clipboard");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_command_is_split() {
        let clip = SystemClipboard::new(Some("xclip -selection clipboard"));
        assert_eq!(clip.program(), Some("xclip"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_copy_pipes_to_command() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("clip.txt");
        let script = dir.path().join("fake-copy.sh");
        std::fs::write(&script, format!("#!/bin/sh\ncat > '{}'\n", out.display())).unwrap();
        let clip = SystemClipboard::new(Some(&format!("sh {}", script.display())));

        clip.copy("Dear Acme team").await.unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "Dear Acme team");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_command_is_error() {
        let clip = SystemClipboard::new(Some("false"));
        let err = clip.copy("x").await.unwrap_err();
        assert!(matches!(err, DomainError::Clipboard(_)));
    }
}
