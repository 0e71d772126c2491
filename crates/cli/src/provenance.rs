//! `<stem>.provenance.json` sidecars: how an artifact can be regenerated.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sightline::api::{Piece, Rect, ReplayToken};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::RunConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callsite {
    pub file: String,
    pub line: u32,
}

/// Typed provenance record. `replay` plus `config` regenerate the rounds
/// behind any artifact; `config_digest` identifies the config at a glance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sidecar {
    pub code_rev: String,
    pub lib_version: String,
    pub callsite: Option<Callsite>,
    pub tag: Option<String>,
    /// First round's token; sweeps use indices `0..rounds` of its seed.
    pub replay: Option<ReplayToken>,
    pub rounds: Option<u64>,
    pub bounds: Option<Rect>,
    pub piece: Option<Piece>,
    pub config_digest: String,
    pub config: RunConfig,
    pub inputs: Vec<PathBuf>,
    pub outputs: Vec<PathBuf>,
}

impl Sidecar {
    pub fn describe(config: &RunConfig, tag: Option<String>) -> Result<Self> {
        Ok(Self {
            code_rev: code_rev(),
            lib_version: sightline::VERSION.to_owned(),
            callsite: None,
            tag,
            replay: None,
            rounds: None,
            bounds: None,
            piece: None,
            config_digest: config_digest(config)?,
            config: config.clone(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        })
    }

    pub fn replay(mut self, token: ReplayToken) -> Self {
        self.replay = Some(token);
        self
    }

    pub fn rounds(mut self, n: u64) -> Self {
        self.rounds = Some(n);
        self
    }

    pub fn bounds(mut self, rect: Rect) -> Self {
        self.bounds = Some(rect);
        self
    }

    pub fn piece(mut self, piece: Piece) -> Self {
        self.piece = Some(piece);
        self
    }

    pub fn input(mut self, path: &Path) -> Self {
        self.inputs.push(path.to_path_buf());
        self
    }

    /// Record the caller and write the sidecar next to `artifact`.
    #[track_caller]
    pub fn write(mut self, artifact: &Path) -> Result<PathBuf> {
        let caller = Location::caller();
        self.callsite = Some(Callsite {
            file: caller.file().to_owned(),
            line: caller.line(),
        });
        self.outputs.push(artifact.to_path_buf());
        let path = sidecar_path(artifact);
        fs::write(&path, serde_json::to_vec_pretty(&self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), digest = %self.config_digest, "provenance");
        Ok(path)
    }
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Hex SHA-256 of the config's canonical JSON.
pub fn config_digest(config: &RunConfig) -> Result<String> {
    let bytes = serde_json::to_vec(config).context("serializing config")?;
    let digest = Sha256::digest(&bytes);
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse`, else "unknown".
pub fn code_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_owned)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_owned())
}
