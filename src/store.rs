use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::{ClientConfig, ClientState};

mod credential;
pub use self::credential::{CREDENTIAL_KEY, CredentialStorage, MemoryStorage};

/// File-backed client state: `config.json` plus `state.json` in one directory.
#[derive(Clone, Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Resolves the state directory: explicit path, then `$HOME/.lectern`.
    pub fn default_root(explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(p) = explicit {
            return Ok(p);
        }
        let home = std::env::var_os("HOME")
            .ok_or_else(|| anyhow!("cannot locate state directory (set LECTERN_HOME or HOME)"))?;
        Ok(PathBuf::from(home).join(".lectern"))
    }

    /// Opens the store, creating the directory and default files on first use.
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("create state dir {}", root.display()))?;
        let store = Self {
            root: root.to_path_buf(),
        };
        if !store.config_path().exists() {
            store
                .write_config(&ClientConfig::default())
                .context("write default config.json")?;
        }
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn config_path(&self) -> PathBuf {
        self.root.join("config.json")
    }

    fn state_path(&self) -> PathBuf {
        self.root.join("state.json")
    }

    pub fn read_config(&self) -> Result<ClientConfig> {
        let bytes = fs::read(self.config_path()).context("read config.json")?;
        let mut cfg: ClientConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported config version {}", cfg.version);
        }
        while cfg.base_url.ends_with('/') {
            cfg.base_url.pop();
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &ClientConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.config_path(), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn read_state(&self) -> Result<ClientState> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(ClientState::default());
        }
        let bytes = fs::read(&path).context("read state.json")?;
        let st: ClientState = serde_json::from_slice(&bytes).context("parse state.json")?;
        if st.version != 1 {
            anyhow::bail!("unsupported client state version {}", st.version);
        }
        Ok(st)
    }

    pub fn write_state(&self, st: &ClientState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize state")?;
        write_atomic(&self.state_path(), &bytes).context("write state.json")?;
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
