#![allow(dead_code)]

use mln::System;
use mln::domain::config::{CipherKind, SystemConfig};
use mln::kernel::console::ScriptedConsole;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SETUP: [&str; 3] = ["alice", "pw123!", "pw123!"];
pub const LOGIN: [&str; 2] = ["alice", "pw123!"];

/// Installation root inside `tmp`, like the default `mln-sda` next to the binary.
pub fn root(tmp: &TempDir) -> PathBuf {
    tmp.path().join("mln-sda")
}

pub fn config(root: &Path, cipher: CipherKind) -> SystemConfig {
    let mut config = SystemConfig::default();
    config.root = root.to_path_buf();
    config.shell.pause_ms = 0;
    config.security.cipher = cipher;
    config
}

/// A system rooted at `root` that reads `script` in order.
pub fn system(root: &Path, script: &[&str]) -> System<ScriptedConsole> {
    System::builder()
        .config(config(root, CipherKind::Aes))
        .console(ScriptedConsole::new(script.iter().copied()))
        .build()
}
