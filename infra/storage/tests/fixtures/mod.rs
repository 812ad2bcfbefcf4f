#![allow(dead_code)]

use mln_storage::{PathResolver, Sandbox, VirtualPath};
use tempfile::TempDir;

pub fn sandbox() -> (TempDir, Sandbox) {
    let tmp = TempDir::new().unwrap();
    let sandbox = Sandbox::builder().root(tmp.path().join("mln-sda")).create(true).open().unwrap();
    (tmp, sandbox)
}

pub fn at(raw: &str) -> VirtualPath {
    PathResolver::resolve_target(&VirtualPath::root(), raw).unwrap()
}
