#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use khaja::{CatalogIndex, Config, MemoryStore, PageRuntime, PageShell, render_catalog};
use std::path::PathBuf;
use std::process::{Command, Output};

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn menu_index() -> CatalogIndex {
    CatalogIndex::load(&fixture_path("menu.json")).expect("fixture catalog must load")
}

/// Page shell with chips for every fixture filter and the fixture catalog
/// already rendered.
pub fn rendered_menu() -> (CatalogIndex, PageShell) {
    let index = menu_index();
    let mut shell = PageShell::new(&index.filter_values());
    render_catalog(index.catalog(), &mut shell.page, shell.main);
    (index, shell)
}

pub fn runtime() -> PageRuntime<MemoryStore> {
    PageRuntime::new(MemoryStore::new(), &Config::default())
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}
