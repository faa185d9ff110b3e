//! Render a menu catalog onto an in-memory page and run a search over it.
//!
//! The page is built the way the menu page is served: both search fields and
//! the filter chips exist before the catalog cards are injected. The query is
//! typed into the navigation search (or the page search with `--custom`), the
//! chip matching `--filter` is clicked, and the resulting page is printed as
//! JSON.

use anyhow::{Context, Result, bail};
use khaja::{
    CatalogIndex, Config, Event, FileStore, FilterValue, PageRuntime, PageShell, PageSnapshot,
    init_logging, render_catalog,
};
use serde::Serialize;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

#[derive(Serialize)]
struct SearchReport {
    title: String,
    engine: &'static str,
    query: String,
    filter: String,
    page: PageSnapshot,
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let config = Config::load();
    let index = CatalogIndex::load(&cli.catalog)?;
    let store = FileStore::open(&config.store_path)?;

    let mut shell = PageShell::new(&index.filter_values());
    let mut runtime = PageRuntime::new(store, &config);
    runtime.on_ready(&mut shell.page);

    render_catalog(index.catalog(), &mut shell.page, shell.main);
    runtime.after_render(&mut shell.page);

    if let Some(filter) = &cli.filter {
        if cli.custom {
            bail!("--filter applies to the navigation search only");
        }
        let Some(chip) = shell.chip(filter) else {
            bail!(
                "unknown filter '{filter}' (available: {})",
                available_filters(&shell)
            );
        };
        runtime.dispatch(&mut shell.page, Event::click(chip));
    }

    if let Some(query) = &cli.query {
        let target = if cli.custom {
            shell.search_input
        } else {
            shell.nav_input
        };
        runtime.dispatch(&mut shell.page, Event::input(target, query));
    }

    let (engine, query, filter) = if cli.custom {
        (
            "custom",
            runtime.custom_search().current_query(),
            FilterValue::All,
        )
    } else {
        (
            "catalog",
            runtime.catalog_search().current_query(),
            runtime.catalog_search().current_filter(),
        )
    };

    let report = SearchReport {
        title: index.catalog().title.clone(),
        engine,
        query,
        filter: filter.to_string(),
        page: shell.page.snapshot(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serializing search report")?
    );
    Ok(())
}

fn available_filters(shell: &PageShell) -> String {
    shell
        .chips
        .iter()
        .map(|(filter, _)| filter.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

struct Cli {
    catalog: PathBuf,
    query: Option<String>,
    filter: Option<FilterValue>,
    custom: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        Self::from_args(env::args_os().skip(1))
    }

    fn from_args(args: impl IntoIterator<Item = OsString>) -> Result<Self> {
        let mut args = args.into_iter();
        let mut catalog: Option<PathBuf> = None;
        let mut query: Option<String> = None;
        let mut filter: Option<FilterValue> = None;
        let mut custom = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--catalog" => catalog = Some(PathBuf::from(next_value(&mut args, "--catalog")?)),
                "--query" => query = Some(next_value(&mut args, "--query")?),
                "--filter" => filter = Some(FilterValue::parse(&next_value(&mut args, "--filter")?)),
                "--custom" => custom = true,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }

        let Some(catalog) = catalog else {
            bail!("missing required --catalog\n{}", usage());
        };
        Ok(Cli {
            catalog,
            query,
            filter,
            custom,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: menu-search --catalog PATH [--query TEXT] [--filter VALUE] [--custom]\n\
Renders the catalog, clicks the VALUE chip, types TEXT into the navigation search (or the page \
search with --custom), and prints the resulting page as JSON.\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<OsString> {
        raw.iter().map(OsString::from).collect()
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::from_args(args(&[
            "--catalog",
            "menu.json",
            "--query",
            "Momo",
            "--filter",
            "veg",
        ]))
        .unwrap();
        assert_eq!(cli.catalog, PathBuf::from("menu.json"));
        assert_eq!(cli.query.as_deref(), Some("Momo"));
        assert_eq!(cli.filter, Some(FilterValue::parse("veg")));
        assert!(!cli.custom);
    }

    #[test]
    fn catalog_is_required() {
        let err = Cli::from_args(args(&["--query", "x"])).err().unwrap();
        assert!(err.to_string().contains("--catalog"));
    }

    #[test]
    fn flag_without_value_is_rejected() {
        assert!(Cli::from_args(args(&["--catalog"])).is_err());
    }
}
