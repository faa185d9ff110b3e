//! Toggle or list favorite menu items in the shared store.
//!
//! With `--catalog`, ids are checked against the catalog and listed with their
//! names; toggling renders the catalog so the number of repainted cards can be
//! reported.

use anyhow::{Result, bail};
use khaja::{
    CatalogIndex, Config, FavoritesStore, FileStore, ItemId, MemoryPage, Page, init_logging,
    render_catalog,
};
use serde::Serialize;
use serde_json::json;
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
struct FavoriteRow {
    id: ItemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let config = Config::load();
    let index = cli.catalog.as_deref().map(CatalogIndex::load).transpose()?;
    let mut favorites = FavoritesStore::new(
        FileStore::open(&config.store_path)?,
        config.favorites_key.clone(),
    );

    match cli.action {
        Action::Toggle(id) => {
            let mut page = MemoryPage::new();
            if let Some(index) = &index {
                if index.item(&id).is_none() {
                    bail!("item '{id}' not found in catalog");
                }
                let main = page.add_main_content();
                render_catalog(index.catalog(), &mut page, main);
            }
            let is_favorite = favorites.toggle_favorite(&mut page, &id)?;
            let output = json!({
                "id": id,
                "favorite": is_favorite,
                "total": favorites.load().len(),
                "cards": page.cards_with_id(&id).len(),
            });
            println!("{}", serde_json::to_string(&output)?);
        }
        Action::List => {
            let rows: Vec<FavoriteRow> = favorites
                .load()
                .ids()
                .iter()
                .map(|id| FavoriteRow {
                    id: id.clone(),
                    name: index
                        .as_ref()
                        .and_then(|index| index.item(id))
                        .map(|item| item.name.clone()),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}

enum Action {
    Toggle(ItemId),
    List,
}

struct Cli {
    action: Action,
    catalog: Option<PathBuf>,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut action: Option<Action> = None;
        let mut catalog: Option<PathBuf> = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--toggle" => {
                    let id = next_value(&mut args, "--toggle")?;
                    if id.trim().is_empty() {
                        bail!("--toggle requires a non-empty item id");
                    }
                    set_action(&mut action, Action::Toggle(ItemId::new(id.trim())))?;
                }
                "--list" => set_action(&mut action, Action::List)?,
                "--catalog" => catalog = Some(PathBuf::from(next_value(&mut args, "--catalog")?)),
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }

        let Some(action) = action else {
            bail!("one of --toggle or --list is required\n{}", usage());
        };
        Ok(Cli { action, catalog })
    }
}

fn set_action(slot: &mut Option<Action>, action: Action) -> Result<()> {
    if slot.is_some() {
        bail!("--toggle/--list may only be provided once");
    }
    *slot = Some(action);
    Ok(())
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
    "Usage: menu-favorites (--toggle ID | --list) [--catalog PATH]\n\
Flips or lists favorite item ids in the store named by KHAJA_STORE.\n"
}
