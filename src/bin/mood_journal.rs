//! Add to or read the mood journal kept in the shared store.

use anyhow::{Result, bail};
use khaja::{Config, FileStore, JournalStore, init_logging};
use std::env;

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let command = Command::parse()?;
    let config = Config::load();
    let mut journal = JournalStore::new(
        FileStore::open(&config.store_path)?,
        config.journal_key.clone(),
    );

    match command {
        Command::Add(text) => {
            let (entry, count) = journal.save(&text)?;
            println!("{}", serde_json::to_string(&entry)?);
            eprintln!("Entries: {count}");
        }
        Command::List => println!("{}", serde_json::to_string_pretty(&journal.entries())?),
        Command::Count => println!("{}", journal.count()),
    }
    Ok(())
}

enum Command {
    Add(String),
    List,
    Count,
}

impl Command {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let Some(flag) = args.next() else {
            bail!("{}", usage());
        };
        let flag = flag
            .into_string()
            .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
        let command = match flag.as_str() {
            "--add" => {
                let text = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --add"))?
                    .into_string()
                    .map_err(|_| anyhow::anyhow!("value for --add is not valid UTF-8"))?;
                Command::Add(text)
            }
            "--list" => Command::List,
            "--count" => Command::Count,
            "--help" | "-h" => {
                print!("{}", usage());
                std::process::exit(0);
            }
            other => bail!("unknown flag: {other}\n{}", usage()),
        };
        if let Some(extra) = args.next() {
            bail!("unexpected argument: {}", extra.to_string_lossy());
        }
        Ok(command)
    }
}

fn usage() -> &'static str {
    "Usage: mood-journal (--add TEXT | --list | --count)\n\
Appends a timestamped entry, prints all entries as JSON, or prints the entry count.\n"
}
