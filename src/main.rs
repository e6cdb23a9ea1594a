// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Threadmark CLI entrypoint.
//!
//! Opens a bookmark file through [`threadmark::store::JsonFileRepository`], runs one command
//! against a [`threadmark::BookmarkStore`] and waits for every queued write before exiting.

use std::error::Error;
use std::sync::Arc;

use threadmark::model::{NewBookmark, ThreadIdentity};
use threadmark::store::{
    JsonFileRepository, StaticArchiveClassifier, StaticSiteRegistry, WriteDurability,
};
use threadmark::{BookmarkStore, StoreConfig};

const DEFAULT_STORE_PATH: &str = "bookmarks.json";
const DEFAULT_SITE: &str = "4chan";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [options] list\n  {program} [options] add <site/board/no> [title]\n  {program} [options] remove <site/board/no>...\n  {program} [options] read <site/board/no> [last-seen-post]\n  {program} [options] viewed <site/board/no> <post>\n  {program} [options] prune\n  {program} [options] clear\n\nOptions:\n  --store <path>          bookmark file (default {DEFAULT_STORE_PATH})\n  --config <path>         JSON store config\n  --site <name>           known site, repeatable (default {DEFAULT_SITE})\n  --archive-site <name>   known archive site, repeatable\n  --durable-writes        fsync every write where supported\n\nBookmarks of sites that are neither --site nor --archive-site are not loaded and are dropped\nby the next write. Log output is controlled through RUST_LOG."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Add { thread: ThreadIdentity, title: Option<String> },
    Remove(Vec<ThreadIdentity>),
    Read { thread: ThreadIdentity, last_seen_post: Option<u64> },
    Viewed { thread: ThreadIdentity, post: u64 },
    Prune,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    store_path: Option<String>,
    config_path: Option<String>,
    sites: Vec<String>,
    archive_sites: Vec<String>,
    durable_writes: bool,
    command: Command,
}

fn parse_thread(raw: &str) -> Result<ThreadIdentity, ()> {
    raw.parse().map_err(|_| ())
}

fn parse_command(positional: Vec<String>) -> Result<Command, ()> {
    let mut positional = positional.into_iter();
    let name = positional.next().ok_or(())?;
    let rest = positional.collect::<Vec<_>>();

    let command = match (name.as_str(), rest.as_slice()) {
        ("list", []) => Command::List,
        ("add", [thread]) => Command::Add { thread: parse_thread(thread)?, title: None },
        ("add", [thread, title]) => {
            Command::Add { thread: parse_thread(thread)?, title: Some(title.clone()) }
        }
        ("remove", threads) if !threads.is_empty() => Command::Remove(
            threads.iter().map(|thread| parse_thread(thread)).collect::<Result<_, _>>()?,
        ),
        ("read", [thread]) => Command::Read { thread: parse_thread(thread)?, last_seen_post: None },
        ("read", [thread, post]) => Command::Read {
            thread: parse_thread(thread)?,
            last_seen_post: Some(post.parse().map_err(|_| ())?),
        },
        ("viewed", [thread, post]) => Command::Viewed {
            thread: parse_thread(thread)?,
            post: post.parse().map_err(|_| ())?,
        },
        ("prune", []) => Command::Prune,
        ("clear", []) => Command::Clear,
        _ => return Err(()),
    };

    Ok(command)
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut store_path = None;
    let mut config_path = None;
    let mut sites = Vec::new();
    let mut archive_sites = Vec::new();
    let mut durable_writes = false;
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--store" => {
                if store_path.is_some() {
                    return Err(());
                }
                store_path = Some(args.next().ok_or(())?);
            }
            "--config" => {
                if config_path.is_some() {
                    return Err(());
                }
                config_path = Some(args.next().ok_or(())?);
            }
            "--site" => sites.push(args.next().ok_or(())?),
            "--archive-site" => archive_sites.push(args.next().ok_or(())?),
            "--durable-writes" => {
                if durable_writes {
                    return Err(());
                }
                durable_writes = true;
            }
            _ if arg.starts_with("--") => return Err(()),
            _ => positional.push(arg),
        }
    }

    if sites.is_empty() {
        sites.push(DEFAULT_SITE.to_owned());
    }

    Ok(CliOptions {
        store_path,
        config_path,
        sites,
        archive_sites,
        durable_writes,
        command: parse_command(positional)?,
    })
}

async fn run(options: CliOptions) -> Result<(), Box<dyn Error>> {
    let config = match &options.config_path {
        Some(path) => StoreConfig::from_json_file(path)?,
        None => StoreConfig::default(),
    };

    let store_path = options.store_path.unwrap_or_else(|| DEFAULT_STORE_PATH.to_owned());
    let repository = if options.durable_writes {
        JsonFileRepository::new(store_path).with_durability(WriteDurability::Durable)
    } else {
        JsonFileRepository::new(store_path)
    };

    let known_sites = options.sites.iter().chain(&options.archive_sites).cloned();
    let store = BookmarkStore::builder(Arc::new(repository))
        .with_config(config)
        .with_site_registry(Arc::new(StaticSiteRegistry::new(known_sites)))
        .with_archive_classifier(Arc::new(StaticArchiveClassifier::new(options.archive_sites)))
        .build();

    store.initialize();
    store.await_until_initialized().await?;

    match options.command {
        Command::List => {
            let lines = store.map_all_bookmarks(|record| {
                format!(
                    "{}\t[{}]\tunseen={}\t{}",
                    record.thread_identity(),
                    record.flags(),
                    record.unseen_posts_count(),
                    record.title().unwrap_or("")
                )
            });
            for line in lines {
                println!("{line}");
            }
            println!(
                "{} bookmarks, {} active, {} unseen posts",
                store.bookmarks_count(),
                store.active_bookmarks_count(),
                store.total_unseen_posts_count()
            );
        }
        Command::Add { thread, title } => {
            let mut new_bookmark = NewBookmark::new(thread.clone());
            if let Some(title) = title {
                new_bookmark = new_bookmark.with_title(title);
            }
            if store.create_bookmarks_durable(vec![new_bookmark]).await.is_empty() {
                println!("{thread} is already bookmarked");
            } else {
                println!("added {thread}");
            }
        }
        Command::Remove(threads) => {
            for thread in store.delete_bookmarks(&threads) {
                println!("removed {thread}");
            }
        }
        Command::Read { thread, last_seen_post } => {
            if !store.exists(&thread) {
                return Err(format!("{thread} is not bookmarked").into());
            }
            store.read_posts_and_notifications(&thread, last_seen_post);
        }
        Command::Viewed { thread, post } => {
            if !store.exists(&thread) {
                return Err(format!("{thread} is not bookmarked").into());
            }
            store.on_post_viewed(&thread, post, 0);
            // Let the trailing debounced write fire before flushing.
            tokio::time::sleep(store.config().debounce_delay() * 2).await;
        }
        Command::Prune => {
            for thread in store.prune_non_active() {
                println!("pruned {thread}");
            }
        }
        Command::Clear => {
            let removed = store.delete_all();
            println!("removed {} bookmarks", removed.len());
        }
    }

    store.flush().await;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "threadmark".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(run(options))
    })();

    if let Err(err) = result {
        eprintln!("threadmark: {err}");
        std::process::exit(1);
    }
}
