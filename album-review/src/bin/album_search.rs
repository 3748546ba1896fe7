//! album-search - Interactive album chooser
//!
//! Drives the album chooser from a terminal. Every plain input line is a
//! keystroke burst fed to the search box; results print when the debounced
//! search completes. Commands start with `:`.
//!
//! ```text
//! :pick N          choose result N (1-based)
//! :title TEXT      :artist TEXT    :genre A, B    :cover URI
//! :released TEXT   :rating N
//! :show            print attributes JSON and the rendered card
//! :quit
//! ```

use std::path::PathBuf;
use std::time::Duration;

use album_review::attributes::AlbumAttributes;
use album_review::editor::{AlbumChooser, AlbumEditor};
use album_review::widget::{WidgetOptions, DEFAULT_DEBOUNCE};
use album_review_common::config;
use album_review_common::rating::StarCounts;
use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "album-search")]
#[command(about = "Search Last.fm and build an album review block from the terminal")]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = "ALBUM_REVIEW_CONFIG")]
    config: Option<PathBuf>,

    /// Last.fm API key (overrides environment and config file)
    #[arg(long)]
    lastfm_api_key: Option<String>,

    /// Debounce interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE.as_millis() as u64)]
    debounce_ms: u64,

    /// Ignore search responses superseded by a newer search
    #[arg(long)]
    discard_stale: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args
        .config
        .or_else(config::default_config_path)
        .context("Could not determine config file location; pass --config")?;
    let toml_config = config::load_toml_config(&config_path)?;

    album_review::logging::init_tracing(&toml_config.logging)?;

    let api_key = config::resolve_lastfm_api_key(args.lastfm_api_key.as_deref(), &toml_config);
    let options = WidgetOptions {
        debounce: Duration::from_millis(args.debounce_ms),
        discard_stale_results: args.discard_stale,
    };

    let chooser = AlbumChooser::from_api_key(api_key.as_deref(), &toml_config.catalog_base_url, options)
        .context("Failed to create Last.fm client")?;

    let widget = match &chooser {
        AlbumChooser::Available(widget) => widget.clone(),
        AlbumChooser::Unavailable { notice } => bail!("{}", notice),
    };

    let mut editor = AlbumEditor::new(AlbumAttributes::default(), chooser);

    let mut updates = widget.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let albums = updates.borrow_and_update().clone();
            if albums.is_empty() {
                println!("(no results)");
                continue;
            }
            for (i, album) in albums.iter().enumerate() {
                println!("{:>2}. {} - {}", i + 1, album.artist, album.name);
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let Some(command) = line.strip_prefix(':') else {
            widget.set_query(line).await;
            continue;
        };

        let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
        let rest = rest.trim();

        match name {
            "pick" => {
                let index = match rest.parse::<usize>() {
                    Ok(n) if n > 0 => n - 1,
                    _ => {
                        eprintln!("usage: :pick N");
                        continue;
                    }
                };
                let Some(album) = widget.albums().get(index).cloned() else {
                    eprintln!("no result {}", index + 1);
                    continue;
                };
                if editor.choose(&album).await {
                    println!("Chose {} - {}", editor.attributes.artist, editor.attributes.title);
                } else {
                    eprintln!("Lookup failed for {} - {}", album.artist, album.name);
                }
            }
            "title" => editor.attributes.set_title(rest),
            "artist" => editor.attributes.set_artist(rest),
            "genre" => editor.attributes.set_genre_text(rest),
            "cover" => editor.attributes.set_cover_art_uri(rest),
            "released" => editor.attributes.set_release_date(rest),
            "rating" => match rest.parse::<f64>() {
                Ok(value) => match editor.attributes.set_rating(value) {
                    Ok(()) => println!("{}", StarCounts::from_rating(editor.attributes.rating)),
                    Err(e) => eprintln!("{}", e),
                },
                Err(_) => eprintln!("usage: :rating N"),
            },
            "show" => {
                println!("{}", serde_json::to_string_pretty(&editor.attributes)?);
                println!("{}", editor.preview_html());
            }
            "quit" => break,
            other => eprintln!("unknown command :{}", other),
        }
    }

    Ok(())
}
