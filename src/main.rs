//! contextsite - the Context Engineering site, rendered in the terminal.
//!
//! # Usage
//!
//! ```bash
//! contextsite
//! contextsite /zh/about
//! contextsite --lang fr /blog
//! contextsite --no-toc --save
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use contextsite::app::App;
use contextsite::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use contextsite::i18n::{
    Lang, detect_from_env, load_preference, preference_path, resolve_language,
};
use contextsite::perf;
use contextsite::site::{Route, parse_lang, path_language};

/// The Context Engineering site, rendered in the terminal
#[derive(Parser, Debug)]
#[command(name = "contextsite", version, about, long_about = None)]
struct Cli {
    /// Site path to open, e.g. /about or /zh/blog
    #[arg(value_name = "PATH", default_value = "/")]
    path: String,

    /// Site language (en, zh or fr)
    #[arg(long, value_name = "CODE", value_parser = parse_lang)]
    lang: Option<Lang>,

    /// Hide the table of contents on the home page
    #[arg(long)]
    no_toc: bool,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Write scroll, search and frame debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf || cli.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| cli.render_debug_log.clone())
        .or_else(|| std::env::var_os("CONTEXTSITE_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        eprintln!(
            "[warn] Failed to initialize render debug log {}: {}",
            render_debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    let route = Route::parse(&cli.path).with_context(|| format!("Cannot open {}", cli.path))?;

    let pref_path = preference_path();
    let saved = load_preference(&pref_path).unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring unreadable language preference");
        None
    });
    let explicit = cli
        .lang
        .or_else(|| path_language(&cli.path))
        .or(file_flags.lang);
    let lang = resolve_language(explicit, saved, detect_from_env());
    tracing::debug!(lang = lang.code(), path = %cli.path, "resolved start language");

    let mut app = App::new(route.with_lang(lang))
        .with_toc_enabled(!effective.no_toc)
        .with_preference_path(Some(pref_path))
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
