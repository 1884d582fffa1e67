//! Subcommand handlers

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use armore_client::HttpBuildClient;
use armore_files::{share, DroppedFile, Keymap};
use armore_runtime::{Orchestrator, Terminal, Transcript};
use armore_spec::{Config, SessionState};
use tracing::{info, warn};
use url::Url;

use crate::cli::Command;
use crate::workspace::Workspace;

/// Execute `command` against the workspace, writing user output to `out`.
///
/// `config` is only resolved by commands that talk to the service.
pub async fn dispatch<F, W>(
    command: &Command,
    workspace: &mut Workspace,
    config: F,
    out: &mut W,
) -> Result<()>
where
    F: FnOnce() -> Result<Config>,
    W: Write,
{
    match command {
        Command::New { name } => {
            let mut state = SessionState::new();
            state.name = name.clone().unwrap_or_default();
            workspace.reset(state);
        }
        Command::Show => show(workspace.session.state(), out)?,
        Command::Edit { path } => {
            let file = DroppedFile::read(path)?;
            workspace.session.import_dropped(vec![file]);
        }
        Command::Name { name } => workspace.session.rename(name.clone()),
        Command::Save => {
            workspace.session.save_current()?;
            writeln!(out, "Saved {}", workspace.session.state().name)?;
        }
        Command::Open { name } => workspace.session.open(name)?,
        Command::Delete { name } => {
            let mut picker = workspace.session.picker();
            picker.delete(&mut workspace.session, name)?;
            for name in picker.visible() {
                writeln!(out, "{}", name)?;
            }
        }
        Command::List { query } => {
            let mut picker = workspace.session.picker();
            picker.set_query(query.clone().unwrap_or_default());
            if picker.is_empty() {
                writeln!(out, "No items found.")?;
            }
            for name in picker.visible() {
                writeln!(out, "{}", name)?;
            }
        }
        Command::Run { path } => {
            let source = match path {
                Some(path) => read_source(path)?,
                None => workspace.session.state().source.clone(),
            };
            run(&source, config()?, out).await?;
        }
        Command::Share { page_url } => {
            let page = Url::parse(page_url)
                .with_context(|| format!("Invalid page URL {}", page_url))?;
            let state = workspace.session.state();
            let shared = share::ShareState::new(state.source.clone(), state.name.clone());
            writeln!(out, "{}", share::share_url(&page, &shared))?;
        }
        Command::Load { link } => match share::from_link_or_token(link) {
            Some(shared) => {
                info!(name = %shared.name, "loaded shared session");
                workspace.session.load_shared(shared);
            }
            None => {
                warn!(%link, "no shared program in link");
                writeln!(out, "No shared program found in {}", link)?;
            }
        },
        Command::Keys => {
            for binding in Keymap::default().bindings() {
                writeln!(out, "{:<12} {:?}", binding.chord.to_string(), binding.action)?;
            }
        }
    }

    workspace.persist()
}

fn show<W: Write>(state: &SessionState, out: &mut W) -> Result<()> {
    let name = if state.name.is_empty() {
        "<unnamed>"
    } else {
        state.name.as_str()
    };
    match &state.opened_name {
        Some(opened) if opened != &state.name => {
            writeln!(out, "{} (opened as {})", name, opened)?
        }
        _ => writeln!(out, "{}", name)?,
    }
    writeln!(out)?;
    write!(out, "{}", state.source)?;
    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Run `source`, writing every terminal frame as it appears
async fn run<W: Write>(source: &str, config: Config, out: &mut W) -> Result<Transcript> {
    let client = HttpBuildClient::new(config.clone())?;
    let terminal = Terminal::new();
    let mut frames = terminal.subscribe();
    let orchestrator = Orchestrator::new(client, terminal.clone(), &config);

    let mut printed = 0;
    let run = orchestrator.run(source);
    tokio::pin!(run);

    let result = loop {
        tokio::select! {
            result = &mut run => break result,
            changed = frames.changed() => {
                if changed.is_err() {
                    break (&mut run).await;
                }
                printed = flush(&terminal, printed, out)?;
            }
        }
    };
    flush(&terminal, printed, out)?;

    Ok(result?)
}

/// Write frames not shown yet; returns the new count
fn flush<W: Write>(terminal: &Terminal, printed: usize, out: &mut W) -> Result<usize> {
    let history = terminal.history();
    for frame in history.iter().skip(printed) {
        writeln!(out, "{}", frame)?;
    }
    out.flush()?;
    Ok(history.len())
}
