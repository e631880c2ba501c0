#![forbid(unsafe_code)]

//! The `grind` binary: wire the workspace, client, executor, terminal
//! session, and event threads together, then hand control to the runtime
//! loop.

use std::collections::BTreeSet;
use std::io;
use std::sync::Arc;
use std::sync::mpsc;

use anyhow::{Context, bail};
use tracing_subscriber::EnvFilter;

use grind_client::{HttpApi, ProblemApi, SessionTokens};
use grind_core::session::{SessionOptions, TerminalSession};
use grind_core::source::EventSource;
use grind_store::config::default_workspace;
use grind_tui::effects::{ApiFactory, Effects};
use grind_tui::model::AppModel;
use grind_tui::msg::Msg;
use grind_tui::presenter::Presenter;
use grind_tui::runtime::Program;
use grind_tui::workspace::Workspace;

fn main() -> anyhow::Result<()> {
    let workspace = Workspace::open(default_workspace());
    init_logging(&workspace)?;

    // Refuse to start detached from a terminal, before touching any
    // terminal state.
    if !TerminalSession::stdout_is_tty() {
        bail!("grind is an interactive application and needs a terminal");
    }

    let config = workspace.config.get();
    let tokens = workspace.credentials.get().map(|c| SessionTokens {
        session: c.session,
        csrf: c.csrf,
    });

    let api_url = config.api_url.clone();
    let make_api: ApiFactory = Arc::new(move |tokens| {
        HttpApi::new(&api_url, tokens).map(|api| Arc::new(api) as Arc<dyn ProblemApi>)
    });
    let api = make_api(tokens).context("building the service client")?;

    let bookmarks: BTreeSet<u64> = workspace.bookmarks.list().into_iter().collect();
    let mut model = AppModel::new(config.clone(), bookmarks);

    let (sender, receiver) = mpsc::channel::<Msg>();
    let effects = Effects::new(
        api,
        make_api,
        workspace.clone(),
        config,
        sender.clone(),
    );

    let session = TerminalSession::new(SessionOptions::default())
        .context("entering raw mode")?;
    let (width, height) = TerminalSession::size().unwrap_or((80, 24));
    model.width = width.max(1);
    model.height = height.max(1);

    // Input bytes and signals become messages on the same queue the
    // executor reports into.
    let _source = EventSource::spawn(move |event| {
        let _ = sender.send(Msg::from(event));
    })
    .context("starting input threads")?;

    let mut program = Program::new(
        model,
        receiver,
        effects,
        Presenter::new(io::stdout()),
        Some(session),
        workspace,
    );
    program.run().context("runtime loop")?;
    Ok(())
}

/// Log to a file in the workspace; the terminal belongs to the renderer.
fn init_logging(workspace: &Workspace) -> anyhow::Result<()> {
    std::fs::create_dir_all(workspace.root())?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(workspace.log_path())?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(file)
        .with_ansi(false)
        .init();
    tracing::info!(root = %workspace.root().display(), "grind starting");
    Ok(())
}
