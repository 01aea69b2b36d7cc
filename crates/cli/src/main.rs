use std::path::PathBuf;

use clap::Parser;

use learnhub_auth::NotificationKind;
use learnhub_cli::app::Command;
use learnhub_cli::{App, Config};
use learnhub_infra::FileSlot;

#[derive(Parser)]
#[command(name = "learnhub")]
#[command(about = "learnhub - course dashboard from the command line", long_about = None)]
struct Cli {
    /// Session file (overrides LEARNHUB_SESSION_PATH)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    learnhub_observability::init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.session_file)?;
    tracing::debug!(session_path = %config.session_path.display(), "configuration resolved");

    let mut app = App::new(FileSlot::new(config.session_path));
    app.restore();

    let result = app.run(cli.command);

    for banner in app.drain_notifications() {
        match banner.kind {
            NotificationKind::Error | NotificationKind::Warning => {
                eprintln!("[{}] {}", kind_label(banner.kind), banner.message)
            }
            _ => println!("[{}] {}", kind_label(banner.kind), banner.message),
        }
    }

    let output = result?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn kind_label(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "ok",
        NotificationKind::Error => "error",
        NotificationKind::Warning => "warning",
        NotificationKind::Info => "info",
    }
}
