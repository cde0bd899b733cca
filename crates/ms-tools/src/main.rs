//! ms-tools - scaffold a serverless microservice from the bundled template

use anyhow::Result;
use clap::Parser;
use installer_core::tui::InstallArgs;
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "ms-tools")]
#[command(about = "Scaffold a serverless microservice project")]
#[command(version)]
pub struct Args {
    /// Directory to install into (prompted for when omitted)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Local directory to use as the template instead of the bundled one
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Skip npm package installation
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Auto-confirm the non-empty-directory warning
    #[arg(short, long)]
    pub yes: bool,
}

impl From<Args> for InstallArgs {
    fn from(args: Args) -> Self {
        InstallArgs {
            template_dir: args.template_dir,
            directory: args.directory,
            skip_install: args.skip_install,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let result = installer_core::tui::run(args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
