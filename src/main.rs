use clap::Parser;
use git_stager::core::{print_error, GitRepo, Result};
use git_stager::ui::App;
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "git-stager")]
#[command(about = "Interactive terminal UI for staging, unstaging and inspecting git changes")]
#[command(version)]
struct Cli {
    /// Repository path (defaults to the current directory)
    path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let repo_path = cli.path.unwrap_or_else(|| PathBuf::from("."));

    if let Err(e) = run(&repo_path) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(repo_path: &std::path::Path) -> Result<()> {
    let repo = GitRepo::open(repo_path)?;
    let mut app = App::new(repo);
    app.run()
}
