use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::config::{ConfigOverrides, ResolutionMode, load_launcher_config};
use crate::error::OpenError;
use crate::launch::{LaunchCommand, resolve_command};
use crate::project::resolver::{EditorContext, resolve_target};
use crate::tools::init;

/// Root CLI for qtc-open
#[derive(Parser)]
#[command(name = "qtc-open", version)]
#[command(about = "Open the current workspace or project in Qt Creator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the target and launch Qt Creator on it
    Open {
        #[command(flatten)]
        target: TargetArgs,
        /// Qt Creator executable, or the directory that holds it
        #[arg(long, value_name = "PATH")]
        qtcreator: Option<String>,
        /// Print the command line without launching
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the path Qt Creator would be opened on
    Resolve {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Write a qtc-open.toml template into the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Editor state and resolution settings shared by `open` and `resolve`.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Workspace folder; repeatable, the first one is the workspace root.
    /// Defaults to the current directory.
    #[arg(long = "workspace", short = 'w', value_name = "DIR")]
    pub workspaces: Vec<PathBuf>,
    /// The file currently being edited
    #[arg(long, short = 'f', value_name = "FILE")]
    pub file: Option<PathBuf>,
    /// How to pick the directory to open
    #[arg(long, value_enum)]
    pub mode: Option<ResolutionMode>,
    /// Open the --file itself instead of a folder
    #[arg(long)]
    pub open_with_file: bool,
}

impl TargetArgs {
    fn editor_context(&self, cwd: &Path) -> EditorContext {
        let workspace_folders = if self.workspaces.is_empty() {
            vec![cwd.to_path_buf()]
        } else {
            self.workspaces.iter().map(|dir| cwd.join(dir)).collect()
        };
        EditorContext {
            active_file: self.file.as_ref().map(|file| cwd.join(file)),
            workspace_folders,
        }
    }

    fn overrides(&self, qt_creator_path: Option<String>) -> ConfigOverrides {
        ConfigOverrides {
            qt_creator_path,
            target_mode: self.mode,
            open_with_file: self.open_with_file,
        }
    }
}

/// Dispatch after parse
pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Open {
            target,
            qtcreator,
            dry_run,
        } => {
            if let Err(e) = open(&target, qtcreator, dry_run) {
                eprintln!("error (open): {e:#}");
                std::process::exit(1);
            }
        }
        Commands::Resolve { target } => {
            if let Err(e) = resolve(&target) {
                eprintln!("error (resolve): {e:#}");
                std::process::exit(1);
            }
        }
        Commands::Init { force } => {
            let result = std::env::current_dir()
                .context("resolving current directory")
                .and_then(|cwd| init::write_template(&cwd, force));
            if let Err(e) = result {
                eprintln!("error (init): {e:#}");
                std::process::exit(1);
            }
        }
    }
}

fn open(args: &TargetArgs, qtcreator: Option<String>, dry_run: bool) -> Result<()> {
    let (command, target) = plan(args, qtcreator)?;
    let launch = LaunchCommand::new(command, target);

    if dry_run {
        println!("{}", launch.render());
        return Ok(());
    }

    launch.launch()?;
    println!("Opening {} in Qt Creator", launch.target.display());
    Ok(())
}

fn resolve(args: &TargetArgs) -> Result<()> {
    let (_, target) = plan(args, None)?;
    println!("{}", target.display());
    Ok(())
}

/// Loads config for the workspace and resolves both the program and the target.
fn plan(args: &TargetArgs, qtcreator: Option<String>) -> Result<(String, PathBuf)> {
    let cwd = std::env::current_dir().context("resolving current directory")?;
    let context = args.editor_context(&cwd);

    let loaded = load_launcher_config(
        context.workspace_folders.first().map(PathBuf::as_path),
        &args.overrides(qtcreator),
    )?;
    if let Some(path) = loaded.path.as_deref() {
        tracing::debug!(config = %path.display(), "using launcher config");
    }

    let target = resolve_target(&loaded.data, &context).ok_or(OpenError::NoWorkspace)?;
    Ok((resolve_command(&loaded.data.qt_creator_path), target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_are_anchored_at_cwd() {
        let args = TargetArgs {
            workspaces: vec![PathBuf::from("proj"), PathBuf::from("/abs/other")],
            file: Some(PathBuf::from("proj/src/main.cpp")),
            mode: None,
            open_with_file: false,
        };

        let ctx = args.editor_context(Path::new("/home/dev"));
        assert_eq!(
            ctx.workspace_folders,
            vec![PathBuf::from("/home/dev/proj"), PathBuf::from("/abs/other")]
        );
        assert_eq!(
            ctx.active_file,
            Some(PathBuf::from("/home/dev/proj/src/main.cpp"))
        );
    }

    #[test]
    fn cwd_is_the_default_workspace() {
        let args = TargetArgs {
            workspaces: Vec::new(),
            file: None,
            mode: Some(ResolutionMode::ProjectRoot),
            open_with_file: true,
        };

        let ctx = args.editor_context(Path::new("/home/dev"));
        assert_eq!(ctx.workspace_folders, vec![PathBuf::from("/home/dev")]);

        let overrides = args.overrides(Some("/opt/qtcreator".to_string()));
        assert_eq!(overrides.target_mode, Some(ResolutionMode::ProjectRoot));
        assert!(overrides.open_with_file);
        assert_eq!(overrides.qt_creator_path.as_deref(), Some("/opt/qtcreator"));
    }
}
