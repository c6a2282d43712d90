use clap::{Parser, Subcommand};
use jot::areas::repository::Repository;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jot",
    version = "0.1.0",
    about = "A single-user version-control engine",
    long_about = "Jot tracks snapshots of a flat working directory: stage files, \
    commit them, branch, and merge, all against a local object store. \
    It is a learning project, not a git replacement.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory \
        or at the specified path, with a deterministic initial commit on the master branch."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(name = "commit", about = "Record the staged changes as a new commit")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "rm", about = "Unstage a file, or mark a tracked file for removal")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(
        name = "global-log",
        about = "Show every commit ever made, in no particular order"
    )]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of all commits with the given message")]
    Find {
        #[arg(index = 1, help = "The commit message to search for")]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and removed files")]
    Status,
    #[command(name = "branch", about = "Create a new branch at the current commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(
        name = "checkout",
        about = "Switch to a branch, or restore a file",
        long_about = "Without flags this command switches to the named branch. \
        With --file it restores one file from the head commit, or from the commit \
        matching --commit when given."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to", conflicts_with = "file")]
        branch: Option<String>,
        #[arg(short, long, help = "The file to restore")]
        file: Option<String>,
        #[arg(
            short,
            long,
            requires = "file",
            help = "The commit id (or fragment) to restore from"
        )]
        commit: Option<String>,
    },
    #[command(name = "reset", about = "Move the current branch to the given commit")]
    Reset {
        #[arg(index = 1, help = "The commit id (or fragment) to reset to")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge the given branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge in")]
        branch: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        println!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => std::path::PathBuf::from(path),
                None => std::env::current_dir()?,
            };
            Repository::init(&path, Box::new(std::io::stdout()))?;

            Ok(())
        }
        Commands::Add { file } => open()?.add(file),
        Commands::Commit { message } => open()?.commit(message),
        Commands::Rm { file } => open()?.rm(file),
        Commands::Log => open()?.log(),
        Commands::GlobalLog => open()?.global_log(),
        Commands::Find { message } => open()?.find(message),
        Commands::Status => open()?.status(),
        Commands::Branch { name } => open()?.branch(name),
        Commands::RmBranch { name } => open()?.rm_branch(name),
        Commands::Checkout {
            branch,
            file,
            commit,
        } => {
            let repository = open()?;

            match (branch, file, commit) {
                (Some(branch), None, None) => repository.checkout_branch(branch),
                (None, Some(file), None) => repository.checkout_file(file),
                (None, Some(file), Some(commit)) => repository.checkout_file_at(commit, file),
                _ => anyhow::bail!("Specify a branch, or a file with --file."),
            }
        }
        Commands::Reset { commit } => open()?.reset(commit),
        Commands::Merge { branch } => open()?.merge(branch),
    }
}

fn open() -> anyhow::Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::open(&pwd, Box::new(std::io::stdout()))
}
