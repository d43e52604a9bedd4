use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use ci_version::config;
use ci_version::env::CiEnvironment;
use ci_version::git::{self, GitBackend};
use ci_version::ui;
use ci_version::VersionResolver;

#[derive(clap::Parser)]
#[command(
    name = "ci-version",
    version,
    about = "Compute the package version for a CI build from tags, branches and the version file"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short = 'f', long, help = "File containing the __version__ assignment")]
    version_file: Option<PathBuf>,

    #[arg(short = 'C', long, default_value = ".", help = "Repository directory")]
    repo: PathBuf,

    #[arg(long, value_enum, help = "Git backend to query the repository with")]
    backend: Option<GitBackend>,

    #[arg(long, help = "Do not fetch tags before numbering release candidates")]
    offline: bool,

    #[arg(long, help = "Describe how the version was chosen on stderr")]
    explain: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn run(args: Args) -> Result<String> {
    let mut config = config::load_config(args.config.as_deref()).context("cannot load config")?;

    if let Some(path) = args.version_file {
        config.version_file = path;
    }
    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if args.offline {
        config.fetch = false;
    }
    log::debug!("effective config: {:?}", config);

    let repo = git::open(config.backend, &args.repo);
    let env = CiEnvironment::from_process();

    let resolution = VersionResolver::new(&*repo, &config)
        .resolve(&env)
        .context("cannot resolve version")?;

    for warning in &resolution.warnings {
        ui::display_boundary_warning(warning);
    }
    if args.explain {
        ui::display_explanation(&resolution);
    }

    Ok(resolution.version.to_string())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = SimpleLogger::new().with_level(log_level(args.verbose)).init() {
        eprintln!("cannot initialise logging: {}", e);
    }

    match run(args) {
        Ok(version) => println!("{}", version),
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}
