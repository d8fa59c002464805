use std::{
    ffi::OsString,
    path::PathBuf,
    time::{Duration, Instant},
};

use clap::Parser;
use color_eyre::eyre::{self, Context};
use photorank::{
    discover::discover_photos,
    report::REPORT_FILENAME,
    session::{Session, SessionCli},
    store::RatingStore,
    terminal::TerminalDecider,
};
use photorank_common::{
    bin_common::{
        init::{init_eyre, init_logger, verbosity_level},
        termination::Interrupt,
    },
    utils::fsutils::{self, read_optional_file},
};
use rand::{rngs::SmallRng, SeedableRng};

#[derive(Parser, Debug)]
#[command()]
/// Ranks photos with the Elo rating system.
///
/// Two photos are shown at a time and you pick the better one. After a number of rounds
/// over the whole set the photos are listed best first. Ratings are saved in the photo
/// directory, so running this again continues where it left off, also when new photos
/// have been added.
struct Cli {
    #[command(flatten)]
    session_args: SessionCli,

    /// Size of each preview: the width in pairs of terminal columns and the height in
    /// terminal rows
    #[arg(
        long,
        short = 'f',
        num_args = 2,
        value_names = ["WIDTH", "HEIGHT"],
        default_values_t = [20, 12]
    )]
    display_size: Vec<u32>,

    /// Don't draw previews in the terminal
    #[arg(long)]
    no_previews: bool,

    /// Also open both photos with this program, e.g. xdg-open
    #[arg(long)]
    viewer: Option<String>,

    /// Seed for the pairing order, random if not given
    #[arg(long)]
    seed: Option<u64>,

    /// A file to additionally write the logs to
    #[arg(long)]
    logfile: Option<PathBuf>,

    /// Log more, can be repeated
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// The photo directory to scan for .jpg images
    photo_dir: PathBuf,
}

fn cli_arguments() -> eyre::Result<Cli> {
    const ARGS_FILE: &str = ".photorankrc";
    let mut args: Vec<OsString> = std::env::args_os().collect();

    if args.len() == 1 {
        if let Some(flags) = read_optional_file(ARGS_FILE)
            .wrap_err_with(|| format!("Could not read config file at: {ARGS_FILE}"))?
        {
            args.extend(
                flags
                    .split_whitespace()
                    .map(|s| std::ffi::OsStr::new(s).to_owned()),
            );
        }
    }

    Ok(Cli::parse_from(args))
}

fn main() -> eyre::Result<()> {
    init_eyre()?;
    let cli = cli_arguments()?;
    init_logger(cli.logfile.as_deref(), verbosity_level(cli.verbose))?;

    log::debug!("CLI arguments: {cli:#?}");

    let args = cli.session_args.to_args();
    let [width, height] = cli.display_size[..] else {
        eyre::bail!("the display size needs exactly two numbers");
    };
    eyre::ensure!(
        cli.photo_dir.is_dir(),
        "not a directory: {}",
        cli.photo_dir.display()
    );

    let store = RatingStore::in_dir(&cli.photo_dir);
    let report_path = cli.photo_dir.join(REPORT_FILENAME);

    log::info!("Backing up the rating table");
    fsutils::backup_file(store.path()).wrap_err("failed to backup the rating table")?;

    log::info!("Finding photos in: {}", cli.photo_dir.display());
    let discovered =
        discover_photos(&cli.photo_dir).wrap_err("failed to list the photo directory")?;
    log::info!("Found {} photos", discovered.photos.len());

    let rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let mut session = Session::open(store, args, &discovered.photos, rng)
        .wrap_err("failed to prepare the ranking")?;

    let interrupt = Interrupt::register().wrap_err("failed to register signal handlers")?;
    let mut decider = TerminalDecider::new(
        std::io::stdin().lock(),
        std::io::stdout(),
        &cli.photo_dir,
        interrupt,
    );
    if !cli.no_previews {
        decider = decider.with_previews(width.saturating_mul(2), height);
    }
    if let Some(viewer) = cli.viewer {
        decider = decider.with_viewer(viewer);
    }

    let before = Instant::now();
    let summary = session.run(&mut decider).wrap_err("ranking failed")?;
    log::info!(
        "Ranked for {}",
        humantime::format_duration(Duration::from_secs(before.elapsed().as_secs()))
    );
    if summary.aborted {
        log::info!("Stopped early, reporting what has been decided so far");
    }

    let report = session
        .finish(&report_path)
        .wrap_err("failed to save the results")?;

    println!("Final Ranking:");
    print!("{report}");

    Ok(())
}
