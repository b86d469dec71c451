//! Retrocam: stylize photos like a vintage CCD compact or a 2014 phone.
//!
//! Reads a JPEG, honours its EXIF orientation, runs a look profile and
//! writes the result as `CCD_<unix-millis>.jpg`.

mod config;
mod image_loader;

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use retrocam_core::pipeline::presets::CCD_RETRO_FULL;
use retrocam_core::{
    LookProfile, OrientationTag, Pipeline, PipelineError, ProfileError, VignetteMode,
};

use crate::config::AppConfig;
use crate::image_loader::ImageIoError;

#[derive(Parser)]
#[command(name = "retrocam")]
#[command(version, about = "Retro CCD and early-phone photo stylizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stylize one image
    Process {
        /// Input image (JPEG or PNG)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Built-in look profile
        #[arg(short, long, value_name = "NAME", conflicts_with = "profile_file")]
        profile: Option<String>,

        /// Look profile JSON file
        #[arg(long, value_name = "FILE")]
        profile_file: Option<PathBuf>,

        /// Stamp the date in the lower-right corner
        #[arg(long)]
        date: bool,

        /// Date to stamp instead of today
        #[arg(long, value_name = "YYYY-MM-DD", requires = "date")]
        stamp_date: Option<NaiveDate>,

        /// Seed for the random grain and scanline stages
        #[arg(long, value_name = "N")]
        seed: Option<u64>,

        /// Output directory (overrides RETROCAM_OUTPUT_DIR)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Vignette sampling mode
        #[arg(long, value_enum)]
        vignette: Option<VignetteArg>,

        /// Override the EXIF orientation
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,
    },

    /// List built-in look profiles
    Profiles,

    /// Print a built-in profile as JSON
    DumpProfile {
        /// Profile name
        name: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum VignetteArg {
    Grid,
    Smooth,
}

impl From<VignetteArg> for VignetteMode {
    fn from(arg: VignetteArg) -> Self {
        match arg {
            VignetteArg::Grid => Self::Grid,
            VignetteArg::Smooth => Self::Smooth,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Normal,
    #[value(name = "90")]
    Rotate90,
    #[value(name = "180")]
    Rotate180,
    #[value(name = "270")]
    Rotate270,
}

impl From<OrientationArg> for OrientationTag {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Normal => Self::Normal,
            OrientationArg::Rotate90 => Self::Rotate90,
            OrientationArg::Rotate180 => Self::Rotate180,
            OrientationArg::Rotate270 => Self::Rotate270,
        }
    }
}

/// Errors surfaced to the user.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Image(#[from] ImageIoError),
}

struct ProcessArgs {
    input: PathBuf,
    profile: Option<String>,
    profile_file: Option<PathBuf>,
    date: bool,
    stamp_date: Option<NaiveDate>,
    seed: Option<u64>,
    out: Option<PathBuf>,
    vignette: Option<VignetteArg>,
    orientation: Option<OrientationArg>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process {
            input,
            profile,
            profile_file,
            date,
            stamp_date,
            seed,
            out,
            vignette,
            orientation,
        } => cmd_process(ProcessArgs {
            input,
            profile,
            profile_file,
            date,
            stamp_date,
            seed,
            out,
            vignette,
            orientation,
        }),
        Commands::Profiles => {
            cmd_profiles();
            Ok(())
        }
        Commands::DumpProfile { name } => cmd_dump_profile(&name),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_profile(name: Option<&str>, file: Option<&Path>) -> Result<LookProfile, ProfileError> {
    match file {
        Some(path) => LookProfile::from_json_file(path),
        None => LookProfile::builtin(name.unwrap_or(CCD_RETRO_FULL)),
    }
}

fn cmd_process(args: ProcessArgs) -> Result<(), CliError> {
    let config = AppConfig::default();
    let mut profile = load_profile(args.profile.as_deref(), args.profile_file.as_deref())?;
    if let Some(mode) = args.vignette {
        profile.vignette.mode = mode.into();
    }

    let source = image_loader::read_source(&args.input)?;
    let orientation = args
        .orientation
        .map(OrientationTag::from)
        .unwrap_or(source.orientation);

    tracing::info!(
        "processing {} with {} ({orientation})",
        args.input.display(),
        profile.name
    );

    let mut pipeline = Pipeline::new(profile);
    if let Some(seed) = args.seed {
        pipeline = pipeline.with_seed(seed);
    }
    if let Some(date) = args.stamp_date {
        pipeline = pipeline.with_date(date);
    }
    let image = pipeline.process(&source.bytes, orientation, args.date)?;
    drop(source);

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let out_dir = args.out.or(config.output_dir);
    let path = image_loader::output_path(&args.input, out_dir.as_deref(), millis);
    image_loader::save_jpeg(&image, &path, config.save_quality)?;

    println!("{}", path.display());
    Ok(())
}

fn cmd_profiles() {
    for name in LookProfile::builtin_names() {
        println!("{name}");
    }
}

fn cmd_dump_profile(name: &str) -> Result<(), CliError> {
    let profile = LookProfile::builtin(name)?;
    println!("{}", profile.to_json_pretty()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_process_flags() {
        let cli = Cli::try_parse_from([
            "retrocam",
            "process",
            "in.jpg",
            "--profile",
            "phone-2014",
            "--date",
            "--stamp-date",
            "2014-07-21",
            "--orientation",
            "90",
            "--vignette",
            "smooth",
            "--seed",
            "5",
        ])
        .unwrap();
        let Commands::Process {
            profile,
            date,
            stamp_date,
            orientation,
            vignette,
            seed,
            ..
        } = cli.command
        else {
            panic!("expected process command");
        };
        assert_eq!(profile.as_deref(), Some("phone-2014"));
        assert!(date);
        assert_eq!(stamp_date, NaiveDate::from_ymd_opt(2014, 7, 21));
        assert_eq!(orientation.map(OrientationTag::from), Some(OrientationTag::Rotate90));
        assert!(matches!(vignette, Some(VignetteArg::Smooth)));
        assert_eq!(seed, Some(5));
    }

    #[test]
    fn test_profile_and_profile_file_conflict() {
        let parsed = Cli::try_parse_from([
            "retrocam",
            "process",
            "in.jpg",
            "--profile",
            "ccd-basic",
            "--profile-file",
            "look.json",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_process_writes_stylized_copy() {
        let dir = std::env::temp_dir().join(format!("retrocam-cli-{}", std::process::id()));
        let out_dir = dir.join("out");
        std::fs::create_dir_all(&out_dir).unwrap();
        let input = dir.join("shot.png");
        retrocam_core::RetroImage::filled(40, 30, retrocam_core::Color::rgb(90, 120, 150))
            .to_rgba_image()
            .save(&input)
            .unwrap();

        let result = cmd_process(ProcessArgs {
            input: input.clone(),
            profile: Some("ccd-basic".into()),
            profile_file: None,
            date: true,
            stamp_date: NaiveDate::from_ymd_opt(2006, 8, 19),
            seed: Some(11),
            out: Some(out_dir.clone()),
            vignette: Some(VignetteArg::Smooth),
            orientation: Some(OrientationArg::Rotate90),
        });
        let written: Vec<PathBuf> = std::fs::read_dir(&out_dir)
            .unwrap()
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        let saved = written
            .first()
            .map(|path| image::open(path).map(|img| (img.width(), img.height())));
        std::fs::remove_dir_all(&dir).unwrap();

        result.unwrap();
        assert_eq!(written.len(), 1);
        let name = written[0].file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("CCD_") && name.ends_with(".jpg"), "{name}");
        assert_eq!(saved.unwrap().unwrap(), (30, 40));
    }

    #[test]
    fn test_missing_profile_file_is_reported() {
        let missing = Path::new("/nonexistent/retrocam/look.json");
        assert!(matches!(
            load_profile(None, Some(missing)),
            Err(ProfileError::Io(_))
        ));
    }

    #[test]
    fn test_default_profile() {
        let profile = load_profile(None, None).unwrap();
        assert_eq!(profile.name, CCD_RETRO_FULL);
    }
}
