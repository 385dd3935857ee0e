use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use particle_morph::{MorphError, Options, Viewer};

/// Morph a particle cloud between two loaded models.
#[derive(Parser, Debug)]
#[command(name = "particle-morph", version)]
struct Args {
    /// JSON model set (`{"meshes": [{"name", "positions"}]}`). Defaults to
    /// the built-in demo shapes.
    #[arg(long)]
    models: Option<PathBuf>,

    /// TOML options preset.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Seed for the equalizer's resampling.
    #[arg(long)]
    seed: Option<u64>,

    /// Model index shown at progress 0.
    #[arg(long)]
    source: Option<usize>,

    /// Model index shown at progress 1.
    #[arg(long)]
    target: Option<usize>,

    /// List the TOML presets in a directory and exit.
    #[arg(long, value_name = "DIR")]
    list_presets: Option<PathBuf>,

    /// Print the options JSON schema and exit.
    #[arg(long, default_value_t = false)]
    print_schema: bool,
}

fn resolve_options(args: &Args) -> Result<Options, MorphError> {
    let mut options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if let Some(seed) = args.seed {
        options.morph.seed = Some(seed);
    }
    if let Some(source) = args.source {
        options.morph.pair.source = source;
    }
    if let Some(target) = args.target {
        options.morph.pair.target = target;
    }
    Ok(options)
}

fn run(args: Args) -> Result<(), MorphError> {
    if args.print_schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())
            .map_err(|e| MorphError::OptionsParse(e.to_string()))?;
        println!("{schema}");
        return Ok(());
    }

    if let Some(dir) = &args.list_presets {
        for name in Options::list_presets(dir) {
            println!("{name}");
        }
        return Ok(());
    }

    let options = resolve_options(&args)?;
    let mut builder = Viewer::builder().with_options(options);
    if let Some(path) = args.models {
        builder = builder.with_models_path(path);
    }
    builder.build().run()
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
