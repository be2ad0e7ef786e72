//! Loads an IDX feature/label pair, enumerates classes and prints the
//! train / test / validation split.
//!
//! Run with:
//!   cargo run --release -- train-images-idx3-ubyte train-labels-idx1-ubyte
//!
//! Options:
//!   --config <file.json>        load split settings from JSON
//!   --write-config <file.json>  save the effective settings and continue
//!   --seed <u64>                fixed shuffle seed
//!   --strict                    reject files with the wrong magic number
//!
//! Set RUST_LOG=debug to see the raw header bytes.
use std::path::PathBuf;
use std::process;

use ferrite_data::{DataError, DataHandler, LoaderConfig};

struct Args {
    features: PathBuf,
    labels: PathBuf,
    config: Option<PathBuf>,
    write_config: Option<PathBuf>,
    seed: Option<u64>,
    strict: bool,
}

const USAGE: &str = "usage: ferrite-data <features> <labels> \
                     [--config <file>] [--write-config <file>] [--seed <u64>] [--strict]";

fn parse_args() -> Result<Args, String> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut write_config = None;
    let mut seed = None;
    let mut strict = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(next_value(&mut args, &arg)?)),
            "--write-config" => write_config = Some(PathBuf::from(next_value(&mut args, &arg)?)),
            "--seed" => {
                let v = next_value(&mut args, &arg)?;
                seed = Some(v.parse::<u64>().map_err(|_| format!("invalid seed '{}'", v))?);
            }
            "--strict" => strict = true,
            "-h" | "--help" => return Err(USAGE.to_owned()),
            s if s.starts_with("--") => return Err(format!("unknown option '{}'\n{}", s, USAGE)),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    if positional.len() != 2 {
        return Err(USAGE.to_owned());
    }
    let labels = positional.pop().unwrap_or_default();
    let features = positional.pop().unwrap_or_default();

    Ok(Args { features, labels, config, write_config, seed, strict })
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("{} needs a value", flag))
}

fn run(args: Args) -> Result<(), DataError> {
    let mut config = match &args.config {
        Some(path) => LoaderConfig::load_json(path)?,
        None => LoaderConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.strict |= args.strict;
    config.validate()?;

    if let Some(path) = &args.write_config {
        config.save_json(path)?;
        println!("Config written to {}", path.display());
    }

    let mut handler = DataHandler::new(config);
    handler.load(&args.features, &args.labels)?;
    handler.split_data()?;

    println!("Records:    {} ({} features each)", handler.len(), handler.feature_len());
    println!("Classes:    {}", handler.num_classes());
    for (raw, class) in handler.class_map().iter() {
        println!("  label {:>3} -> class {}", raw, class);
    }
    let cfg = handler.config();
    println!(
        "Training:   {} ({:.0}%)",
        handler.training_data().len(),
        cfg.train_percent * 100.0
    );
    println!("Test:       {} ({:.0}%)", handler.test_data().len(), cfg.test_percent * 100.0);
    println!(
        "Validation: {} ({:.0}%)",
        handler.validation_data().len(),
        cfg.validation_percent() * 100.0
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("{}", msg);
            process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
