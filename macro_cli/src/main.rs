use clap::{Args, Parser, Subcommand};
use macro_core::{
    allocate, write_report, Config, Error, MacroConfig, MacroPercentages, OutputFormat, Result,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Value meaning "not supplied" for the optional integer flags
const UNSET: i64 = -1;

#[derive(Parser)]
#[command(name = "macrocalc")]
#[command(about = "Macro-nutrient calculator for daily calorie targets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    targets: TargetArgs,

    /// Output format: table, json or csv (defaults to the config file setting, then table)
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct TargetArgs {
    /// Percentage of macro-nutrients from carbs [default: 10]
    #[arg(long, allow_negative_numbers = true)]
    pct_carbs: Option<i64>,

    /// Percentage of macro-nutrients from protein [default: 30]
    #[arg(long, allow_negative_numbers = true)]
    pct_protein: Option<i64>,

    /// Percentage of macro-nutrients from fat, display only [default: 60]
    #[arg(long, allow_negative_numbers = true)]
    pct_fat: Option<i64>,

    /// Hard limit on net carb grams per day (-1 = no limit)
    #[arg(long, allow_negative_numbers = true)]
    carb_limit: Option<i64>,

    /// Percentage deficit applied to TDEE [default: 20]
    #[arg(long, allow_negative_numbers = true)]
    pct_deficit: Option<i64>,

    /// Total calories per day (-1 = unset)
    #[arg(long, default_value_t = UNSET, allow_negative_numbers = true)]
    calories: i64,

    /// Total daily energy expenditure (-1 = unset)
    #[arg(long, default_value_t = UNSET, allow_negative_numbers = true)]
    tdee: i64,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file holding the built-in defaults
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        macro_core::logging::init_with_level("debug");
    } else {
        macro_core::logging::init();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::InitConfig { force }) => cmd_init_config(cli.config.as_deref(), force),
        None => {
            let config = match cli.config.as_deref() {
                Some(path) => Config::load_from(path)?,
                None => Config::load()?,
            };
            let format = cli.format.unwrap_or(config.output.format);
            cmd_calculate(build_macro_config(&cli.targets, &config), format)
        }
    }
}

/// Merge flags over config file values; `-1` on an optional flag means unset
fn build_macro_config(args: &TargetArgs, config: &Config) -> MacroConfig {
    let targets = &config.targets;
    let set = |value: i64| Some(value).filter(|v| *v != UNSET);

    MacroConfig {
        percentages: MacroPercentages::new(
            args.pct_carbs.unwrap_or(targets.pct_carbs),
            args.pct_protein.unwrap_or(targets.pct_protein),
            args.pct_fat.unwrap_or(targets.pct_fat),
        ),
        hard_carb_limit: match args.carb_limit {
            Some(limit) => set(limit),
            None => targets.carb_limit,
        },
        percent_deficit: args.pct_deficit.unwrap_or(targets.pct_deficit),
        calories: set(args.calories),
        tdee: set(args.tdee),
    }
}

fn cmd_calculate(macro_config: MacroConfig, format: OutputFormat) -> Result<()> {
    let target = macro_config.calorie_target()?;
    tracing::debug!("Calorie target: {:?}", target);

    let allocation = allocate(&macro_config, target.calories());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, format, &target, &allocation)?;
    out.flush()?;

    Ok(())
}

fn cmd_init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_config_path()?,
    };

    if path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(&path)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}
