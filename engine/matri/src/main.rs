use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use matri_registry::{register_patient, PatientRecord, RegistrationError};
use matri_risk::{AssessmentResult, ConfigError, EngineConfig, ThresholdTable};
use matri_vitals::{VitalsError, VitalsRecord};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(
    name = "matri",
    version,
    about = "Offline maternal risk assessment from antenatal vitals",
    long_about = "matri classifies a set of antenatal vitals into a LOW, MEDIUM, HIGH or\n\
        CRITICAL risk tier with a recommended action and the reasons behind it.\n\
        It runs entirely on the local device.\n\n\
        EXAMPLES:\n\
        \n  matri assess --systolic 150 --diastolic 95 --proteinuria 2 --fhr 140\
        \n  matri assess --input reading.json --json\
        \n  matri register --name \"Amina Yusuf\" --age 27 --lmp 2026-01-01\
        \n  matri thresholds --config engine.toml"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assess a vitals reading
    Assess(AssessArgs),
    /// Register a new antenatal patient
    Register(RegisterArgs),
    /// Print the active threshold table
    Thresholds(ThresholdArgs),
}

#[derive(Debug, Args)]
struct AssessArgs {
    /// Systolic blood pressure (mmHg)
    #[arg(long, allow_negative_numbers = true)]
    systolic: Option<f64>,

    /// Diastolic blood pressure (mmHg)
    #[arg(long, allow_negative_numbers = true)]
    diastolic: Option<f64>,

    /// Dipstick proteinuria grade (0-4)
    #[arg(long, allow_negative_numbers = true)]
    proteinuria: Option<f64>,

    /// Fetal heart rate (bpm)
    #[arg(long = "fhr", allow_negative_numbers = true)]
    fetal_heart_rate: Option<f64>,

    /// Gestational age in weeks
    #[arg(long, allow_negative_numbers = true)]
    weeks: Option<f64>,

    /// Symptom tag; may be repeated
    #[arg(long = "symptom")]
    symptoms: Vec<String>,

    /// JSON vitals record; flags override its fields
    #[arg(long)]
    input: Option<PathBuf>,

    /// Engine configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Score with the rules only
    #[arg(long)]
    no_signal: bool,

    /// Print the assessment as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct RegisterArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    age: u8,

    /// First day of the last menstrual period (YYYY-MM-DD)
    #[arg(long)]
    lmp: NaiveDate,

    /// Registration date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    on: Option<NaiveDate>,

    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ThresholdArgs {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("invalid vitals: {0}")]
    Vitals(#[from] VitalsError),
    #[error("{0}")]
    Registration(#[from] RegistrationError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Vitals(_) | CliError::Registration(_) => 2,
            _ => 1,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    match path {
        Some(path) => Ok(EngineConfig::load(path)?),
        None => Ok(EngineConfig::default()),
    }
}

fn read_record(path: &Path) -> Result<VitalsRecord, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

async fn run_assess(args: AssessArgs) -> Result<(), CliError> {
    let mut record = match &args.input {
        Some(path) => read_record(path)?,
        None => VitalsRecord::default(),
    };
    if args.systolic.is_some() {
        record.systolic = args.systolic;
    }
    if args.diastolic.is_some() {
        record.diastolic = args.diastolic;
    }
    if args.proteinuria.is_some() {
        record.proteinuria = args.proteinuria;
    }
    if args.fetal_heart_rate.is_some() {
        record.fetal_heart_rate = args.fetal_heart_rate;
    }
    if args.weeks.is_some() {
        record.gestational_weeks = args.weeks;
    }
    record.symptoms.extend(args.symptoms);

    let vitals = record.into_vitals()?;

    let mut config = load_config(args.config.as_deref())?;
    if args.no_signal {
        config.signal.enabled = false;
    }
    let engine = config.build_engine()?;
    log::debug!("{engine:?}");

    let result = engine.assess(&vitals).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_assessment(&result);
    }
    Ok(())
}

fn print_assessment(result: &AssessmentResult) {
    println!("Risk:   {} ({})", result.tier(), result.color());
    println!("Action: {}", result.action());
    println!("Reasons:");
    for reason in result.reasons() {
        println!("  - {reason}");
    }
}

fn run_register(args: RegisterArgs) -> Result<(), CliError> {
    let today = args.on.unwrap_or_else(|| Local::now().date_naive());
    let record = register_patient(&args.name, args.age, args.lmp, today)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_patient(&record, today);
    }
    Ok(())
}

fn print_patient(record: &PatientRecord, today: NaiveDate) {
    println!("ID:    {}", record.id);
    println!("Name:  {} (age {})", record.name, record.age);
    println!("LMP:   {}", record.lmp);
    println!("EDD:   {}", record.edd);
    println!("GA:    {:.1} weeks", record.gestational_weeks_on(today));
}

fn run_thresholds(args: ThresholdArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&config.thresholds)?);
    } else {
        print_thresholds(&config.thresholds);
    }
    Ok(())
}

fn print_thresholds(t: &ThresholdTable) {
    println!("critical systolic   >= {} mmHg", t.critical_systolic);
    println!("critical diastolic  >= {} mmHg", t.critical_diastolic);
    println!("high systolic       >= {} mmHg", t.high_systolic);
    println!("high diastolic      >= {} mmHg", t.high_diastolic);
    println!("fetal heart rate    {}-{} bpm", t.fetal_hr_low, t.fetal_hr_high);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Command::Assess(args) => run_assess(args).await,
        Command::Register(args) => run_register(args),
        Command::Thresholds(args) => run_thresholds(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
