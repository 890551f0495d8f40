use anyhow::{Context, Result, bail};
use parsum::{Delivery, ReportFormat, SplitStrategy, Sweep, SweepConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: parsum [OPTIONS]

  --config FILE     load sweep settings from a JSON file
  --out DIR         directory for n{N}_t{T} output files
  --sizes N,N,..    dataset exponents (10^N records)
  --workers T,T,..  worker counts
  --seed S          reproducible data; same data for every T of one N
  --format F        text | json
  --balanced        spread the split remainder over the first partitions
  --streaming       deliver partials over a channel instead of join-then-fold
";

fn parse_list<T: std::str::FromStr>(flag: &str, raw: &str) -> Result<Vec<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.trim().parse::<T>().with_context(|| format!("invalid value {s:?} for {flag}")))
        .collect()
}

fn parse_args() -> Result<Option<SweepConfig>> {
    let mut args = std::env::args().skip(1);
    let mut config = SweepConfig::default();
    let mut overrides: Vec<(String, Option<String>)> = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--balanced" | "--streaming" => overrides.push((arg, None)),
            "--config" => {
                let path = args.next().context("--config needs a value")?;
                config = SweepConfig::from_json_file(PathBuf::from(path))?;
            }
            "--out" | "--sizes" | "--workers" | "--seed" | "--format" => {
                let value = args.next().with_context(|| format!("{arg} needs a value"))?;
                overrides.push((arg, Some(value)));
            }
            other => bail!("unknown argument {other:?}\n\n{USAGE}"),
        }
    }

    // Flags win over the config file regardless of position.
    for (flag, value) in overrides {
        let value = value.unwrap_or_default();
        match flag.as_str() {
            "--out" => config.output_dir = PathBuf::from(value),
            "--sizes" => config.exponents = parse_list(&flag, &value)?,
            "--workers" => config.workers = parse_list(&flag, &value)?,
            "--seed" => config.seed = Some(value.parse().context("invalid value for --seed")?),
            "--format" => {
                config.format = match value.as_str() {
                    "text" => ReportFormat::Text,
                    "json" => ReportFormat::Json,
                    other => bail!("unknown format {other:?}, expected text or json"),
                }
            }
            "--balanced" => config.split = SplitStrategy::Balanced,
            "--streaming" => config.delivery = Delivery::Streaming,
            _ => unreachable!("only known flags are queued"),
        }
    }
    Ok(Some(config))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let Some(config) = parse_args()? else {
        print!("{USAGE}");
        return Ok(());
    };

    let sweep = Sweep::new(config)?;
    info!(
        sizes = ?sweep.config().exponents,
        workers = ?sweep.config().workers,
        out = %sweep.config().output_dir.display(),
        "starting sweep"
    );
    let reports = sweep.run()?;
    info!(combinations = reports.len(), "sweep finished");
    Ok(())
}
