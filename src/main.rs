use market_data_gen::{generate, ConfigError, GeneratorConfig};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        r#"Market Data Generator - synthetic add/cancel order flow

USAGE:
    market_data_gen [OPTIONS]

OPTIONS:
    -c, --config <PATH>       Load configuration from JSON file
    -o, --output <PATH>       Output file, "-" for stdout (default: market_data_large.csv)
    -n, --events <N>          Main-phase event count (default: 2000000)
    --preseed <N>             Pre-seed add count (default: 50000)
    --add-ratio <F>           Probability of an add in the main phase (default: 0.55)
    --mean <F>                Price distribution mean (default: 10000)
    --stddev <F>              Price distribution standard deviation (default: 25)
    --seed <N>                Seed for reproducible output
    --progress-steps <N>      Progress reports over the main phase, 0 to disable (default: 10)
    -h, --help                Print this help message

Flags override values loaded with --config.

ENVIRONMENT VARIABLES:
    RUST_LOG                  Log level filter (default: market_data_gen=info)
"#
    );
}

fn wants_help(args: &[String]) -> bool {
    args.iter().skip(1).any(|a| a == "--help" || a == "-h")
}

fn parse_value<T: FromStr>(flag: &str, value: Option<&String>) -> Result<T, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::InvalidArgument {
        flag: flag.to_string(),
        value: "<missing>".to_string(),
    })?;
    value.parse().map_err(|_| ConfigError::InvalidArgument {
        flag: flag.to_string(),
        value: value.clone(),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so "-o -" leaves stdout to the records
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "market_data_gen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if wants_help(&args) {
        print_help();
        return Ok(());
    }

    // A config file is the base layer, so find it before applying flags
    let mut config = match args.iter().position(|a| a == "--config" || a == "-c") {
        Some(i) => {
            let path: PathBuf = parse_value("--config", args.get(i + 1))?;
            tracing::info!("Loading configuration from: {}", path.display());
            GeneratorConfig::from_file(&path)?
        }
        None => GeneratorConfig::default(),
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1);
        match flag {
            "--config" | "-c" => {}
            "--output" | "-o" => config.output = parse_value(flag, value)?,
            "--events" | "-n" => config.total_events = parse_value(flag, value)?,
            "--preseed" => config.preseed_count = parse_value(flag, value)?,
            "--add-ratio" => config.add_ratio = parse_value(flag, value)?,
            "--mean" => config.price_mean = parse_value(flag, value)?,
            "--stddev" => config.price_stddev = parse_value(flag, value)?,
            "--seed" => config.seed = Some(parse_value(flag, value)?),
            "--progress-steps" => config.progress_steps = parse_value(flag, value)?,
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 2;
    }

    config.validate()?;
    let stats = generate(config)?;
    tracing::info!("Finished with {} total orders", stats.last_order_id());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_help_found_anywhere() {
        assert!(wants_help(&args(&["market_data_gen", "-h"])));
        assert!(wants_help(&args(&[
            "market_data_gen",
            "--config",
            "/nonexistent/generator.json",
            "--help",
        ])));
        assert!(!wants_help(&args(&["market_data_gen", "-n", "10"])));
        assert!(!wants_help(&args(&["-h"])));
    }

    #[test]
    fn test_parse_value_errors() {
        let missing = parse_value::<u64>("--events", None);
        assert!(matches!(missing, Err(ConfigError::InvalidArgument { .. })));
        let bad = parse_value::<u64>("--events", Some(&"ten".to_string()));
        assert!(matches!(bad, Err(ConfigError::InvalidArgument { .. })));
        assert_eq!(parse_value::<u64>("--events", Some(&"10".to_string())).unwrap(), 10);
    }
}
