use clap::Parser;
use env_logger::Env;

mod commands;
mod descriptor;

use commands::Command;

#[derive(Parser, Debug)]
#[command(name = "vs-helper")]
#[command(about = "Frame rate arithmetic and clip format checks")]
#[command(version)]
struct Args {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(args.default_log_filter()))
        .init();
    log::debug!("running {:?}", args.command);

    let output = args.command.run()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{output}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vs_helper::Rational;

    #[test]
    fn parses_muldiv() {
        let args = Args::try_parse_from(["vs-helper", "muldiv", "24000/1001", "2", "1"]).unwrap();
        assert_eq!(
            args.command,
            Command::Muldiv {
                rational: Rational::new(24000, 1001),
                mul: 2,
                div: 1,
            }
        );
        assert!(!args.json);
    }

    #[test]
    fn accepts_negative_values() {
        let args = Args::try_parse_from(["vs-helper", "muldiv", "-3/4", "-1", "2"]).unwrap();
        assert_eq!(
            args.command,
            Command::Muldiv {
                rational: Rational::new(-3, 4),
                mul: -1,
                div: 2,
            }
        );

        let args = Args::try_parse_from(["vs-helper", "saturate", "-9999999999"]).unwrap();
        assert_eq!(
            args.command,
            Command::Saturate {
                value: -9_999_999_999
            }
        );
    }

    #[test]
    fn rejects_zero_denominator() {
        assert!(Args::try_parse_from(["vs-helper", "reduce", "1/0"]).is_err());
    }

    #[test]
    fn global_flags() {
        let args = Args::try_parse_from(["vs-helper", "--json", "-vv", "reduce", "4/6"]).unwrap();
        assert!(args.json);
        assert_eq!(args.default_log_filter(), "trace");
    }

    #[test]
    fn parses_descriptors() {
        let args = Args::try_parse_from([
            "vs-helper",
            "same-format",
            "1920x1080:yuv420p8",
            "1920x1080:unknown",
        ])
        .unwrap();
        let Command::SameFormat { a, b } = args.command else {
            panic!("unexpected command {:?}", args.command);
        };
        assert!(a.0.format.is_some());
        assert!(b.0.format.is_none());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
