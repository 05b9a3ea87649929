use clap::{Parser, Subcommand};
#[cfg(not(test))]
use xtask::*;

#[derive(Parser)]
#[command(author, version, about = "Development tasks for polyfft")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Build,
    Test,
    Clippy,
    Fmt,
    Analyze,
    Bench,
    Demo {
        /// Largest transform size as a power of two
        #[arg(long, default_value_t = 15)]
        max_log: u32,
    },
}

#[cfg(not(test))]
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = detect_config();

    let status = match cli.command {
        Commands::Build => build_command(&cfg).status(),
        Commands::Test => test_command(&cfg).status(),
        Commands::Clippy => clippy_command().status(),
        Commands::Fmt => fmt_command().status(),
        Commands::Analyze => {
            let fmt = fmt_command().status()?;
            if !fmt.success() {
                Ok(fmt)
            } else {
                clippy_command().status()
            }
        }
        Commands::Bench => bench_command(&cfg).status(),
        Commands::Demo { max_log } => demo_command(max_log).status(),
    }?;

    std::process::exit(status.code().unwrap_or(1));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_demo_command() {
        let cli = Cli::parse_from(["xtask", "demo", "--max-log", "10"]);
        match cli.command {
            Commands::Demo { max_log } => assert_eq!(max_log, 10),
            _ => panic!("parsed wrong command"),
        }
    }

    #[test]
    fn parse_analyze_command() {
        let cli = Cli::parse_from(["xtask", "analyze"]);
        assert!(matches!(cli.command, Commands::Analyze));
    }
}
