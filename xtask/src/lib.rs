use std::env;
use std::process::Command;
use std::string::String;

/// Environment variable holding extra cargo features, whitespace separated.
pub const ENV_FEATURES: &str = "POLYFFT_FEATURES";

/// Options derived from the host machine used to configure cargo commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub features: Vec<String>,
}

impl BuildConfig {
    /// Join features into a single string suitable for passing to cargo.
    pub fn features_arg(&self) -> Option<String> {
        if self.features.is_empty() {
            None
        } else {
            Some(self.features.join(" "))
        }
    }

    pub fn is_parallel(&self) -> bool {
        self.features.iter().any(|f| f == "parallel")
    }
}

/// Detect build configuration from the current machine.
pub fn detect_config() -> BuildConfig {
    let extra = env::var(ENV_FEATURES).unwrap_or_default();
    compute_config(detect_nproc(), &extra)
}

fn detect_nproc() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Compute a [`BuildConfig`] from supplied inputs. This is separated for testing.
pub fn compute_config(nproc: usize, extra: &str) -> BuildConfig {
    let mut features: Vec<String> = Vec::new();

    if nproc > 1 {
        features.push("parallel".into());
    }

    for feat in extra.split_whitespace() {
        if !features.iter().any(|f| f == feat) {
            features.push(feat.to_string());
        }
    }

    BuildConfig { features }
}

fn with_features(mut cmd: Command, cfg: &BuildConfig) -> Command {
    if let Some(f) = cfg.features_arg() {
        cmd.arg("--features").arg(f);
    }
    cmd
}

pub fn build_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["build", "--workspace"]);
    with_features(cmd, cfg)
}

pub fn test_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["test", "-p", "polyfft"]);
    with_features(cmd, cfg)
}

pub fn clippy_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["clippy", "--workspace", "--all-targets", "--all-features"]);
    cmd
}

pub fn fmt_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["fmt", "--all"]);
    cmd
}

/// Criterion benchmarks of the three transform formulations.
pub fn bench_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["bench", "-p", "polyfft", "--bench", "bench_fft"]);
    with_features(cmd, cfg)
}

/// Timing sweep through the command-line tool, printing one line per size.
pub fn demo_command(max_log: u32) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["run", "-r", "-p", "polyfft-cli", "--", "bench", "--max-log"]);
    cmd.arg(max_log.to_string());
    cmd
}
