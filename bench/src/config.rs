use std::env;

use anyhow::{bail, Context, Result};

pub const DEFAULT_VERTICES: u32 = 1_000_000;
pub const DEFAULT_SEED: u64 = 42;

/// Which synthetic topology to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    All,
    LSystem,
    ScaleFree,
    SmallWorld,
    Random,
    Barbell,
    Dla,
}

impl Mode {
    pub fn parse(s: &str) -> Result<Self> {
        Ok(match s {
            "all" => Mode::All,
            "lsystem" => Mode::LSystem,
            "scalefree" => Mode::ScaleFree,
            "smallworld" => Mode::SmallWorld,
            "random" => Mode::Random,
            "barbell" => Mode::Barbell,
            "dla" => Mode::Dla,
            other => bail!("unknown mode: {other}. Use --help for options."),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub mode: Mode,
    pub vertex_count: u32,
    /// Base seed; each generator offsets it so topologies stay independent.
    pub seed: u64,
    pub json: bool,
}

impl BenchConfig {
    /// Parse `[mode] [vertex_count] [--json]`. Returns `None` when help was
    /// requested.
    ///
    /// `GRAPH_BENCH_VERTICES` and `GRAPH_BENCH_SEED` override the defaults;
    /// an explicit positional vertex count wins over the environment.
    pub fn from_args<I>(args: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut json = false;
        let mut positional = Vec::new();
        for arg in args {
            match arg.as_str() {
                "help" | "--help" | "-h" => return Ok(None),
                "--json" => json = true,
                _ => positional.push(arg),
            }
        }

        let mode = match positional.first() {
            Some(m) => Mode::parse(m)?,
            None => Mode::All,
        };

        let vertex_count = match positional.get(1) {
            Some(n) => n
                .parse()
                .with_context(|| format!("invalid vertex_count '{n}'"))?,
            None => env_or("GRAPH_BENCH_VERTICES", DEFAULT_VERTICES)?,
        };
        if vertex_count < 16 {
            bail!("vertex_count must be at least 16, got {vertex_count}");
        }

        let seed = env_or("GRAPH_BENCH_SEED", DEFAULT_SEED)?;

        Ok(Some(Self {
            mode,
            vertex_count,
            seed,
            json,
        }))
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(v) if !v.is_empty() => v.parse().with_context(|| format!("invalid {key} '{v}'")),
        _ => Ok(default),
    }
}

pub fn print_usage() {
    println!("Usage: graph-search-bench [mode] [vertex_count] [--json]");
    println!();
    println!("Modes:");
    println!("  all         Run all generators and benchmark each (default)");
    println!("  lsystem     Fractal branching tree (deep paths)");
    println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
    println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
    println!("  random      Erdos-Renyi uniform random edges");
    println!("  barbell     Two dense cliques connected by a thin bridge");
    println!("  dla         Diffusion-limited aggregation (organic branching)");
    println!();
    println!("Default vertex_count: {DEFAULT_VERTICES} (env GRAPH_BENCH_VERTICES)");
    println!("Seed: env GRAPH_BENCH_SEED (default {DEFAULT_SEED})");
    println!("Logging: RUST_LOG (default info)");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<BenchConfig>> {
        BenchConfig::from_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_positional_args() {
        let cfg = parse(&["dla", "5000"]).unwrap().unwrap();
        assert_eq!(cfg.mode, Mode::Dla);
        assert_eq!(cfg.vertex_count, 5000);
        assert!(!cfg.json);
    }

    #[test]
    fn test_json_flag_anywhere() {
        let cfg = parse(&["--json", "random", "100"]).unwrap().unwrap();
        assert_eq!(cfg.mode, Mode::Random);
        assert!(cfg.json);
    }

    #[test]
    fn test_help() {
        assert!(parse(&["--help"]).unwrap().is_none());
    }

    #[test]
    fn test_unknown_mode() {
        assert!(parse(&["spiral"]).is_err());
    }

    #[test]
    fn test_bad_vertex_count() {
        assert!(parse(&["all", "lots"]).is_err());
        assert!(parse(&["all", "3"]).is_err());
    }
}
