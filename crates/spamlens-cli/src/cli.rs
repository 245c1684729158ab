use clap::{Args, Parser, Subcommand};
use spamlens_engine::{EngineConfig, JitterMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spamlens")]
#[command(author, version, about = "Heuristic spam scoring for text and images")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags layered over the engine configuration file
#[derive(Args, Debug, Default)]
pub struct EngineArgs {
    /// Engine configuration file (YAML)
    #[arg(short, long, global = true, env = "SPAMLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Phrase catalogue file (YAML), replacing the configured one
    #[arg(long, global = true, env = "SPAMLENS_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Seed the confidence jitter for reproducible output
    #[arg(long, global = true, conflicts_with = "no_jitter")]
    pub seed: Option<u64>,

    /// Report unjittered confidences
    #[arg(long, global = true)]
    pub no_jitter: bool,

    /// Images decoded and scored concurrently
    #[arg(long, global = true)]
    pub max_parallel_images: Option<usize>,
}

impl EngineArgs {
    /// Load the configuration file (or defaults) and apply the flags
    pub fn resolve(&self) -> spamlens_core::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_file(path)?,
            None => EngineConfig::default(),
        };

        if let Some(catalog) = &self.catalog {
            config.catalog_path = Some(catalog.clone());
        }
        if let Some(seed) = self.seed {
            config.jitter = JitterMode::Seeded { seed };
        }
        if self.no_jitter {
            config.jitter = JitterMode::None;
        }
        if let Some(max) = self.max_parallel_images {
            config.max_parallel_images = max;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a text body read from a file, or stdin with "-"
    Text {
        /// Text file, or "-" for stdin
        input: PathBuf,
    },

    /// Score one or more image files
    Images {
        /// Image files (PNG, JPEG, GIF, BMP, WebP)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Score a text body together with its images
    Scan {
        /// Text file, or "-" for stdin
        #[arg(short, long)]
        text: Option<PathBuf>,

        /// Image file; repeat for several
        #[arg(short, long = "image")]
        images: Vec<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan() {
        let cli = Cli::try_parse_from([
            "spamlens", "scan", "--text", "mail.txt", "-i", "a.png", "-i", "b.jpg", "--seed",
            "7",
        ])
        .unwrap();

        assert_eq!(cli.engine.seed, Some(7));
        match cli.command {
            Commands::Scan { text, images } => {
                assert_eq!(text, Some(PathBuf::from("mail.txt")));
                assert_eq!(images.len(), 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_seed_conflicts_with_no_jitter() {
        let parsed =
            Cli::try_parse_from(["spamlens", "--seed", "1", "--no-jitter", "text", "-"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_images_requires_files() {
        assert!(Cli::try_parse_from(["spamlens", "images"]).is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        let config = EngineArgs::default().resolve().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_resolve_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "jitter:\n  mode: none\nmax_parallel_images: 2").unwrap();

        let args = EngineArgs {
            config: Some(file.path().to_path_buf()),
            catalog: Some(PathBuf::from("phrases.yaml")),
            seed: Some(42),
            max_parallel_images: Some(8),
            ..Default::default()
        };
        let config = args.resolve().unwrap();

        assert_eq!(config.jitter, JitterMode::Seeded { seed: 42 });
        assert_eq!(config.max_parallel_images, 8);
        assert_eq!(config.catalog_path, Some(PathBuf::from("phrases.yaml")));
    }

    #[test]
    fn test_resolve_rejects_zero_parallelism() {
        let args = EngineArgs {
            max_parallel_images: Some(0),
            ..Default::default()
        };
        assert!(args.resolve().is_err());
    }
}
