use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use super::IterationMetrics;

/// Writes one gzip compressed JSON record per iteration, named after the checkpoint being trained.
pub struct SelfLearnPersistance {
    games_dir: PathBuf,
    checkpoint_name: String,
}

impl SelfLearnPersistance {
    pub fn new(games_dir: PathBuf, checkpoint_name: String) -> Result<Self> {
        fs::create_dir_all(&games_dir)
            .with_context(|| format!("Failed to create games dir {:?}", games_dir))?;

        Ok(Self {
            games_dir,
            checkpoint_name,
        })
    }

    pub fn write(&mut self, metrics: &IterationMetrics) -> Result<PathBuf> {
        let file_path = self.file_path_for_iteration(metrics.iteration());
        let file = File::create(&file_path)
            .with_context(|| format!("Failed to create {:?}", file_path))?;
        let mut compressor = GzEncoder::new(file, Compression::default());
        serde_json::to_writer(&mut compressor, metrics)?;
        compressor.finish()?;

        Ok(file_path)
    }

    pub fn read(path: &Path) -> Result<IterationMetrics> {
        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        let content = GzDecoder::new(file);
        let metrics = serde_json::from_reader(content)?;
        Ok(metrics)
    }

    /// Every record written for this checkpoint, oldest iteration first.
    pub fn records(&self) -> Result<Vec<PathBuf>> {
        let prefix = format!("{}_", self.checkpoint_name);
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.games_dir)?
            .flatten()
            .filter(|p| p.file_type().is_ok_and(|p| p.is_file()))
            .map(|p| p.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix) && n.ends_with(".gz"))
            })
            .collect();

        paths.sort();

        Ok(paths)
    }

    fn file_path_for_iteration(&self, iteration: usize) -> PathBuf {
        self.games_dir
            .join(format!("{}_{:0>5}.gz", self.checkpoint_name, iteration))
    }
}
