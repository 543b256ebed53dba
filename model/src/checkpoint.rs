use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::EvaluatorFault;

const CHECKPOINT_EXTENSION: &str = "json.gz";

/// A directory of named, gzip compressed JSON checkpoints. Saving under an existing name replaces it.
#[derive(Clone, Debug)]
pub struct CheckpointStore {
    checkpoint_dir: PathBuf,
}

impl CheckpointStore {
    pub fn new(checkpoint_dir: impl Into<PathBuf>) -> Result<Self> {
        let checkpoint_dir = checkpoint_dir.into();
        fs::create_dir_all(&checkpoint_dir)
            .with_context(|| format!("Failed to create checkpoint dir {:?}", checkpoint_dir))?;

        Ok(Self { checkpoint_dir })
    }

    pub fn checkpoint_dir(&self) -> &Path {
        &self.checkpoint_dir
    }

    pub fn path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(EvaluatorFault::InvalidCheckpointName(name.to_string()).into());
        }

        Ok(self
            .checkpoint_dir
            .join(format!("{}.{}", name, CHECKPOINT_EXTENSION)))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Writes to a sibling temp file first so a crash mid-write leaves the previous checkpoint intact.
    pub fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let path = self.path(name)?;
        let tmp_path = path.with_extension("tmp");

        {
            let file = File::create(&tmp_path)
                .with_context(|| format!("Failed to create {:?}", tmp_path))?;
            let mut compressor = GzEncoder::new(BufWriter::new(file), Compression::default());
            serde_json::to_writer(&mut compressor, value)?;
            compressor.finish()?.flush()?;
        }

        fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to move {:?} to {:?}", tmp_path, path))?;

        Ok(path)
    }

    pub fn read<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.path(name)?;
        let file = File::open(&path).with_context(|| format!("Failed to open {:?}", path))?;
        let content = GzDecoder::new(BufReader::new(file));
        let value = serde_json::from_reader(content)
            .with_context(|| format!("Failed to read checkpoint {:?}", path))?;

        Ok(value)
    }
}
