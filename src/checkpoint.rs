//! Checkpoint persistence for the depth and pose networks.
//!
//! Each network state is serialized to its own file under the run folder.
//! When a checkpoint is the best so far, both files are also copied to fixed
//! `*_model_best` names.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::error::Result;
use crate::logging::log_operation_end;

/// Default checkpoint file name, prefixed per network
pub const DEFAULT_CHECKPOINT_NAME: &str = "checkpoint.pth.tar";

/// File prefixes, in save order
pub const NETWORK_PREFIXES: [&str; 2] = ["depthnet", "posenet"];

/// Path of a network's checkpoint file
pub fn checkpoint_path(save_path: &Path, prefix: &str, filename: &str) -> PathBuf {
    save_path.join(format!("{}_{}", prefix, filename))
}

/// Path of a network's best-model copy
pub fn best_model_path(save_path: &Path, prefix: &str) -> PathBuf {
    save_path.join(format!("{}_model_best.pth.tar", prefix))
}

fn write_state<T: Serialize>(path: &Path, state: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, state)?;
    writer.flush()?;
    Ok(())
}

/// Save both network states, duplicating them as best models when `is_best`
pub fn save_checkpoint<D, P>(
    save_path: &Path,
    depthnet_state: &D,
    posenet_state: &P,
    is_best: bool,
    filename: &str,
) -> Result<()>
where
    D: Serialize,
    P: Serialize,
{
    let start = Instant::now();

    let [depth_prefix, pose_prefix] = NETWORK_PREFIXES;
    let result = fs::create_dir_all(save_path)
        .map_err(Into::into)
        .and_then(|_| write_state(&checkpoint_path(save_path, depth_prefix, filename), depthnet_state))
        .and_then(|_| write_state(&checkpoint_path(save_path, pose_prefix, filename), posenet_state))
        .and_then(|_| {
            if is_best {
                for prefix in NETWORK_PREFIXES {
                    fs::copy(
                        checkpoint_path(save_path, prefix, filename),
                        best_model_path(save_path, prefix),
                    )?;
                }
            }
            Ok(())
        });

    if result.is_ok() {
        info!(
            save_path = %save_path.display(),
            filename = filename,
            is_best = is_best,
            "Checkpoint written"
        );
    }
    log_operation_end("save_checkpoint", start, result.is_ok());

    result
}

/// Read a single network state back
pub fn load_checkpoint<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
