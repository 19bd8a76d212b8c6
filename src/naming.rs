//! Experiment folder naming.
//!
//! A run's output folder is derived from its hyperparameters: only values that
//! differ from the defaults appear in the name, so two runs with the same
//! non-default settings land next to each other, separated by a timestamp.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Timestamp format of the innermost folder
pub const TIMESTAMP_FORMAT: &str = "%m-%d-%H:%M";

/// Hyperparameters that take part in the folder name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentArgs {
    /// Dataset directory; its last component starts the folder name
    pub data: PathBuf,
    pub epochs: usize,
    pub training_milestones: Vec<usize>,
    pub epoch_size: usize,
    pub sequence_length: usize,
    pub rotation_mode: String,
    pub batch_size: usize,
    pub lr: f64,
    pub weight_decay: f64,
    pub photo_loss_weight: f64,
    pub smooth_loss_weight: f64,
    pub nominal_displacement: f64,
}

impl Default for ExperimentArgs {
    fn default() -> Self {
        Self {
            data: PathBuf::from("data"),
            epochs: 200,
            training_milestones: Vec::new(),
            epoch_size: 0,
            sequence_length: 3,
            rotation_mode: "euler".to_string(),
            batch_size: 4,
            lr: 2e-4,
            weight_decay: 0.0,
            photo_loss_weight: 1.0,
            smooth_loss_weight: 0.0,
            nominal_displacement: 0.3,
        }
    }
}

impl ExperimentArgs {
    /// Rendered hyperparameters with their folder-name prefixes, in naming order
    fn prefixed_values(&self) -> [(&'static str, String); 10] {
        let milestones = self
            .training_milestones
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(",");

        [
            ("mls", milestones),
            ("epoch_size", self.epoch_size.to_string()),
            ("seq", self.sequence_length.to_string()),
            ("rot_", self.rotation_mode.clone()),
            ("b", self.batch_size.to_string()),
            ("lr", format!("{:?}", self.lr)),
            ("wd", format!("{:?}", self.weight_decay)),
            ("p", format!("{:?}", self.photo_loss_weight)),
            ("s", format!("{:?}", self.smooth_loss_weight)),
            ("nd", format!("{:?}", self.nominal_displacement)),
        ]
    }
}

/// Last component of the lexically normalized data path.
///
/// `.` segments are dropped and `..` cancels the segment before it. A path
/// that normalizes to nothing, a root or a leading `..` yields an empty name.
fn data_folder_name(data: &Path) -> String {
    let mut normalized: Vec<Component> = Vec::new();
    for component in data.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.last() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            _ => normalized.push(component),
        }
    }

    match normalized.last() {
        Some(Component::Normal(name)) => name.to_string_lossy().into_owned(),
        _ => String::new(),
    }
}

/// Folder name for `args`, listing every hyperparameter that differs from `defaults`
pub fn folder_name(args: &ExperimentArgs, defaults: &ExperimentArgs) -> String {
    let mut parts = vec![data_folder_name(&args.data)];

    if args.epochs != defaults.epochs {
        parts.push(format!("{}epochs", args.epochs));
    }

    for ((prefix, value), (_, default)) in args
        .prefixed_values()
        .into_iter()
        .zip(defaults.prefixed_values())
    {
        if value != default {
            parts.push(format!("{}{}", prefix, value));
        }
    }

    parts.join(",")
}

/// Output path `folder_name/timestamp`
pub fn save_path(
    args: &ExperimentArgs,
    defaults: &ExperimentArgs,
    timestamp: &NaiveDateTime,
) -> PathBuf {
    PathBuf::from(folder_name(args, defaults)).join(timestamp.format(TIMESTAMP_FORMAT).to_string())
}

/// [`save_path`] stamped with the local time
pub fn save_path_now(args: &ExperimentArgs, defaults: &ExperimentArgs) -> PathBuf {
    save_path(args, defaults, &Local::now().naive_local())
}
