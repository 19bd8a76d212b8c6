//! depthviz - colormaps and run bookkeeping for depth/pose training
//!
//! This is the command-line entry point.

use anyhow::Context;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};

use depthviz::array_file::{load_array, save_array};
use depthviz::config::Command;
use depthviz::naming::{save_path_now, ExperimentArgs};
use depthviz::{
    init_tracing, log_error, log_operation_end, log_operation_start, ColormapRegistry, Config,
    MaxValue, TensorColorizer, TensorInput,
};

fn main() -> anyhow::Result<()> {
    let (config, command) = Config::load().context("Failed to load configuration")?;

    init_tracing(&config.log_level);
    info!("Starting depthviz v{}", env!("CARGO_PKG_VERSION"));

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    match command {
        Command::Render {
            input,
            output,
            colormap,
            max_value,
            dump,
        } => {
            let colormap = colormap.unwrap_or_else(|| config.colormaps.default_colormap.clone());
            let max_value = max_value.unwrap_or_else(|| config.default_max_value());
            render(&config, &input, &output, &colormap, max_value, dump.as_deref())
        }
        Command::SavePath { args, defaults } => {
            let args: ExperimentArgs = read_json(&args)?;
            let defaults = match defaults {
                Some(path) => read_json(&path)?,
                None => ExperimentArgs::default(),
            };
            println!("{}", save_path_now(&args, &defaults).display());
            Ok(())
        }
        Command::Colormaps => {
            let registry = ColormapRegistry::with_builtins(config.colormaps.resolution)?;
            for name in registry.names() {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

fn render(
    config: &Config,
    input: &Path,
    output: &Path,
    colormap: &str,
    max_value: MaxValue,
    dump: Option<&Path>,
) -> anyhow::Result<()> {
    let start = Instant::now();
    log_operation_start("render", Some(&input.display().to_string()));

    let result = render_image(config, input, output, colormap, max_value, dump);

    log_operation_end("render", start, result.is_ok());
    if let Err(e) = &result {
        log_error(e, "render");
    }
    result.with_context(|| format!("Failed to render {}", input.display()))
}

/// Colorize one array file and write the PNG (and optional float dump)
fn render_image(
    config: &Config,
    input: &Path,
    output: &Path,
    colormap: &str,
    max_value: MaxValue,
    dump: Option<&Path>,
) -> depthviz::Result<()> {
    let registry = ColormapRegistry::with_builtins(config.colormaps.resolution)?;
    let colorizer = TensorColorizer::new(&registry);

    let tensor = TensorInput::from_dyn(load_array(input)?)?;
    let image = colorizer.tensor_to_image(&tensor, max_value, colormap)?;

    image.to_rgb8().save(output)?;
    if let Some(dump) = dump {
        save_array(dump, image.as_array())?;
    }

    info!(
        input = %input.display(),
        output = %output.display(),
        colormap = colormap,
        height = image.height(),
        width = image.width(),
        "Rendered image"
    );
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
