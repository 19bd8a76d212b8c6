//! Named colormap registry.
//!
//! The registry is built once at startup and handed by reference to whatever
//! needs to colorize. It is never mutated after construction in normal use, so
//! sharing `&ColormapRegistry` across threads needs no locking.

use std::collections::HashMap;
use tracing::debug;

use super::colormap::Colormap;
use super::presets;
use crate::error::{DepthvizError, Result};
use crate::logging::log_timed_operation;

/// Mapping from colormap name to colormap
#[derive(Debug, Clone, Default)]
pub struct ColormapRegistry {
    maps: HashMap<String, Colormap>,
}

impl ColormapRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in `rainbow` and `magma` colormaps
    pub fn with_builtins(resolution: usize) -> Result<Self> {
        log_timed_operation("build_colormaps", || -> Result<Self> {
            let mut registry = Self::new();
            registry.register("rainbow", presets::opencv_rainbow(resolution)?);
            registry.register("magma", presets::magma(resolution)?);
            Ok(registry)
        })
    }

    /// Insert a colormap under `name`, returning the entry it replaced
    pub fn register(&mut self, name: &str, colormap: Colormap) -> Option<Colormap> {
        debug!(
            colormap = name,
            samples = colormap.len(),
            "Registering colormap"
        );
        self.maps.insert(name.to_string(), colormap)
    }

    /// Get a colormap by name
    pub fn lookup(&self, name: &str) -> Result<&Colormap> {
        self.maps
            .get(name)
            .ok_or_else(|| DepthvizError::UnknownColormap {
                name: name.to_string(),
            })
    }

    /// Check if a colormap is registered
    pub fn contains(&self, name: &str) -> bool {
        self.maps.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.maps.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormaps::builder::build_from_control_points;
    use crate::colormaps::ControlPoint;

    fn two_tone(name: &str, end: [f32; 3]) -> Colormap {
        let points = [
            ControlPoint::new(0.0, [0.0, 0.0, 0.0]),
            ControlPoint::new(1.0, end),
        ];
        build_from_control_points(name, &points, 16).unwrap()
    }

    #[test]
    fn test_builtins_registered() {
        let registry = ColormapRegistry::with_builtins(1000).unwrap();
        assert_eq!(registry.names(), vec!["magma", "rainbow"]);
        assert_eq!(registry.lookup("rainbow").unwrap().len(), 1000);
        assert_eq!(registry.lookup("magma").unwrap().len(), 1000);
    }

    #[test]
    fn test_lookup_returns_registered_value() {
        let mut registry = ColormapRegistry::new();
        let cmap = two_tone("red", [1.0, 0.0, 0.0]);
        assert!(registry.register("red", cmap.clone()).is_none());
        assert_eq!(registry.lookup("red").unwrap(), &cmap);
    }

    #[test]
    fn test_register_last_write_wins() {
        let mut registry = ColormapRegistry::new();
        let red = two_tone("red", [1.0, 0.0, 0.0]);
        let blue = two_tone("blue", [0.0, 0.0, 1.0]);

        registry.register("accent", red.clone());
        let previous = registry.register("accent", blue.clone());

        assert_eq!(previous, Some(red));
        assert_eq!(registry.lookup("accent").unwrap(), &blue);
    }

    #[test]
    fn test_unknown_colormap() {
        let registry = ColormapRegistry::with_builtins(16).unwrap();
        assert!(!registry.contains("nonexistent"));
        assert!(matches!(
            registry.lookup("nonexistent"),
            Err(DepthvizError::UnknownColormap { name }) if name == "nonexistent"
        ));
    }
}
