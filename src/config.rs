//! Per-canvas demo settings. Defaults can be overridden with `data-*`
//! attributes on the canvas element, e.g.
//! `<canvas data-demo="bumped" data-segments="64" data-light="-2,-4,-5">`.

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Context};

use crate::geometry::{MAX_SEGMENTS, MIN_SEGMENTS};

pub const DEFAULT_SEGMENTS: u32 = 128;
pub const DEFAULT_LIGHT: [f32; 3] = [-2.0, -4.0, -5.0];
pub const DEFAULT_SCALE: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    /// One normal per triangle.
    Faceted,
    /// Interpolated normals with a procedural bump pattern.
    Bumped,
    /// Full-screen morphing blob over a gradient background.
    Blob,
}

impl FromStr for Demo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "faceted" | "flat" => Ok(Demo::Faceted),
            "bumped" | "smooth" => Ok(Demo::Bumped),
            "blob" => Ok(Demo::Blob),
            other => Err(anyhow!("Unknown demo \"{other}\".")),
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Demo::Faceted => "faceted",
            Demo::Bumped => "bumped",
            Demo::Blob => "blob",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub demo: Demo,
    pub segments: u32,
    pub light: [f32; 3],
    pub scale: f32,
    pub clear_color: [f32; 4],
    pub antialias: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            demo: Demo::Faceted,
            segments: DEFAULT_SEGMENTS,
            light: DEFAULT_LIGHT,
            scale: DEFAULT_SCALE,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            antialias: true,
        }
    }
}

fn parse_floats<const N: usize>(s: &str) -> anyhow::Result<[f32; N]> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()?;

    let arr: [f32; N] = values
        .try_into()
        .map_err(|v: Vec<f32>| anyhow!("expected {N} values, got {}", v.len()))?;
    if arr.iter().any(|v| !v.is_finite()) {
        bail!("values must be finite");
    }
    Ok(arr)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.trim() {
        "" | "true" | "1" | "on" => Ok(true),
        "false" | "0" | "off" => Ok(false),
        other => Err(anyhow!("expected true or false, got \"{other}\"")),
    }
}

impl DemoConfig {
    /// Builds a config from named attributes, `lookup("segments")` returning
    /// the value of `data-segments` if present.
    pub fn from_attributes<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = DemoConfig::default();

        if let Some(demo) = lookup("demo") {
            config.demo = demo.parse().context("Invalid data-demo")?;
        }

        if let Some(segments) = lookup("segments") {
            config.segments = segments
                .trim()
                .parse()
                .context("Invalid data-segments")?;
        }

        if let Some(light) = lookup("light") {
            config.light = parse_floats(&light).context("Invalid data-light")?;
        }

        if let Some(scale) = lookup("scale") {
            config.scale = scale.trim().parse().context("Invalid data-scale")?;
        }

        if let Some(color) = lookup("clear") {
            config.clear_color = parse_floats(&color).context("Invalid data-clear")?;
        }

        if let Some(antialias) = lookup("antialias") {
            config.antialias = parse_bool(&antialias).context("Invalid data-antialias")?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(MIN_SEGMENTS..=MAX_SEGMENTS).contains(&self.segments) {
            bail!(
                "data-segments must be between {MIN_SEGMENTS} and {MAX_SEGMENTS}, got {}.",
                self.segments
            );
        }

        if !(self.scale.is_finite() && self.scale > 0.0) {
            bail!("data-scale must be positive, got {}.", self.scale);
        }

        if self.light == [0.0; 3] {
            bail!("data-light cannot be the origin.");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(attrs: &[(&str, &str)]) -> anyhow::Result<DemoConfig> {
        let map: HashMap<String, String> = attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DemoConfig::from_attributes(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[]).unwrap();
        assert_eq!(c, DemoConfig::default());
        assert_eq!(c.segments, 128);
        assert_eq!(c.light, [-2.0, -4.0, -5.0]);
    }

    #[test]
    fn test_overrides() {
        let c = config(&[
            ("demo", "Bumped"),
            ("segments", " 64 "),
            ("light", "1, 2.5, -3"),
            ("scale", "0.5"),
            ("antialias", "false"),
        ])
        .unwrap();

        assert_eq!(c.demo, Demo::Bumped);
        assert_eq!(c.segments, 64);
        assert_eq!(c.light, [1.0, 2.5, -3.0]);
        assert_eq!(c.scale, 0.5);
        assert!(!c.antialias);
    }

    #[test]
    fn test_demo_names() {
        assert_eq!("flat".parse::<Demo>().unwrap(), Demo::Faceted);
        assert_eq!("smooth".parse::<Demo>().unwrap(), Demo::Bumped);
        assert_eq!(Demo::Blob.to_string().parse::<Demo>().unwrap(), Demo::Blob);
        assert!("cube".parse::<Demo>().is_err());
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("segments", "2")]).is_err());
        assert!(config(&[("segments", "many")]).is_err());
        assert!(config(&[("light", "1,2")]).is_err());
        assert!(config(&[("light", "0,0,0")]).is_err());
        assert!(config(&[("light", "1,inf,2")]).is_err());
        assert!(config(&[("scale", "-1")]).is_err());
        assert!(config(&[("clear", "0,0,0")]).is_err());
        assert!(config(&[("antialias", "maybe")]).is_err());
    }

    #[test]
    fn test_error_names_attribute() {
        let err = config(&[("segments", "x")]).unwrap_err();
        assert!(format!("{err:#}").contains("data-segments"));
    }
}
