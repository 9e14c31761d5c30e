//! Ordered render jobs derived from a [`Config`].
//!
//! Planning is pure: it validates the configuration and fixes every output
//! file name before a browser is launched, so `--dry-run` and the renderer
//! agree on exactly what gets written.

use crate::config::Config;
use crate::frame::{animated_output_names, static_output_name};
use crate::{Error, Result};
use std::collections::HashMap;

/// What kind of capture a job performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// One capture of the drawable's natural bounding box
    Static,
    /// `frames` captures clipped to the configured crop rectangle
    Animated { frames: u32 },
}

/// One source file and the bitmaps it produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Source file name relative to the source directory
    pub source: String,
    pub kind: JobKind,
    /// Output file names in capture order
    pub outputs: Vec<String>,
}

impl Job {
    pub fn is_animated(&self) -> bool {
        matches!(self.kind, JobKind::Animated { .. })
    }
}

/// Static jobs first (listed order), then animated jobs (name order)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderPlan {
    pub jobs: Vec<Job>,
}

impl RenderPlan {
    pub fn from_config(config: &Config) -> Result<Self> {
        let clip = &config.animated_clip;
        if !config.animated_cursors.is_empty() && !(clip.width > 0.0 && clip.height > 0.0) {
            return Err(Error::ConfigError(format!(
                "animated clip must have a positive size, got {}x{}",
                clip.width, clip.height
            )));
        }

        let mut jobs = Vec::with_capacity(config.static_cursors.len() + config.animated_cursors.len());

        for source in &config.static_cursors {
            jobs.push(Job {
                source: source.clone(),
                kind: JobKind::Static,
                outputs: vec![static_output_name(source)],
            });
        }

        for (source, anim) in &config.animated_cursors {
            if anim.frames == 0 {
                return Err(Error::ConfigError(format!("{} declares zero frames", source)));
            }
            jobs.push(Job {
                source: source.clone(),
                kind: JobKind::Animated { frames: anim.frames },
                outputs: animated_output_names(source, anim.frames),
            });
        }

        let plan = Self { jobs };
        plan.check_collisions()?;
        Ok(plan)
    }

    fn check_collisions(&self) -> Result<()> {
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for job in &self.jobs {
            for out in &job.outputs {
                if let Some(prev) = owners.insert(out.as_str(), job.source.as_str()) {
                    return Err(Error::ConfigError(format!(
                        "{} and {} both render to {}",
                        prev, job.source, out
                    )));
                }
            }
        }
        Ok(())
    }

    /// Every output file name in render order
    pub fn outputs(&self) -> impl Iterator<Item = &str> {
        self.jobs.iter().flat_map(|j| j.outputs.iter().map(String::as_str))
    }

    pub fn static_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(|j| !j.is_animated())
    }

    pub fn animated_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(|j| j.is_animated())
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
