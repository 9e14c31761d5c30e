//! Render orchestration.
//!
//! [`run`] owns the engine for the whole run: it launches exactly one
//! instance, renders every planned job in order, and closes the engine on
//! both the success and the error path. The first error aborts the run;
//! bitmaps already written stay on disk.

use crate::config::Config;
use crate::plan::{Job, JobKind, RenderPlan};
use crate::template::{render_template, CONTAINER_SELECTOR, DRAWABLE_SELECTOR};
use crate::{Clip, ElementHandle, Engine, Error, RenderPage, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Summary of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub output_dir: PathBuf,
    /// Bitmaps written for static sources, in render order
    pub static_outputs: Vec<PathBuf>,
    /// Bitmaps written for animated sources, in render order
    pub animated_outputs: Vec<PathBuf>,
}

impl RenderReport {
    pub fn total(&self) -> usize {
        self.static_outputs.len() + self.animated_outputs.len()
    }
}

/// Render everything `config` declares with a freshly launched engine `E`.
pub fn run<E: Engine>(config: &Config) -> Result<RenderReport> {
    let plan = RenderPlan::from_config(config)?;

    if !config.svgs_dir.is_dir() {
        warn!("Source directory {} not found", config.svgs_dir.display());
    }

    let engine = E::launch(&config.engine)?;
    let outcome = Renderer::new(&engine, config).render_plan(&plan);
    let closed = engine.close();

    match outcome {
        Ok(report) => closed.map(|_| report),
        Err(e) => {
            if let Err(close_err) = closed {
                warn!("Failed to close engine after error: {}", close_err);
            }
            Err(e)
        }
    }
}

/// Drives a borrowed engine through the render jobs of one configuration.
pub struct Renderer<'a, E: Engine> {
    engine: &'a E,
    config: &'a Config,
}

impl<'a, E: Engine> Renderer<'a, E> {
    pub fn new(engine: &'a E, config: &'a Config) -> Self {
        Self { engine, config }
    }

    /// Create the output directory if it does not exist yet
    pub fn prepare_output_dir(&self) -> Result<()> {
        let dir = &self.config.bitmaps_dir;
        if !dir.is_dir() {
            std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
        Ok(())
    }

    /// Render a full plan: static jobs first, then animated jobs.
    pub fn render_plan(&self, plan: &RenderPlan) -> Result<RenderReport> {
        self.prepare_output_dir()?;

        let mut report = RenderReport {
            output_dir: self.config.bitmaps_dir.clone(),
            ..Default::default()
        };

        info!("Rendering static cursors...");
        for job in plan.static_jobs() {
            report.static_outputs.push(self.render_static(job)?);
        }

        info!("Rendering animated cursors...");
        for job in plan.animated_jobs() {
            report.animated_outputs.extend(self.render_animated(job)?);
        }

        info!(
            "Bitmaps stored at {} ({} files). Render done.",
            report.output_dir.display(),
            report.total()
        );
        Ok(report)
    }

    /// Capture one static source at the drawable's natural bounds.
    pub fn render_static(&self, job: &Job) -> Result<PathBuf> {
        let markup = self.read_source(&job.source)?;
        let out = self.output_path(&job.outputs[0]);

        self.with_drawable(&markup, |page, drawable| {
            let png = page.screenshot(drawable, None)?;
            write_bitmap(&out, &png)
        })?;
        Ok(out)
    }

    /// Capture every frame of an animated source through one page.
    ///
    /// The document does not change between frames, so the page and the
    /// located drawable are reused and only the clip is applied per capture.
    pub fn render_animated(&self, job: &Job) -> Result<Vec<PathBuf>> {
        let frames = match job.kind {
            JobKind::Animated { frames } => frames,
            JobKind::Static => {
                return Err(Error::ConfigError(format!("{} is not an animated source", job.source)));
            }
        };
        debug_assert_eq!(job.outputs.len(), frames as usize);

        let markup = self.read_source(&job.source)?;
        let clip: Clip = self.config.animated_clip;

        self.with_drawable(&markup, |page, drawable| {
            let mut written = Vec::with_capacity(job.outputs.len());
            for (index, name) in job.outputs.iter().enumerate() {
                let out = self.output_path(name);
                let png = page.screenshot(drawable, Some(clip))?;
                write_bitmap(&out, &png)?;
                debug!("{} frame {}/{} rendered at {}", job.source, index + 1, frames, out.display());
                written.push(out);
            }
            Ok(written)
        })
    }

    fn read_source(&self, source: &str) -> Result<String> {
        let path = self.config.source_path(source);
        let text = std::fs::read_to_string(&path).map_err(|e| Error::Read {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        if text.trim().is_empty() {
            return Err(Error::Read {
                path,
                reason: "file is empty".into(),
            });
        }
        Ok(text)
    }

    fn output_path(&self, name: &str) -> PathBuf {
        self.config.bitmaps_dir.join(name)
    }

    /// Open a page with `markup` loaded, hand its drawable to `capture`, and
    /// close the page afterwards whatever the outcome.
    fn with_drawable<T>(
        &self,
        markup: &str,
        capture: impl FnOnce(&mut E::Page, &ElementHandle) -> Result<T>,
    ) -> Result<T> {
        let html = render_template(markup);
        let mut page = self.engine.new_page()?;

        let outcome = self
            .load_drawable(&mut page, &html)
            .and_then(|drawable| capture(&mut page, &drawable));
        let closed = page.close();

        match outcome {
            Ok(value) => closed.map(|_| value),
            Err(e) => {
                if let Err(close_err) = closed {
                    warn!("Failed to close page after error: {}", close_err);
                }
                Err(e)
            }
        }
    }

    fn load_drawable(&self, page: &mut E::Page, html: &str) -> Result<ElementHandle> {
        page.set_content(html)?;
        page.wait_for_element(CONTAINER_SELECTOR, self.config.engine.wait_timeout())?;
        page.find_element(DRAWABLE_SELECTOR)
    }
}

fn write_bitmap(path: &Path, png: &[u8]) -> Result<()> {
    if png.is_empty() {
        return Err(Error::Capture(format!("engine returned no data for {}", path.display())));
    }
    std::fs::write(path, png).map_err(|e| Error::io(path, e))?;
    debug!("Wrote {}", path.display());
    Ok(())
}
