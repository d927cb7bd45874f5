//! Framing pipeline and per-load session
//!
//! [`FramingPipeline`] is the pure driver: sampling, robust bounds,
//! bounding sphere, principal axis, scale and camera planning, in that
//! order, with every stage consuming explicit values from the previous
//! one. [`ViewSession`] owns what a running viewer needs across loads: the
//! render camera, the current model with its placement, and a generation
//! counter that makes a superseded load unapplicable.

use crate::bounds_estimator::{effective_bounds, EffectiveBounds};
use crate::camera::{plan_camera, CameraPlan};
use crate::config::FramingConfig;
use crate::guard::{ensure_visible, VisibilityCorrection};
use crate::principal_axis::{principal_axis, PrincipalAxis};
use crate::scale::{plan_scale, ScalePlan};
use crate::view::Camera;
use cloudframe_core::{
    Aabb, BoundingSphere, Error, Point3f, PointCloud3f, Result, Transform3D,
};
use log::info;

/// Result-quality signal surfaced for diagnostics; never blocks rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FramingNotice {
    /// The trimmed box was replaced by the shrunk full box
    SparseTrimmedBounds { inclusion: f32 },
    /// No clearly dominant axis was found
    LowAxisConfidence { confidence: f32 },
    /// The visibility guard had to intervene after placement
    VisibilityCorrected(VisibilityCorrection),
}

/// Everything one framing pass derives from a point buffer
///
/// Created when a model finishes loading and superseded wholesale by the
/// next load; no field is ever partially updated.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFraming {
    /// Exact bounds of every point
    pub full_bounds: Aabb,
    /// Outlier-trimmed bounds driving all downstream math
    pub effective_bounds: Aabb,
    /// Fraction of points the effective bounds retain
    pub inclusion: f32,
    /// Sphere enclosing the effective bounds
    pub sphere: BoundingSphere,
    pub axis: PrincipalAxis,
    pub scale: ScalePlan,
    /// Initial camera placement, kept for restore-to-default
    pub camera: CameraPlan,
    pub large_model: bool,
    pub notices: Vec<FramingNotice>,
}

/// The synchronous analysis pipeline
#[derive(Debug, Clone)]
pub struct FramingPipeline {
    config: FramingConfig,
}

impl FramingPipeline {
    pub fn new(config: FramingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FramingConfig {
        &self.config
    }

    /// Run the full analysis over a point buffer
    ///
    /// Pure and deterministic: the same buffer and configuration always
    /// yield the same framing. Fails only on an empty buffer, non-finite
    /// coordinates, or a degenerate bounding sphere.
    pub fn frame(&self, points: &[Point3f]) -> Result<ModelFraming> {
        let n = points.len();
        let full_bounds = Aabb::from_points(points.iter()).ok_or_else(|| {
            Error::DegenerateInput("cannot frame an empty point buffer".to_string())
        })?;
        if !full_bounds.is_finite() {
            return Err(Error::DegenerateInput(
                "point buffer contains non-finite coordinates".to_string(),
            ));
        }

        let large_model = self.config.is_large_model(n);
        info!(
            "framing {} points ({} model, fast mode {})",
            n,
            if large_model { "large" } else { "normal" },
            self.config.fast_mode
        );

        let mut notices = Vec::new();

        // Fast mode trades trimming and axis analysis for latency
        let (effective, axis) = if self.config.fast_mode {
            (
                EffectiveBounds {
                    aabb: full_bounds,
                    inclusion: 1.0,
                    fallback: false,
                },
                PrincipalAxis::fallback(),
            )
        } else {
            let effective = effective_bounds(points, large_model, &self.config)?;
            let axis = principal_axis(points, &self.config);
            (effective, axis)
        };

        if effective.fallback {
            notices.push(FramingNotice::SparseTrimmedBounds {
                inclusion: effective.inclusion,
            });
        }
        if !self.config.fast_mode && axis.confidence <= 0.3 {
            notices.push(FramingNotice::LowAxisConfidence {
                confidence: axis.confidence,
            });
        }

        let sphere = BoundingSphere::from_aabb(&effective.aabb);
        let scale = plan_scale(effective.aabb.max_dimension(), sphere.radius)?;
        let scaled_radius = sphere.radius * scale.factor;
        let camera = plan_camera(&axis, scaled_radius, large_model, &self.config);

        Ok(ModelFraming {
            full_bounds,
            effective_bounds: effective.aabb,
            inclusion: effective.inclusion,
            sphere,
            axis,
            scale,
            camera,
            large_model,
            notices,
        })
    }
}

/// A model the session has loaded, with everything derived from it
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub cloud: PointCloud3f,
    /// The buffer carried a per-point color attribute (pass-through for
    /// the rendering collaborator)
    pub has_color: bool,
    pub framing: ModelFraming,
    /// Center-to-origin translation composed with the planned scale
    pub placement: Transform3D,
    /// Camera state recorded right after framing, for restore-to-default
    pub initial_view: Camera,
    /// Load this model belongs to
    pub generation: u64,
}

/// Summary handed to the UI collaborator; informational only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelInfo {
    pub point_count: usize,
    pub has_color: bool,
    pub inclusion: f32,
    pub full_max_dimension: f32,
    pub effective_max_dimension: f32,
    pub axis_confidence: f32,
    pub scale_factor: f32,
}

/// Owns the camera and at most one loaded model
///
/// Each load gets a fresh generation; derived entities never survive a
/// model switch, which removes the races the original event-driven loader
/// had between overlapping loads.
#[derive(Debug)]
pub struct ViewSession {
    pipeline: FramingPipeline,
    camera: Camera,
    generation: u64,
    current: Option<LoadedModel>,
}

impl ViewSession {
    pub fn new(config: FramingConfig) -> Result<Self> {
        let mut camera = Camera::default();
        camera.fov = config.fov_y;
        Ok(Self {
            pipeline: FramingPipeline::new(config)?,
            camera,
            generation: 0,
            current: None,
        })
    }

    /// Load a model, superseding any previous one
    ///
    /// Runs the full pipeline, places the model (centered, scaled),
    /// applies the camera plan, and lets the visibility guard check the
    /// final configuration. On error the session holds no model and the
    /// caller should show its empty/invalid state.
    pub fn load(&mut self, cloud: PointCloud3f, has_color: bool) -> Result<&LoadedModel> {
        self.generation += 1;
        self.current = None;

        let mut framing = self.pipeline.frame(cloud.as_slice())?;

        // Center on the full box, then scale to the target display size
        let center = framing.full_bounds.center();
        let mut placement = Transform3D::uniform_scaling(framing.scale.factor)
            .compose(Transform3D::translation(-center.coords));

        self.camera.apply_plan(&framing.camera);

        // Empirical check on the placed geometry; the analysis above ran
        // on pre-transform coordinates
        let placed = framing.full_bounds.transformed(&placement);
        if let Some(correction) = ensure_visible(&placed, &mut self.camera) {
            if let VisibilityCorrection::RescaledModel { factor } = correction {
                placement = Transform3D::uniform_scaling(factor).compose(placement);
            }
            framing.notices.push(FramingNotice::VisibilityCorrected(correction));
        }

        self.current = Some(LoadedModel {
            cloud,
            has_color,
            framing,
            placement,
            initial_view: self.camera.clone(),
            generation: self.generation,
        });
        Ok(self.current.as_ref().unwrap())
    }

    /// The model currently loaded, if any
    pub fn model(&self) -> Option<&LoadedModel> {
        self.current.as_ref()
    }

    /// The render camera in its current state
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Current load generation; a model from an earlier generation is stale
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Put the camera back to the view recorded at load time
    pub fn restore_initial_view(&mut self) {
        if let Some(model) = &self.current {
            self.camera = model.initial_view.clone();
        }
    }

    /// Summary for the UI collaborator
    pub fn model_info(&self) -> Option<ModelInfo> {
        self.current.as_ref().map(|model| ModelInfo {
            point_count: model.cloud.len(),
            has_color: model.has_color,
            inclusion: model.framing.inclusion,
            full_max_dimension: model.framing.full_bounds.max_dimension(),
            effective_max_dimension: model.framing.effective_bounds.max_dimension(),
            axis_confidence: model.framing.axis.confidence,
            scale_factor: model.framing.scale.factor,
        })
    }
}
