//! Render settings, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Color, FlatRenderer, OnOffRenderer, PathTracer, PointLightRenderer, RenderError,
    RenderResult, Renderer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    OnOff,
    Flat,
    PointLight,
    #[default]
    PathTracer,
}

/// Sampling parameters consumed by [`crate::ImageTracer::fire_all_rays`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceOptions {
    /// Stratified antialiasing with `n × n` jittered samples per pixel;
    /// `None` fires a single ray through each pixel centre.
    pub samples_per_side: Option<u32>,
    /// Base seed of the per-pixel random streams
    pub seed: u64,
    pub bucket_size: u32,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            samples_per_side: None,
            seed: crate::Pcg::DEFAULT_INIT_STATE,
            bucket_size: crate::DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Everything needed to turn a scene into a PNG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub samples_per_side: Option<u32>,
    pub seed: u64,
    pub bucket_size: u32,
    pub renderer: RendererKind,
    pub num_of_rays: u32,
    pub max_depth: u32,
    pub roulette_depth: u32,
    pub background: [f32; 3],
    /// Key value of the luminosity normalization
    pub a_factor: f32,
    pub gamma: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            samples_per_side: None,
            seed: crate::Pcg::DEFAULT_INIT_STATE,
            bucket_size: crate::DEFAULT_BUCKET_SIZE,
            renderer: RendererKind::PathTracer,
            num_of_rays: 10,
            max_depth: 3,
            roulette_depth: 2,
            background: [0.0; 3],
            a_factor: 0.6,
            gamma: 1.0,
        }
    }
}

impl RenderSettings {
    pub fn from_json_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings: Self = serde_json::from_str(&text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::Settings(format!(
                "image size {}x{} is empty",
                self.width, self.height
            )));
        }
        if self.bucket_size == 0 {
            return Err(RenderError::Settings("bucket_size must be positive".into()));
        }
        if self.samples_per_side == Some(0) {
            return Err(RenderError::Settings(
                "samples_per_side must be positive when set".into(),
            ));
        }
        if self.renderer == RendererKind::PathTracer && self.num_of_rays == 0 {
            return Err(RenderError::Settings("num_of_rays must be positive".into()));
        }
        if !(self.a_factor > 0.0) || !(self.gamma > 0.0) {
            return Err(RenderError::Settings(format!(
                "a_factor ({}) and gamma ({}) must be positive",
                self.a_factor, self.gamma
            )));
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn background_color(&self) -> Color {
        Color::from_array(self.background)
    }

    pub fn trace_options(&self) -> TraceOptions {
        TraceOptions {
            samples_per_side: self.samples_per_side,
            seed: self.seed,
            bucket_size: self.bucket_size,
        }
    }

    pub fn build_renderer(&self) -> Box<dyn Renderer> {
        let background = self.background_color();
        match self.renderer {
            RendererKind::OnOff => Box::new(OnOffRenderer::default()),
            RendererKind::Flat => Box::new(FlatRenderer::new(background)),
            RendererKind::PointLight => Box::new(PointLightRenderer {
                background,
                ..PointLightRenderer::default()
            }),
            RendererKind::PathTracer => Box::new(PathTracer {
                background,
                num_of_rays: self.num_of_rays,
                max_depth: self.max_depth,
                roulette_depth: self.roulette_depth,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let settings = RenderSettings {
            width: 320,
            samples_per_side: Some(3),
            renderer: RendererKind::PointLight,
            background: [0.1, 0.2, 0.3],
            ..RenderSettings::default()
        };

        let json = serde_json::to_string_pretty(&settings).unwrap();
        assert!(json.contains("\"point_light\""));
        let parsed: RenderSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: RenderSettings =
            serde_json::from_str(r#"{ "width": 100, "renderer": "flat" }"#).unwrap();
        assert_eq!(parsed.width, 100);
        assert_eq!(parsed.height, RenderSettings::default().height);
        assert_eq!(parsed.renderer, RendererKind::Flat);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let zero_width = RenderSettings {
            width: 0,
            ..RenderSettings::default()
        };
        assert!(matches!(zero_width.validate(), Err(RenderError::Settings(_))));

        let zero_samples = RenderSettings {
            samples_per_side: Some(0),
            ..RenderSettings::default()
        };
        assert!(zero_samples.validate().is_err());

        let nan_gamma = RenderSettings {
            gamma: f32::NAN,
            ..RenderSettings::default()
        };
        assert!(nan_gamma.validate().is_err());
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!("lux-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "width": 16, "height": 8, "seed": 7 }"#).unwrap();

        let settings = RenderSettings::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(settings.width, 16);
        assert_eq!(settings.seed, 7);
        assert!((settings.aspect_ratio() - 2.0).abs() < 1e-6);

        let missing = RenderSettings::from_json_file("/nonexistent/lux.json");
        assert!(matches!(missing, Err(RenderError::Io(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result: Result<RenderSettings, _> = serde_json::from_str("{ width: }");
        assert!(result.is_err());
    }
}
