use serde::{Deserialize, Serialize};

use crate::config::defaults::{
    default_diagram_height, default_diagram_model, default_diagram_scale, default_diagram_width,
    default_doc_model, default_mmdc_path, default_orchestrator_model, default_pandoc_path,
    default_subprocess_timeout, default_writer_model,
};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ModelSpec {
    pub name: String,
    #[serde(default)]
    pub temperature: f32,
}

impl ModelSpec {
    pub fn new(name: impl Into<String>, temperature: f32) -> Self {
        Self {
            name: name.into(),
            temperature,
        }
    }
}

/// One model per role. The orchestrator runs cold, the writers warm.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelsConfig {
    #[serde(default = "default_orchestrator_spec")]
    pub orchestrator: ModelSpec,
    #[serde(default = "default_writer_spec")]
    pub cover_letter: ModelSpec,
    #[serde(default = "default_doc_spec")]
    pub google_doc: ModelSpec,
    #[serde(default = "default_diagram_spec")]
    pub diagram: ModelSpec,
}

fn default_orchestrator_spec() -> ModelSpec {
    ModelSpec::new(default_orchestrator_model(), 0.0)
}

fn default_writer_spec() -> ModelSpec {
    ModelSpec::new(default_writer_model(), 0.7)
}

fn default_doc_spec() -> ModelSpec {
    ModelSpec::new(default_doc_model(), 0.7)
}

fn default_diagram_spec() -> ModelSpec {
    ModelSpec::new(default_diagram_model(), 0.7)
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            orchestrator: default_orchestrator_spec(),
            cover_letter: default_writer_spec(),
            google_doc: default_doc_spec(),
            diagram: default_diagram_spec(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GoogleConfig {
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub credentials_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RendererConfig {
    #[serde(default = "default_mmdc_path")]
    pub mmdc_path: String,
    #[serde(default = "default_diagram_width")]
    pub width: u32,
    #[serde(default = "default_diagram_height")]
    pub height: u32,
    #[serde(default = "default_diagram_scale")]
    pub scale: f32,
    #[serde(default = "default_subprocess_timeout")]
    pub timeout_secs: u64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            mmdc_path: default_mmdc_path(),
            width: default_diagram_width(),
            height: default_diagram_height(),
            scale: default_diagram_scale(),
            timeout_secs: default_subprocess_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConverterConfig {
    #[serde(default = "default_pandoc_path")]
    pub pandoc_path: String,
    #[serde(default = "default_subprocess_timeout")]
    pub timeout_secs: u64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            pandoc_path: default_pandoc_path(),
            timeout_secs: default_subprocess_timeout(),
        }
    }
}
