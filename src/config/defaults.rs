pub const DEFAULT_API_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_BASE_DIR: &str = "generated_content";
pub const DEFAULT_JOB_FILE: &str = "job_description.txt";
pub const DEFAULT_CREDENTIALS_PATH: &str = "token.json";

pub fn default_request_timeout() -> u64 {
    120
}

pub fn default_max_tool_rounds() -> usize {
    8
}

pub fn default_orchestrator_model() -> String {
    "gpt-4o".to_string()
}

pub fn default_writer_model() -> String {
    "gpt-4o".to_string()
}

pub fn default_doc_model() -> String {
    "gpt-4o-mini".to_string()
}

pub fn default_diagram_model() -> String {
    "gpt-4o".to_string()
}

pub fn default_mmdc_path() -> String {
    "mmdc".to_string()
}

pub fn default_pandoc_path() -> String {
    "pandoc".to_string()
}

pub fn default_diagram_width() -> u32 {
    1500
}

pub fn default_diagram_height() -> u32 {
    350
}

pub fn default_diagram_scale() -> f32 {
    1.2
}

pub fn default_subprocess_timeout() -> u64 {
    60
}
