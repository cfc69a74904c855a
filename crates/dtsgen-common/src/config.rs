use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer};

/// Accept both `true` and `"true"` for boolean options.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(false),
        Some(BoolOrString::Bool(b)) => Ok(b),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{}'. Expected true, false, 'true', or 'false'",
                s
            ))),
        },
    }
}

fn default_cache_dir() -> String {
    "apis".to_string()
}

fn default_output_dir() -> String {
    "declarations".to_string()
}

fn default_replacements_dir() -> String {
    "replacements".to_string()
}

/// Generator configuration, read from a JSON file with camelCase keys.
///
/// `ambientTypes` from older configuration files is ignored: the ambient
/// registry is always rebuilt from the symbol sources of the run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,
    /// Raw type token -> replacement token, consulted before resolution.
    #[serde(default)]
    pub substituted_types: IndexMap<String, String>,
    /// Namespace symbols listed here are extracted as enums.
    #[serde(default)]
    pub enums: FxHashMap<String, serde_json::Value>,
    /// Module glob -> ordered replacement rules for the rendered text.
    #[serde(default)]
    pub post_processing: IndexMap<String, Vec<PostProcessRule>>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub cache_apis: bool,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Hand-written declaration files copied over the generated output.
    #[serde(default = "default_replacements_dir")]
    pub replacements_dir: String,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            connection: ConnectionConfig::default(),
            substituted_types: IndexMap::new(),
            enums: FxHashMap::default(),
            post_processing: IndexMap::new(),
            cache_apis: false,
            cache_dir: default_cache_dir(),
            output_dir: default_output_dir(),
            replacements_dir: default_replacements_dir(),
            log_level: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Whether a namespace symbol should be extracted as an enum.
    pub fn is_enum_namespace(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    /// Cache file name for an endpoint (`sap/m/api.json` -> `sap.m.api.json`).
    pub fn cache_file_name(endpoint: &str) -> String {
        endpoint.replace('/', ".")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    #[serde(default)]
    pub root: String,
    #[serde(default)]
    pub endpoints: Vec<String>,
}

/// One textual replacement applied to a rendered module.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostProcessRule {
    pub search_string: String,
    #[serde(default)]
    pub replacement: String,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub is_regex: bool,
    #[serde(default)]
    pub regex_flags: Option<String>,
}
