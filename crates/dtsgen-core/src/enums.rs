use dtsgen_common::{Symbol, module_of};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum EnumValue {
    String(String),
    Number(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumMember {
    pub name: String,
    pub value: EnumValue,
    pub description: String,
}

impl EnumMember {
    /// `Red = "Red"`
    pub fn render(&self) -> String {
        match &self.value {
            EnumValue::String(text) => format!("{} = {:?}", self.name, text),
            EnumValue::Number(text) => format!("{} = {}", self.name, text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumModel {
    pub name: String,
    pub qualified_name: String,
    pub module: String,
    pub description: String,
    pub library: String,
    pub members: Vec<EnumMember>,
}

impl EnumModel {
    /// Members take their explicit value, falling back to their own name.
    pub fn from_symbol(symbol: &Symbol, library: &str) -> Self {
        let members = symbol
            .properties
            .iter()
            .map(|property| {
                let value = match &property.value {
                    Some(value) if value.is_number() => EnumValue::Number(value.to_string()),
                    Some(value) => EnumValue::String(
                        value
                            .as_str()
                            .map(str::to_string)
                            .unwrap_or_else(|| value.to_string()),
                    ),
                    None => EnumValue::String(property.name.clone()),
                };
                EnumMember {
                    name: property.name.clone(),
                    value,
                    description: property.description.clone(),
                }
            })
            .collect();

        EnumModel {
            name: symbol.basename().to_string(),
            qualified_name: symbol.name.clone(),
            module: module_of(&symbol.module_path()),
            description: symbol.description.clone(),
            library: library.to_string(),
            members,
        }
    }
}
