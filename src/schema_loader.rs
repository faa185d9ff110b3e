//! Embedded JSON Schema for menu catalog files.
//!
//! The schema ships inside the binary so catalog validation does not depend on
//! where the tools are run from. Callers validate a parsed `Value` before
//! deserializing it into the typed catalog.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::sync::OnceLock;

/// Only catalog layout the tools understand.
pub const CATALOG_SCHEMA_VERSION: &str = "menu_catalog_v1";

const CATALOG_SCHEMA_SOURCE: &str = include_str!("../schema/catalog.schema.json");
const SCHEMA_VERSION_POINTER: &str = "/properties/schema_version/const";

/// Compiled catalog schema plus the version it pins.
pub(crate) struct CatalogSchema {
    pub schema_version: String,
    compiled: JSONSchema,
}

impl CatalogSchema {
    pub(crate) fn load() -> Result<Self> {
        let raw = embedded_schema()?;
        let schema_version = extract_schema_version(raw)
            .ok_or_else(|| anyhow!("catalog schema missing schema_version const"))?;
        if schema_version != CATALOG_SCHEMA_VERSION {
            bail!(
                "embedded catalog schema pins '{schema_version}', expected '{CATALOG_SCHEMA_VERSION}'"
            );
        }
        let compiled = JSONSchema::compile(raw).context("compiling catalog schema")?;
        Ok(Self {
            schema_version,
            compiled,
        })
    }

    /// Validate a parsed catalog, joining every violation into one error.
    pub(crate) fn validate(&self, instance: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let details = errors
                .map(|err| err.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            bail!("{details}");
        }
        Ok(())
    }
}

fn embedded_schema() -> Result<&'static Value> {
    static RAW: OnceLock<Result<Value, String>> = OnceLock::new();
    RAW.get_or_init(|| serde_json::from_str(CATALOG_SCHEMA_SOURCE).map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|err| anyhow!("embedded catalog schema is not valid JSON: {err}"))
}

fn extract_schema_version(schema: &Value) -> Option<String> {
    let version = schema.pointer(SCHEMA_VERSION_POINTER).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}
