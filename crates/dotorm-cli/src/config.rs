use dotorm::{EntityDef, FieldDef, FieldType, Registry, SqlType};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SchemaConfig {
    pub schema_path: PathBuf,
    pub file: SchemaFile,
}

impl SchemaConfig {
    pub fn load(schema_path: PathBuf) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(&schema_path).map_err(|e| {
            anyhow::anyhow!(
                "failed to read schema file {}: {e}",
                schema_path.display()
            )
        })?;

        let file = SchemaFile::parse(&raw, &schema_path)?;

        Ok(Self { schema_path, file })
    }

    pub fn registry(&self) -> anyhow::Result<Registry> {
        self.file.to_registry().map_err(|e| {
            anyhow::anyhow!("invalid schema {}: {e}", self.schema_path.display())
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchemaFile {
    pub version: String,

    #[serde(default, rename = "entity")]
    pub entities: Vec<EntityConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityConfig {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    /// A primitive type name or the name of another entity.
    #[serde(rename = "type")]
    pub ty: String,
}

impl SchemaFile {
    pub fn parse(raw: &str, origin: &Path) -> anyhow::Result<Self> {
        let file: SchemaFile = toml::from_str(raw).map_err(|e| {
            anyhow::anyhow!("failed to parse schema file {}: {e}", origin.display())
        })?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.version.trim() != "1" {
            anyhow::bail!("unsupported schema version: {}", self.version);
        }
        if self.entities.is_empty() {
            anyhow::bail!("at least one [[entity]] entry is required");
        }

        let mut seen = HashSet::<&str>::new();
        for e in &self.entities {
            if e.name.trim().is_empty() {
                anyhow::bail!("entity.name must not be empty");
            }
            if !seen.insert(e.name.as_str()) {
                anyhow::bail!("duplicate entity.name: {}", e.name);
            }
            for f in &e.fields {
                if f.ty.trim().is_empty() {
                    anyhow::bail!("field type must not be empty ({}.{})", e.name, f.name);
                }
            }
        }

        Ok(())
    }

    /// Build a validated registry.
    ///
    /// A field type naming a declared entity is a relation; this wins over a
    /// primitive of the same spelling.
    pub fn to_registry(&self) -> anyhow::Result<Registry> {
        let names: HashSet<&str> = self.entities.iter().map(|e| e.name.as_str()).collect();

        let mut registry = Registry::new();
        for e in &self.entities {
            let mut def = EntityDef::new(e.name.as_str());
            for f in &e.fields {
                let ty = if names.contains(f.ty.as_str()) {
                    FieldType::Entity(f.ty.clone())
                } else {
                    match f.ty.parse::<SqlType>() {
                        Ok(sql_type) => FieldType::Scalar(sql_type),
                        Err(_) => anyhow::bail!(
                            "{}.{}: '{}' is neither a type nor a declared entity",
                            e.name,
                            f.name,
                            f.ty
                        ),
                    }
                };
                def.push_field(FieldDef::new(f.name.as_str(), ty));
            }
            registry.register(def)?;
        }
        registry.validate()?;

        Ok(registry)
    }
}
