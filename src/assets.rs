use std::io;

use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::error::{FluxError, Result};

/// Textes d'aide et programmes de démonstration, embarqués dans le binaire.
#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

pub const GUIDE: &str = "guide.txt";
pub const REFERENCE: &str = "reference.txt";
pub const EXAMPLES: &str = "examples.txt";
const DEMOS: &str = "demos.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Demo {
    pub name: String,
    pub description: String,
    pub code: String,
}

#[derive(Deserialize)]
struct DemoCatalog {
    demo: Vec<Demo>,
}

/// Contenu texte d'une ressource embarquée.
pub fn text(name: &str) -> Result<String> {
    let file = Assets::get(name).ok_or_else(|| FluxError::MissingAsset(name.to_string()))?;
    String::from_utf8(file.data.into_owned())
        .map_err(|e| FluxError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

pub fn demos() -> Result<Vec<Demo>> {
    let catalog: DemoCatalog = toml::from_str(&text(DEMOS)?)?;
    Ok(catalog.demo)
}
