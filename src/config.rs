use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// Nom du fichier de configuration cherché dans le répertoire courant.
pub const CONFIG_FILE: &str = "flux.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub run: RunConfig,
    pub repl: ReplConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Saut de ligne après la sortie d'un programme.
    pub trailing_newline: bool,
    /// En-tête "Exécution de ..." avant `flux run`.
    pub banner: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { trailing_newline: true, banner: true }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    pub prompt: String,
    pub history: bool,
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "flux> ".to_string(),
            history: true,
            history_file: None,
        }
    }
}

impl ReplConfig {
    /// Fichier d'historique : celui configuré, sinon `~/.flux_history`.
    pub fn history_path(&self) -> Option<PathBuf> {
        if !self.history {
            return None;
        }
        self.history_file
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".flux_history")))
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Charge un fichier donné explicitement : toute erreur est remontée.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Cherche `flux.toml` dans le répertoire courant.
    /// Absent ou invalide : on continue avec les valeurs par défaut.
    pub fn discover() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            log::debug!("aucun {} trouvé, configuration par défaut", CONFIG_FILE);
            return Config::default();
        }

        match Self::from_file(path) {
            Ok(config) => {
                log::debug!("configuration chargée depuis {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{} ignoré : {}", CONFIG_FILE, e);
                Config::default()
            }
        }
    }

    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => Ok(Self::discover()),
        }
    }
}
