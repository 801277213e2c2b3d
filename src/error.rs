use std::io;

use thiserror::Error;

/// Erreurs détectées pendant la compilation (appariement des crochets uniquement).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("erreur de compilation : ']' sans '[' correspondant à la position {position}")]
    UnmatchedCloseBracket { position: usize },

    #[error("erreur de compilation : {count} crochet(s) '[' non fermé(s)")]
    UnmatchedOpenBracket { count: usize },
}

/// Erreurs fatales pendant l'exécution. Seules les entrées/sorties peuvent échouer.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("erreur d'entrée/sortie à l'instruction {pc:04} : {source}")]
    Io {
        pc: usize,
        #[source]
        source: io::Error,
    },
}

/// Erreur unifiée pour la chaîne d'outils Flux.
#[derive(Debug, Error)]
pub enum FluxError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("erreur d'E/S : {0}")]
    Io(#[from] io::Error),

    #[error("configuration invalide : {0}")]
    Config(#[from] toml::de::Error),

    #[error("erreur JSON : {0}")]
    Json(#[from] serde_json::Error),

    #[error("ressource embarquée introuvable : {0}")]
    MissingAsset(String),
}

pub type Result<T> = std::result::Result<T, FluxError>;
