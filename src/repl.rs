use std::io;
use std::path::PathBuf;

use rustyline::{DefaultEditor, error::ReadlineError};

use flux_core::config::Config;
use flux_core::error::{FluxError, Result};
use flux_core::execute;

const QUICK_REFERENCE: &str = "\
Référence rapide :
  +  Incrément       *  Empiler      [  Début de boucle
  -  Décrément       /  Dépiler      ]  Fin de boucle
  .  Sortie char     ,  Entrée       #  Sortie nombre";

/// Mode interactif : chaque ligne est compilée et exécutée dans une VM neuve.
pub struct Repl {
    prompt: String,
    history: Option<PathBuf>,
}

impl Repl {
    pub fn new(config: &Config) -> Self {
        Self {
            prompt: config.repl.prompt.clone(),
            history: config.repl.history_path(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new().map_err(readline_error)?;

        if let Some(path) = &self.history {
            // Premier lancement : pas encore de fichier
            if let Err(e) = editor.load_history(path) {
                log::debug!("historique non chargé ({}): {}", path.display(), e);
            }
        }

        println!("FLUX - MODE INTERACTIF");
        println!("Tapez du code Flux puis Entrée. 'exit' ou 'quit' pour quitter, 'help' pour l'aide.");
        println!();

        loop {
            match editor.readline(&self.prompt) {
                Ok(line) => {
                    let source = line.trim();
                    if source.is_empty() {
                        continue;
                    }
                    editor.add_history_entry(source).ok();

                    match source {
                        "exit" | "quit" => {
                            println!("Au revoir !");
                            break;
                        }
                        "help" => println!("{}", QUICK_REFERENCE),
                        _ => eval_line(source),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(readline_error(err)),
            }
        }

        if let Some(path) = &self.history {
            if let Err(e) = editor.save_history(path) {
                log::warn!("impossible d'enregistrer l'historique ({}): {}", path.display(), e);
            }
        }
        Ok(())
    }
}

fn eval_line(source: &str) {
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    let result = execute(source, &mut stdin, &mut stdout);
    crate::end_line(&mut stdout);
    if let Err(e) = result {
        eprintln!("{}", e);
    }
}

fn readline_error(err: ReadlineError) -> FluxError {
    FluxError::from(io::Error::other(err))
}
