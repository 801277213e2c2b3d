use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};

use flux_core::config::Config;
use flux_core::error::Result;
use flux_core::vm::debug;
use flux_core::{assets, compile, execute};

mod repl;

#[derive(Parser)]
#[command(name = "flux")]
#[command(about = "Flux : langage minimal à pile, 9 opérations, Turing-complet", version, long_about = None)]
struct Cli {
    /// Fichier de configuration (par défaut : ./flux.toml s'il existe)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile et exécute un programme Flux
    Run {
        /// Le chemin du fichier source
        file: PathBuf,
    },

    /// Compile un programme et affiche son bytecode
    Compile {
        file: PathBuf,

        /// Listing au format JSON
        #[arg(long)]
        json: bool,
    },

    /// Exécute un extrait de code passé en argument
    Eval {
        source: String,
    },

    /// Lance le mode interactif (REPL)
    #[command(alias = "interactive")]
    Repl,

    /// Guide de démarrage
    Guide,

    /// Référence complète du langage
    #[command(alias = "ref")]
    Reference,

    /// Programmes d'exemple commentés
    Examples,

    /// Exécute les programmes de démonstration
    Demo,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match dispatch(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Erreur : {}", e);
            ExitCode::FAILURE
        }
    }
}

/// `Ok(false)` : le programme exécuté a échoué (erreur déjà affichée).
fn dispatch(cli: Cli) -> Result<bool> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Run { file }) => run_file(&file, &config),
        Some(Commands::Compile { file, json }) => compile_file(&file, json),
        Some(Commands::Eval { source }) => Ok(run_source(&source, &config)),
        Some(Commands::Repl) => {
            repl::Repl::new(&config).run()?;
            Ok(true)
        }
        Some(Commands::Guide) => print_asset(assets::GUIDE),
        Some(Commands::Reference) => print_asset(assets::REFERENCE),
        Some(Commands::Examples) => print_asset(assets::EXAMPLES),
        Some(Commands::Demo) => run_demos(&config),
        None => {
            Cli::command().print_help()?;
            Ok(true)
        }
    }
}

fn read_source(file: &Path) -> Result<String> {
    fs::read_to_string(file).map_err(|e| {
        io::Error::new(e.kind(), format!("impossible de lire {}: {}", file.display(), e)).into()
    })
}

fn run_file(file: &Path, config: &Config) -> Result<bool> {
    let source = read_source(file)?;

    if config.run.banner {
        println!("Exécution de {}...", file.display());
        println!();
    }

    Ok(run_source(&source, config))
}

/// Compile et exécute sur stdin/stdout. Les erreurs sont affichées ici.
fn run_source(source: &str, config: &Config) -> bool {
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    match execute(source, &mut stdin, &mut stdout) {
        Ok(()) => {
            if config.run.trailing_newline {
                end_line(&mut stdout);
            }
            true
        }
        Err(e) => {
            // La sortie partielle reste affichée ; on passe à la ligne avant l'erreur
            if let Err(flush_err) = stdout.flush() {
                log::debug!("sortie standard non vidée : {}", flush_err);
            }
            eprintln!();
            eprintln!("{}", e);
            false
        }
    }
}

/// Passe à la ligne après la sortie d'un programme.
/// Une sortie fermée n'est pas une erreur du programme : on le trace seulement.
fn end_line<W: Write>(out: &mut W) -> bool {
    match writeln!(out).and_then(|()| out.flush()) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("saut de ligne final non écrit : {}", e);
            false
        }
    }
}

fn compile_file(file: &Path, json: bool) -> Result<bool> {
    let source = read_source(file)?;

    let chunk = match compile(&source) {
        Ok(chunk) => chunk,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(false);
        }
    };
    log::info!("{} compilé : {} instructions", file.display(), chunk.len());

    let mut stdout = io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut stdout, &debug::listing(&chunk))?;
        writeln!(stdout)?;
        return Ok(true);
    }

    writeln!(stdout, "Compilation réussie : {}", file.display())?;
    writeln!(stdout, "Instructions : {}", chunk.len())?;
    writeln!(stdout)?;
    write!(stdout, "{}", debug::disassemble_chunk(&chunk))?;
    Ok(true)
}

fn print_asset(name: &str) -> Result<bool> {
    println!("{}", assets::text(name)?);
    Ok(true)
}

fn run_demos(config: &Config) -> Result<bool> {
    let demos = assets::demos()?;
    let mut all_ok = true;

    println!("FLUX - DÉMONSTRATION");
    println!();

    for (i, demo) in demos.iter().enumerate() {
        println!("Démo {} : {}", i + 1, demo.name);
        println!("Description : {}", demo.description);
        println!("Code : {}", demo.code);
        print!("Sortie : ");

        // Les démos ne lisent rien : entrée vide
        let mut stdout = io::stdout().lock();
        if let Err(e) = execute(&demo.code, &mut io::empty(), &mut stdout) {
            eprintln!("{}", e);
            all_ok = false;
        }
        if config.run.trailing_newline {
            writeln!(stdout)?;
        }
        writeln!(stdout)?;
    }

    println!("À vous d'écrire vos propres programmes !");
    Ok(all_ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn end_line_tolerates_closed_output() {
        assert!(!end_line(&mut ClosedPipe));

        let mut out = Vec::new();
        assert!(end_line(&mut out));
        assert_eq!(out, b"\n");
    }
}
