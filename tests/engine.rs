use std::io::{self, Read, Write};

use flux_core::{CompileError, FluxError, RuntimeError, VM, compile, execute};

fn run(source: &str) -> Vec<u8> {
    run_with_input(source, b"")
}

fn run_with_input(source: &str, input: &[u8]) -> Vec<u8> {
    let mut output = Vec::new();
    execute(source, &mut &input[..], &mut output).expect("execution should succeed");
    output
}

/// Sortie qui accepte `limit` octets puis échoue.
struct BrokenPipe {
    written: Vec<u8>,
    limit: usize,
}

impl Write for BrokenPipe {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written.len() + buf.len() > self.limit {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct FailingInput;

impl Read for FailingInput {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "source gone"))
    }
}

/// Entrée interrompue une fois avant de livrer ses octets.
struct InterruptedOnce {
    interrupted: bool,
    data: &'static [u8],
}

impl Read for InterruptedOnce {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.interrupted {
            self.interrupted = true;
            return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
        }
        self.data.read(buf)
    }
}

#[test]
fn countdown_prints_54321() {
    assert_eq!(run("+++++[#-]"), b"54321");
}

#[test]
fn stack_round_trip_prints_53() {
    assert_eq!(run("+++*++*/#/#"), b"53");
}

#[test]
fn sixty_five_increments_print_a() {
    let source = format!("{}.", "+".repeat(65));
    assert_eq!(run(&source), b"A");
}

#[test]
fn exhausted_input_always_yields_zero() {
    let chunk = compile(",#,#,#").unwrap();
    let mut vm = VM::new(&chunk);
    let mut output = Vec::new();
    vm.run(&mut io::empty(), &mut output).unwrap();
    assert_eq!(output, b"000");
    assert_eq!(vm.accumulator(), 0);
}

#[test]
fn hello_demo() {
    let source = format!(
        "{}.{}.{}..+++.",
        "+".repeat(72),
        "+".repeat(29),
        "+".repeat(7)
    );
    assert_eq!(run(&source), b"Hello");
}

#[test]
fn echo_until_end_of_input() {
    assert_eq!(run_with_input(",[.,]", b"flux!"), b"flux!");
}

#[test]
fn comments_do_not_change_behavior() {
    let commented = "Compte à rebours : +++++ puis [ affiche # et décrémente - ]";
    assert_eq!(run(commented), b"54321");
}

#[test]
fn repeated_runs_start_from_fresh_state() {
    let chunk = compile("+*#").unwrap();
    for _ in 0..3 {
        let mut vm = VM::new(&chunk);
        let mut output = Vec::new();
        vm.run(&mut io::empty(), &mut output).unwrap();
        assert_eq!(output, b"1");
        assert_eq!(vm.stack(), &[1]);
    }
}

#[test]
fn deep_stack_grows_without_limit() {
    // 10 000 empilements puis autant de dépilements
    let source = format!("+{}{}#", "*".repeat(10_000), "/".repeat(10_001));
    assert_eq!(run(&source), b"0");
}

#[test]
fn compile_errors_surface_through_execute() {
    let mut output = Vec::new();
    let err = execute("+]", &mut io::empty(), &mut output).unwrap_err();
    assert!(matches!(
        err,
        FluxError::Compile(CompileError::UnmatchedCloseBracket { position: 1 })
    ));
    assert!(output.is_empty());

    let err = execute("[[", &mut io::empty(), &mut output).unwrap_err();
    assert!(matches!(err, FluxError::Compile(CompileError::UnmatchedOpenBracket { count: 2 })));
}

#[test]
fn output_failure_stops_the_run_and_keeps_partial_output() {
    let chunk = compile("+++++[#-]").unwrap();
    let mut vm = VM::new(&chunk);
    let mut sink = BrokenPipe { written: Vec::new(), limit: 2 };

    let err = vm.run(&mut io::empty(), &mut sink).unwrap_err();
    let RuntimeError::Io { pc, source } = err;
    assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
    // '#' est à l'adresse 6
    assert_eq!(pc, 6);
    assert_eq!(sink.written, b"54");
    // Arrêt immédiat : le '-' de la troisième itération n'a pas été exécuté
    assert_eq!(vm.accumulator(), 3);
}

#[test]
fn input_failure_is_fatal() {
    let chunk = compile("+,#").unwrap();
    let mut vm = VM::new(&chunk);
    let mut output = Vec::new();

    let err = vm.run(&mut FailingInput, &mut output).unwrap_err();
    let RuntimeError::Io { pc, source } = err;
    assert_eq!(pc, 1);
    assert_eq!(source.kind(), io::ErrorKind::ConnectionReset);
    assert!(output.is_empty());
}

#[test]
fn interrupted_reads_are_retried() {
    let chunk = compile(",#").unwrap();
    let mut vm = VM::new(&chunk);
    let mut output = Vec::new();
    let mut input = InterruptedOnce { interrupted: false, data: b"\x07" };

    vm.run(&mut input, &mut output).unwrap();
    assert_eq!(output, b"7");
}
