//! Reads a line from standard input and prints it three times.
//!
//! Run with `RUST_LOG=runtime_ioc=trace` to see the container at work.

use runtime_ioc::{interface, Container, Inject, Svc};
use std::{error::Error, io::BufRead};

trait Printer {
    fn print(&self, data: &str);
}

#[derive(Default)]
struct StdoutPrinter;

impl Printer for StdoutPrinter {
    fn print(&self, data: &str) {
        println!("{}", data);
    }
}

trait Duplicator {
    fn duplicate(&self, data: &str);
}

struct TripleDuplicator {
    printer: Svc<dyn Printer>,
}

impl Inject for TripleDuplicator {
    type Dependencies = (Svc<dyn Printer>,);

    fn inject((printer,): Self::Dependencies) -> Self {
        TripleDuplicator { printer }
    }
}

impl Duplicator for TripleDuplicator {
    fn duplicate(&self, data: &str) {
        for n in 1..=3 {
            self.printer.print(&format!("{}. {}", n, data));
        }
    }
}

trait Reader {
    fn read(&self) -> String;
}

struct StdinReader;

impl Reader for StdinReader {
    fn read(&self) -> String {
        let mut line = String::new();
        if let Err(error) = std::io::stdin().lock().read_line(&mut line) {
            tracing::warn!(%error, "failed to read from stdin");
        }
        line.trim_end().to_owned()
    }
}

struct IoService {
    reader: Svc<dyn Reader>,
    duplicator: Svc<dyn Duplicator>,
}

impl IoService {
    fn new(reader: Svc<dyn Reader>, duplicator: Svc<dyn Duplicator>) -> Self {
        IoService { reader, duplicator }
    }

    fn handle(&self) {
        self.duplicator.duplicate(&self.reader.read());
    }
}

interface!(Printer = [StdoutPrinter]);
interface!(Duplicator = [TripleDuplicator]);

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut container = Container::new();
    container.register::<dyn Duplicator, TripleDuplicator, _>()?;
    container.register::<dyn Printer, StdoutPrinter, _>()?;
    container.register_constructor::<IoService, _, _>(IoService::new)?;
    container.register_fn::<dyn Reader, _>(|| Box::new(StdinReader))?;
    container.validate()?;

    let service: Svc<IoService> = container.resolve()?;
    service.handle();

    Ok(())
}
