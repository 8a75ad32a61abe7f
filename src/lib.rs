//! Transient dependency injection with automatic constructor injection.
//!
//! A [`Container`] maps contracts (usually `dyn Trait` types) to factories
//! that produce their implementations. When an implementation's constructor
//! needs other contracts, the container discovers those parameters from the
//! constructor's signature and resolves each one from itself before invoking
//! the constructor, recursively.
//!
//! # Service lifetimes
//!
//! Every resolution is transient. Each call to [`Container::resolve`] creates
//! a new instance of the requested service and new instances of all of its
//! dependencies, and hands ownership of it to the caller through a
//! [`Svc<T>`] (a [`Box<T>`]). The container never caches, shares or destroys
//! the services it creates.
//!
//! # Factories
//!
//! Three kinds of [`Factory`] can be bound to a contract:
//!
//! - New: the implementation is default-constructible and is created with
//!   [`Default`].
//! - Function: a callback creates the instance.
//! - Inject: the implementation's constructor is invoked with each of its
//!   parameters resolved from the container. Constructors are either declared
//!   through the [`Inject`] trait or passed as functions with
//!   [`Container::register_constructor`]. Every parameter must be a
//!   [`Request`], such as [`Svc<T>`].
//!
//! # Example
//!
//! ```
//! use runtime_ioc::{interface, Container, Inject, Svc};
//! use std::error::Error;
//!
//! // Our contracts. Services depending on them don't care which concrete
//! // type implements them.
//! trait Printer {
//!     fn print(&self, data: &str) -> String;
//! }
//!
//! trait Duplicator {
//!     fn duplicate(&self, data: &str) -> Vec<String>;
//! }
//!
//! trait Reader {
//!     fn read(&self) -> String;
//! }
//!
//! #[derive(Default)]
//! struct MyPrinter;
//! impl Printer for MyPrinter {
//!     fn print(&self, data: &str) -> String {
//!         data.to_owned()
//!     }
//! }
//!
//! // This duplicator needs a printer, but doesn't care how it's implemented.
//! struct MyDuplicator {
//!     printer: Svc<dyn Printer>,
//! }
//!
//! impl Inject for MyDuplicator {
//!     type Dependencies = (Svc<dyn Printer>,);
//!
//!     fn inject((printer,): Self::Dependencies) -> Self {
//!         MyDuplicator { printer }
//!     }
//! }
//!
//! impl Duplicator for MyDuplicator {
//!     fn duplicate(&self, data: &str) -> Vec<String> {
//!         (1..=3)
//!             .map(|n| format!("{}. {}", n, self.printer.print(data)))
//!             .collect()
//!     }
//! }
//!
//! struct MyReader;
//! impl Reader for MyReader {
//!     fn read(&self) -> String {
//!         "hello".to_owned()
//!     }
//! }
//!
//! struct IoService {
//!     reader: Svc<dyn Reader>,
//!     duplicator: Svc<dyn Duplicator>,
//! }
//!
//! impl IoService {
//!     // This is just a normal constructor. The only requirement is that each
//!     // parameter is an injectable request.
//!     pub fn new(
//!         reader: Svc<dyn Reader>,
//!         duplicator: Svc<dyn Duplicator>,
//!     ) -> Self {
//!         IoService { reader, duplicator }
//!     }
//!
//!     pub fn handle(&self) -> Vec<String> {
//!         self.duplicator.duplicate(&self.reader.read())
//!     }
//! }
//!
//! // Declare which types may be registered as implementations of each
//! // contract.
//! interface!(Printer = [MyPrinter]);
//! interface!(Duplicator = [MyDuplicator]);
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     let mut container = Container::new();
//!
//!     // Transient contract => implementation
//!     container.register::<dyn Duplicator, MyDuplicator, _>()?;
//!     container.register::<dyn Printer, MyPrinter, _>()?;
//!
//!     // Transient implementation through its constructor
//!     container.register_constructor::<IoService, _, _>(IoService::new)?;
//!
//!     // Callback
//!     container.register_fn::<dyn Reader, _>(|| Box::new(MyReader))?;
//!
//!     // Every dependency can be checked before anything is created
//!     container.validate()?;
//!
//!     // Resolve with automatic dependency injection
//!     let service: Svc<IoService> = container.resolve()?;
//!     assert_eq!(vec!["1. hello", "2. hello", "3. hello"], service.handle());
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::needless_pass_by_value,
    clippy::needless_doctest_main
)]

mod container;
mod requests;
mod services;

pub use container::*;
pub use requests::*;
pub use services::*;
