use crate::{Factory, InterfaceFor, Request, Service};

/// A service which declares the constructor the container uses to inject it.
/// The dependencies are listed as a tuple of requests, in the order the
/// constructor consumes them.
///
/// # Example
///
/// ```
/// use runtime_ioc::{Container, Inject, Svc};
///
/// #[derive(Default)]
/// struct Engine;
///
/// struct Car {
///     engine: Svc<Engine>,
/// }
///
/// impl Inject for Car {
///     type Dependencies = (Svc<Engine>,);
///
///     fn inject((engine,): Self::Dependencies) -> Self {
///         Car { engine }
///     }
/// }
///
/// let mut container = Container::new();
/// container.register_type::<Engine, _>().unwrap();
/// container.register_type::<Car, _>().unwrap();
///
/// let _car: Svc<Car> = container.resolve().unwrap();
/// ```
pub trait Inject: Service + Sized {
    /// The requests made to construct this service.
    type Dependencies: Request;

    /// Constructs the service from its resolved dependencies.
    fn inject(dependencies: Self::Dependencies) -> Self;
}

/// Constructs instances of `Self` by default-construction.
pub enum ByDefault {}

/// Constructs instances of `Self` through its [`Inject`] implementation.
pub enum ByInjection {}

/// Selects the factory used when a type is registered without an explicit
/// constructor. Default-constructible types are constructed with
/// [`Default`], and types implementing [`Inject`] are injected. The marker
/// `K` is normally inferred with `_`.
///
/// A type that is both [`Default`] and [`Inject`] is ambiguous, and the
/// marker must be named explicitly:
///
/// ```compile_fail
/// use runtime_ioc::{Container, Inject};
///
/// #[derive(Default)]
/// struct Foo;
///
/// impl Inject for Foo {
///     type Dependencies = ();
///
///     fn inject((): ()) -> Self {
///         Foo
///     }
/// }
///
/// let mut container = Container::new();
/// container.register_type::<Foo, _>().unwrap();
/// ```
///
/// ```
/// use runtime_ioc::{ByInjection, Container, Inject};
///
/// #[derive(Default)]
/// struct Foo;
///
/// impl Inject for Foo {
///     type Dependencies = ();
///
///     fn inject((): ()) -> Self {
///         Foo
///     }
/// }
///
/// let mut container = Container::new();
/// container.register_type::<Foo, ByInjection>().unwrap();
/// ```
pub trait Construct<K>: Service + Sized {
    /// Creates the factory for the contract `C` implemented by this type.
    fn factory<C>() -> Factory<C>
    where
        C: ?Sized + InterfaceFor<Self>;
}

impl<T: Service + Default> Construct<ByDefault> for T {
    fn factory<C>() -> Factory<C>
    where
        C: ?Sized + InterfaceFor<Self>,
    {
        Factory::new_default::<T>()
    }
}

impl<T: Inject> Construct<ByInjection> for T {
    fn factory<C>() -> Factory<C>
    where
        C: ?Sized + InterfaceFor<Self>,
    {
        Factory::inject::<T>()
    }
}
