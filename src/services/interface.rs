use crate::{Service, Svc};

/// Indicates that a type is a contract for another type. Each sized type is a
/// contract for itself, and each `dyn Trait` is a contract for the types
/// declared through the [`interface!`](crate::interface) macro.
///
/// This is used to convert the service pointer produced by an implementation
/// into a service pointer to the contract it is registered under.
pub trait InterfaceFor<T: Service>: Service {
    /// Converts an instance of the implementation into an instance of this
    /// contract.
    fn upcast(service: Svc<T>) -> Svc<Self>;
}

impl<T: Service> InterfaceFor<T> for T {
    fn upcast(service: Svc<T>) -> Svc<Self> {
        service
    }
}

/// Marks a trait as being a contract for other types. Each listed type may
/// then be registered as the implementation of `dyn Trait`.
///
/// # Example
///
/// ```
/// use runtime_ioc::{interface, Container, Svc};
///
/// trait Foo {}
///
/// #[derive(Default)]
/// struct Bar;
/// impl Foo for Bar {}
///
/// #[cfg(test)]
/// #[derive(Default)]
/// struct MockBar;
/// #[cfg(test)]
/// impl Foo for MockBar {}
///
/// // Attributes are allowed on each of the listed types.
/// interface!(
///     Foo = [
///         Bar,
///         #[cfg(test)]
///         MockBar,
///     ]
/// );
///
/// let mut container = Container::new();
/// container.register::<dyn Foo, Bar, _>().unwrap();
///
/// let _foo: Svc<dyn Foo> = container.resolve().unwrap();
/// ```
#[macro_export]
macro_rules! interface {
    ($trait:tt = [$($(#[$attr:meta])* $impl:ty),* $(,)?]) => {
        $(
            $(#[$attr])*
            impl $crate::InterfaceFor<$impl> for dyn $trait {
                fn upcast(service: $crate::Svc<$impl>) -> $crate::Svc<Self> {
                    service
                }
            }
        )*
    };
}
