use crate::{
    Construct, Factory, FactoryKind, InjectError, InjectResult, InterfaceFor,
    Request, RequestInfo, Service, ServiceFactory, ServiceInfo, Svc,
};
use std::{
    any::Any,
    cell::RefCell,
    collections::{HashMap, HashSet},
    error::Error,
};
use tracing::{debug, trace};

struct Registration {
    implementation: ServiceInfo,
    kind: FactoryKind,
    dependencies: Vec<ServiceInfo>,

    /// A `RefCell<Factory<C>>` for the registered contract `C`.
    factory: Box<dyn Any>,
}

/// A dependency injection container. This holds the bindings between
/// contracts and the factories producing them.
///
/// Every resolution is transient: each call to [`Container::resolve`]
/// produces a new instance along with new instances of all of its
/// dependencies, and ownership of that instance is transferred to the caller.
///
/// ```
/// use runtime_ioc::{Container, Svc};
///
/// #[derive(Default)]
/// struct Foo(u8);
///
/// let mut container = Container::new();
/// container.register_type::<Foo, _>().unwrap();
///
/// let foo1: Svc<Foo> = container.resolve().unwrap();
/// let foo2: Svc<Foo> = container.resolve().unwrap();
/// assert!(!std::ptr::eq(&*foo1, &*foo2));
/// ```
///
/// The container is not thread-safe and is meant to be used from a single
/// thread.
#[derive(Default)]
pub struct Container {
    registry: HashMap<ServiceInfo, Registration>,
}

impl Container {
    /// Creates a new, empty container.
    #[must_use]
    pub fn new() -> Self {
        Container::default()
    }

    /// Binds the contract `C` to the implementation `I`. If `I` is
    /// default-constructible, it is constructed with [`Default`]. If `I`
    /// implements [`Inject`](crate::Inject), its dependencies are resolved
    /// from this container each time it is constructed. The marker `K` is
    /// normally inferred with `_`.
    ///
    /// A type that is both [`Default`] and [`Inject`](crate::Inject) must name
    /// its marker. Passing [`ByDefault`](crate::ByDefault) keeps the usual
    /// preference for default construction, while
    /// [`ByInjection`](crate::ByInjection) injects it instead.
    ///
    /// ```
    /// use runtime_ioc::{interface, Container, Inject, Svc};
    ///
    /// trait Printer {
    ///     fn print(&self, data: &str) -> String;
    /// }
    ///
    /// #[derive(Default)]
    /// struct Plain;
    /// impl Printer for Plain {
    ///     fn print(&self, data: &str) -> String {
    ///         data.to_owned()
    ///     }
    /// }
    ///
    /// struct Loud(Svc<dyn Printer>);
    /// impl Inject for Loud {
    ///     type Dependencies = (Svc<dyn Printer>,);
    ///
    ///     fn inject((inner,): Self::Dependencies) -> Self {
    ///         Loud(inner)
    ///     }
    /// }
    ///
    /// interface!(Printer = [Plain]);
    ///
    /// let mut container = Container::new();
    /// container.register::<dyn Printer, Plain, _>().unwrap();
    /// container.register::<Loud, Loud, _>().unwrap();
    ///
    /// let loud: Svc<Loud> = container.resolve().unwrap();
    /// assert_eq!("hi", loud.0.print("hi"));
    /// ```
    pub fn register<C, I, K>(&mut self) -> InjectResult<()>
    where
        C: ?Sized + InterfaceFor<I>,
        I: Construct<K>,
    {
        self.register_factory(I::factory::<C>())
    }

    /// Binds `T` to itself. This is shorthand for `register::<T, T, K>()`.
    pub fn register_type<T, K>(&mut self) -> InjectResult<()>
    where
        T: Construct<K>,
    {
        self.register::<T, T, K>()
    }

    /// Binds the contract `C` to a callback. The callback is invoked once
    /// each time the contract is resolved.
    pub fn register_fn<C, F>(&mut self, factory: F) -> InjectResult<()>
    where
        C: ?Sized + Service,
        F: 'static + FnMut() -> Svc<C>,
    {
        self.register_factory(Factory::<C>::function(factory))
    }

    /// Binds the contract `C` to a callback which may fail. Errors returned by
    /// the callback are reported as [`InjectError::ActivationFailed`].
    pub fn register_fallible<C, F, E>(&mut self, factory: F) -> InjectResult<()>
    where
        C: ?Sized + Service,
        F: 'static + FnMut() -> Result<Svc<C>, E>,
        E: Error + 'static,
    {
        self.register_factory(Factory::<C>::fallible(factory))
    }

    /// Binds the contract `C` to a constructor. Each parameter of the
    /// constructor is resolved from this container when the contract is
    /// resolved. Tuple structs can be registered through their constructors
    /// directly.
    ///
    /// ```
    /// use runtime_ioc::{Container, Svc};
    ///
    /// #[derive(Default)]
    /// struct Config;
    /// struct Database(Svc<Config>);
    ///
    /// let mut container = Container::new();
    /// container.register_type::<Config, _>().unwrap();
    /// container.register_constructor::<Database, _, _>(Database).unwrap();
    ///
    /// let _database: Svc<Database> = container.resolve().unwrap();
    /// ```
    pub fn register_constructor<C, D, F>(
        &mut self,
        constructor: F,
    ) -> InjectResult<()>
    where
        C: ?Sized + InterfaceFor<F::Result>,
        F: ServiceFactory<D>,
    {
        self.register_factory(Factory::<C>::constructor(constructor))
    }

    /// Binds the contract `C` to a factory. A contract can only be bound once,
    /// and an injected factory cannot depend on its own contract or
    /// implementation. If registration fails, the container is left
    /// unchanged.
    pub fn register_factory<C>(&mut self, factory: Factory<C>) -> InjectResult<()>
    where
        C: ?Sized + Service,
    {
        let service_info = ServiceInfo::of::<C>();
        if self.registry.contains_key(&service_info) {
            return Err(InjectError::AlreadyRegistered { service_info });
        }

        let implementation = factory.implementation();
        if let Some(&dependency_info) = factory
            .dependencies()
            .iter()
            .find(|&&dependency| {
                dependency == service_info || dependency == implementation
            })
        {
            return Err(InjectError::SelfDependency {
                service_info,
                dependency_info,
            });
        }

        let registration = Registration {
            implementation,
            kind: factory.kind(),
            dependencies: factory.dependencies().to_vec(),
            factory: Box::new(RefCell::new(factory)),
        };

        debug!(
            contract = service_info.name(),
            implementation = implementation.name(),
            kind = %registration.kind,
            arity = registration.dependencies.len(),
            "registered factory"
        );
        self.registry.insert(service_info, registration);
        Ok(())
    }

    /// Produces a new instance of the contract `C` through its registered
    /// factory.
    pub fn resolve<C: ?Sized + Service>(&self) -> InjectResult<Svc<C>> {
        self.resolve_with(&RequestInfo::new())
    }

    /// Produces a new instance of the contract `C` as part of an active
    /// request. This is used to resolve the dependencies of an injected
    /// service.
    pub fn resolve_with<C: ?Sized + Service>(
        &self,
        request_info: &RequestInfo,
    ) -> InjectResult<Svc<C>> {
        let service_info = ServiceInfo::of::<C>();
        trace!(
            contract = service_info.name(),
            depth = request_info.depth(),
            "resolving service"
        );

        let registration = self
            .registry
            .get(&service_info)
            .ok_or(InjectError::NotRegistered { service_info })?;
        let factory = registration
            .factory
            .downcast_ref::<RefCell<Factory<C>>>()
            .ok_or(InjectError::InvalidFactory { service_info })?;

        // The factory is only borrowed again while it is still producing if
        // the service depends on itself.
        let mut factory = factory.try_borrow_mut().map_err(|_| {
            let mut cycle = request_info.service_path().to_vec();
            cycle.push(service_info);
            debug!(
                contract = service_info.name(),
                "dependency cycle detected during resolution"
            );
            InjectError::CycleDetected {
                service_info,
                cycle,
            }
        })?;

        factory.create(self, &request_info.with_request(service_info))
    }

    /// Performs a request against this container. Besides service pointers,
    /// this can request optional services or several services at once.
    ///
    /// ```
    /// use runtime_ioc::{Container, Svc};
    ///
    /// #[derive(Default)]
    /// struct Foo;
    /// struct Bar;
    ///
    /// let mut container = Container::new();
    /// container.register_type::<Foo, _>().unwrap();
    ///
    /// let (foo, bar): (Svc<Foo>, Option<Svc<Bar>>) = container.get().unwrap();
    /// assert!(bar.is_none());
    /// ```
    pub fn get<R: Request>(&self) -> InjectResult<R> {
        R::request(self, &RequestInfo::new())
    }

    /// Checks whether a factory is registered for the contract `C`.
    #[must_use]
    pub fn contains<C: ?Sized + Service>(&self) -> bool {
        self.registry.contains_key(&ServiceInfo::of::<C>())
    }

    /// Gets the number of registered contracts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Checks whether no contracts are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Checks that every dependency of every injected service is registered
    /// and that no service depends on itself through its dependencies. No
    /// services are constructed. Optional dependencies are not checked.
    ///
    /// This is meant to be called once all contracts are registered so that
    /// misconfigurations are found before the first resolution.
    pub fn validate(&self) -> InjectResult<()> {
        let mut verified = HashSet::new();
        let mut path = Vec::new();
        for &service_info in self.registry.keys() {
            self.validate_service(service_info, &mut path, &mut verified)?;
        }

        debug!(contracts = self.registry.len(), "validated container");
        Ok(())
    }

    fn validate_service(
        &self,
        service_info: ServiceInfo,
        path: &mut Vec<ServiceInfo>,
        verified: &mut HashSet<ServiceInfo>,
    ) -> InjectResult<()> {
        if verified.contains(&service_info) {
            return Ok(());
        }

        if path.contains(&service_info) {
            let mut cycle = path.clone();
            cycle.push(service_info);
            return Err(InjectError::CycleDetected {
                service_info,
                cycle,
            });
        }

        let registration = self
            .registry
            .get(&service_info)
            .ok_or(InjectError::NotRegistered { service_info })?;

        path.push(service_info);
        for &dependency_info in &registration.dependencies {
            if !self.registry.contains_key(&dependency_info) {
                return Err(InjectError::MissingDependency {
                    service_info: registration.implementation,
                    dependency_info,
                });
            }

            self.validate_service(dependency_info, path, verified)?;
        }
        path.pop();

        verified.insert(service_info);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Container, Registration};
    use crate::{
        Factory, FactoryKind, InjectError, InjectResult, ServiceInfo, Svc,
    };
    use std::cell::RefCell;

    #[test]
    fn resolve_returns_error_on_invalid_factory() {
        let mut container = Container::new();
        container.registry.insert(
            ServiceInfo::of::<i32>(),
            Registration {
                implementation: ServiceInfo::of::<f32>(),
                kind: FactoryKind::New,
                dependencies: Vec::new(),
                factory: Box::new(RefCell::new(
                    Factory::<f32>::new_default::<f32>(),
                )),
            },
        );

        let bad: InjectResult<Svc<i32>> = container.resolve();
        match bad {
            Err(InjectError::InvalidFactory { service_info })
                if service_info == ServiceInfo::of::<i32>() => {}
            Err(error) => Err(error).unwrap(),
            Ok(value) => {
                panic!("Value of {} was provided by an invalid factory", value)
            }
        }
    }

    #[test]
    fn failed_registration_leaves_container_unchanged() {
        struct Node(Svc<Node>);

        let mut container = Container::new();
        container.register_type::<u8, _>().unwrap();

        assert!(container.register_type::<u8, _>().is_err());
        assert!(container.register_constructor::<Node, _, _>(Node).is_err());

        assert_eq!(1, container.len());
        assert!(container.contains::<u8>());
        assert!(!container.contains::<Node>());
    }

    #[test]
    fn validate_accepts_empty_container() {
        let container = Container::new();
        assert!(container.is_empty());
        container.validate().unwrap();
    }
}
