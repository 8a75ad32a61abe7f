use crate::{
    Container, InjectError, InjectResult, Inject, InterfaceFor, RequestInfo,
    Service, ServiceFactory, ServiceInfo, Svc,
};
use derive_more::Display;
use std::error::Error;

type CreateFn<C> = dyn FnMut() -> InjectResult<Svc<C>>;
type InjectFn<C> = dyn FnMut(&Container, &RequestInfo) -> InjectResult<Svc<C>>;

/// The kind of a [`Factory`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Display)]
pub enum FactoryKind {
    /// Default-constructs the implementation.
    #[display(fmt = "new")]
    New,

    /// Invokes a user-supplied callback.
    #[display(fmt = "function")]
    Function,

    /// Constructs the implementation with dependencies resolved from the
    /// container.
    #[display(fmt = "inject")]
    Inject,
}

/// Produces new instances of the contract `C`. Every call to
/// [`Factory::create`] produces a new instance, and the container never
/// retains the instances it produced.
pub enum Factory<C: ?Sized + Service> {
    /// Default-constructs the implementation each time.
    New {
        /// The type being constructed.
        implementation: ServiceInfo,
        /// Creates and upcasts the implementation.
        create: fn() -> Svc<C>,
    },

    /// Invokes a callback each time.
    Function(Box<CreateFn<C>>),

    /// Resolves the implementation's dependencies and invokes its constructor
    /// each time.
    Inject {
        /// The type being constructed.
        implementation: ServiceInfo,
        /// The contracts required by the constructor, in parameter order.
        dependencies: Vec<ServiceInfo>,
        /// Resolves the dependencies and invokes the constructor.
        create: Box<InjectFn<C>>,
    },
}

impl<C: ?Sized + Service> Factory<C> {
    /// Creates a factory which default-constructs `I`.
    #[must_use]
    pub fn new_default<I>() -> Self
    where
        I: Service + Default,
        C: InterfaceFor<I>,
    {
        Factory::New {
            implementation: ServiceInfo::of::<I>(),
            create: default_instance::<C, I>,
        }
    }

    /// Creates a factory which invokes a callback.
    ///
    /// ```
    /// use runtime_ioc::{Container, Factory, Svc};
    ///
    /// trait Reader {
    ///     fn read(&self) -> String;
    /// }
    ///
    /// struct Constant;
    /// impl Reader for Constant {
    ///     fn read(&self) -> String {
    ///         "hello".to_owned()
    ///     }
    /// }
    ///
    /// let mut container = Container::new();
    /// container
    ///     .register_factory(Factory::<dyn Reader>::function(|| Box::new(Constant)))
    ///     .unwrap();
    ///
    /// let reader: Svc<dyn Reader> = container.resolve().unwrap();
    /// assert_eq!("hello", reader.read());
    /// ```
    #[must_use]
    pub fn function<F>(mut factory: F) -> Self
    where
        F: 'static + FnMut() -> Svc<C>,
    {
        Factory::Function(Box::new(move || -> InjectResult<Svc<C>> {
            Ok(factory())
        }))
    }

    /// Creates a factory which invokes a callback that may fail. Errors are
    /// returned from resolution as [`InjectError::ActivationFailed`].
    #[must_use]
    pub fn fallible<F, E>(mut factory: F) -> Self
    where
        F: 'static + FnMut() -> Result<Svc<C>, E>,
        E: Error + 'static,
    {
        Factory::Function(Box::new(move || {
            factory().map_err(|error| InjectError::ActivationFailed {
                service_info: ServiceInfo::of::<C>(),
                inner: Box::new(error),
            })
        }))
    }

    /// Creates a factory which invokes a constructor, resolving each of its
    /// parameters from the container.
    #[must_use]
    pub fn constructor<D, F>(mut factory: F) -> Self
    where
        F: ServiceFactory<D>,
        C: InterfaceFor<F::Result>,
    {
        Factory::Inject {
            implementation: ServiceInfo::of::<F::Result>(),
            dependencies: F::requirements(),
            create: Box::new(
                move |container: &Container, request_info: &RequestInfo| {
                    let service = factory.invoke(container, request_info)?;
                    Ok(C::upcast(Svc::new(service)))
                },
            ),
        }
    }

    /// Creates a factory which constructs `I` through its [`Inject`]
    /// implementation.
    #[must_use]
    pub fn inject<I>() -> Self
    where
        I: Inject,
        C: InterfaceFor<I>,
    {
        Factory::constructor::<(I::Dependencies,), _>(I::inject)
    }

    /// Gets the kind of this factory.
    #[must_use]
    pub fn kind(&self) -> FactoryKind {
        match self {
            Factory::New { .. } => FactoryKind::New,
            Factory::Function(_) => FactoryKind::Function,
            Factory::Inject { .. } => FactoryKind::Inject,
        }
    }

    /// Gets the type this factory constructs. Callbacks may return any
    /// implementation, so they report the contract itself.
    #[must_use]
    pub fn implementation(&self) -> ServiceInfo {
        match self {
            Factory::New { implementation, .. }
            | Factory::Inject { implementation, .. } => *implementation,
            Factory::Function(_) => ServiceInfo::of::<C>(),
        }
    }

    /// Gets the contracts that must be registered for this factory to
    /// succeed, in parameter order.
    #[must_use]
    pub fn dependencies(&self) -> &[ServiceInfo] {
        match self {
            Factory::Inject { dependencies, .. } => dependencies,
            Factory::New { .. } | Factory::Function(_) => &[],
        }
    }

    /// Produces a new instance of the contract.
    pub fn create(
        &mut self,
        container: &Container,
        request_info: &RequestInfo,
    ) -> InjectResult<Svc<C>> {
        match self {
            Factory::New { create, .. } => Ok(create()),
            Factory::Function(create) => create(),
            Factory::Inject { create, .. } => create(container, request_info),
        }
    }
}

fn default_instance<C, I>() -> Svc<C>
where
    C: ?Sized + InterfaceFor<I>,
    I: Service + Default,
{
    C::upcast(Svc::new(I::default()))
}

#[cfg(test)]
mod tests {
    use super::{Factory, FactoryKind};
    use crate::{Container, InjectError, RequestInfo, ServiceInfo, Svc};
    use std::{error::Error, fmt};

    #[derive(Default)]
    struct Leaf(u8);

    struct Branch(Svc<Leaf>);

    #[derive(Debug)]
    struct Failure;

    impl fmt::Display for Failure {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "failure")
        }
    }

    impl Error for Failure {}

    #[test]
    fn new_factory_reports_its_implementation() {
        let mut factory = Factory::<Leaf>::new_default::<Leaf>();
        assert_eq!(FactoryKind::New, factory.kind());
        assert_eq!(ServiceInfo::of::<Leaf>(), factory.implementation());
        assert!(factory.dependencies().is_empty());

        let leaf = factory
            .create(&Container::new(), &RequestInfo::new())
            .unwrap();
        assert_eq!(0, leaf.0);
    }

    #[test]
    fn constructor_factory_records_dependencies() {
        let factory = Factory::<Branch>::constructor(Branch);
        assert_eq!(FactoryKind::Inject, factory.kind());
        assert_eq!(ServiceInfo::of::<Branch>(), factory.implementation());
        assert_eq!(&[ServiceInfo::of::<Leaf>()], factory.dependencies());
    }

    #[test]
    fn constructor_factory_resolves_from_container() {
        let mut container = Container::new();
        container.register_fn::<Leaf, _>(|| Svc::new(Leaf(7))).unwrap();

        let mut factory = Factory::<Branch>::constructor(Branch);
        let branch = factory.create(&container, &RequestInfo::new()).unwrap();
        assert_eq!(7, branch.0 .0);
    }

    #[test]
    fn constructor_factory_reports_missing_dependency() {
        let mut factory = Factory::<Branch>::constructor(Branch);
        match factory.create(&Container::new(), &RequestInfo::new()) {
            Err(InjectError::MissingDependency {
                service_info,
                dependency_info,
            }) => {
                assert_eq!(ServiceInfo::of::<Branch>(), service_info);
                assert_eq!(ServiceInfo::of::<Leaf>(), dependency_info);
            }
            Err(error) => Err(error).unwrap(),
            Ok(_) => panic!("branch should not have been created"),
        }
    }

    #[test]
    fn fallible_factory_wraps_errors() {
        let mut factory =
            Factory::<Leaf>::fallible(|| Err::<Svc<Leaf>, _>(Failure));
        assert_eq!(FactoryKind::Function, factory.kind());

        match factory.create(&Container::new(), &RequestInfo::new()) {
            Err(InjectError::ActivationFailed {
                service_info,
                inner,
            }) => {
                assert_eq!(ServiceInfo::of::<Leaf>(), service_info);
                assert_eq!("failure", inner.to_string());
            }
            Err(error) => Err(error).unwrap(),
            Ok(_) => panic!("leaf should not have been created"),
        }
    }
}
