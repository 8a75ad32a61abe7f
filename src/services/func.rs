use crate::{Container, InjectResult, Request, RequestInfo, Service, ServiceInfo};

/// A constructor for instances of a service. All functions of arity 12 or
/// less are automatically service factories if the arguments to that function
/// are valid requests and the return value is a valid service type. The arity
/// of the constructor and the contract requested by each parameter are taken
/// from the function's signature.
///
/// ## Type parameters
/// * `D` - Tuple of this service's dependencies.
///
/// ## Example
///
/// ```
/// use runtime_ioc::{Container, RequestInfo, ServiceFactory, Svc};
///
/// #[derive(Default)]
/// struct Foo;
/// struct Bar(Svc<Foo>);
///
/// let mut container = Container::new();
/// container.register_type::<Foo, _>().unwrap();
///
/// let mut factory = |foo: Svc<Foo>| Bar(foo);
/// let _bar: Bar = factory.invoke(&container, &RequestInfo::new()).unwrap();
/// ```
///
/// Constructors with more than 12 parameters are not service factories:
///
/// ```compile_fail
/// use runtime_ioc::{Container, Svc};
///
/// #[derive(Default)]
/// struct A;
/// struct Big(
///     Svc<A>, Svc<A>, Svc<A>, Svc<A>, Svc<A>, Svc<A>, Svc<A>,
///     Svc<A>, Svc<A>, Svc<A>, Svc<A>, Svc<A>, Svc<A>,
/// );
///
/// let mut container = Container::new();
/// container.register_constructor::<Big, _, _>(Big).unwrap();
/// ```
pub trait ServiceFactory<D>: 'static {
    /// The resulting service from invoking this service factory.
    type Result: Service;

    /// Invokes this service factory, creating an instance of the service.
    fn invoke(
        &mut self,
        container: &Container,
        request_info: &RequestInfo,
    ) -> InjectResult<Self::Result>;

    /// The contracts which must be registered to invoke this factory, in
    /// parameter order.
    #[must_use]
    fn requirements() -> Vec<ServiceInfo>;
}

macro_rules! impl_provider_function {
    () => {
        impl_provider_function!(@impl ());
    };
    ($first:ident $(, $rest:ident)*) => {
        impl_provider_function!(@impl ($first $(, $rest)*));
        impl_provider_function!($($rest),*);
    };
    (@impl ($($type_name:ident),*)) => {
        impl<F, R $(, $type_name)*> ServiceFactory<($($type_name,)*)> for F
        where
            F: 'static + FnMut($($type_name),*) -> R,
            R: Service,
            $($type_name: Request,)*
        {
            type Result = R;

            #[allow(unused_variables)]
            fn invoke(
                &mut self,
                container: &Container,
                request_info: &RequestInfo,
            ) -> InjectResult<Self::Result> {
                let result = self($(
                    match <$type_name as Request>::request(container, request_info) {
                        Ok(dependency) => dependency,
                        Err($crate::InjectError::NotRegistered { service_info }) => {
                            return Err($crate::InjectError::MissingDependency {
                                dependency_info: service_info,
                                service_info: ServiceInfo::of::<R>(),
                            })
                        },
                        Err(error) => return Err(error),
                    }
                ),*);
                Ok(result)
            }

            #[allow(unused_mut)]
            fn requirements() -> Vec<ServiceInfo> {
                let mut requirements = Vec::new();
                $(requirements.extend(<$type_name as Request>::requirements());)*
                requirements
            }
        }
    };
}

impl_provider_function!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
