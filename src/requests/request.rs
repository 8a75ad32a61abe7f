use crate::{
    Container, InjectError, InjectResult, RequestInfo, Service, ServiceInfo,
    Svc,
};

/// A request to a container. Each parameter of an injected constructor is a
/// request, and is converted into its value by asking the container for it.
///
/// Only injectable handles are requests: service pointers, optional service
/// pointers, the [`RequestInfo`] of the active request, and tuples of
/// requests. A constructor taking any other parameter type cannot be
/// injected:
///
/// ```compile_fail
/// use runtime_ioc::Container;
///
/// struct Foo(i32);
///
/// let mut container = Container::new();
/// container.register_constructor::<Foo, _, _>(Foo).unwrap();
/// ```
///
/// # Grouping requests
///
/// Requests can be grouped together by using tuples to make multiple requests
/// at once. Since there is a limit of 12 supported parameters for
/// constructors, tuples can also be used to get around that limitation.
///
/// ```
/// use runtime_ioc::{Container, Svc};
///
/// #[derive(Default)]
/// struct Bar;
/// #[derive(Default)]
/// struct Baz;
/// struct Foo(Svc<Bar>, Svc<Baz>);
///
/// impl Foo {
///     pub fn new((bar, baz): (Svc<Bar>, Svc<Baz>)) -> Self {
///         Foo(bar, baz)
///     }
/// }
///
/// let mut container = Container::new();
/// container.register_type::<Bar, _>().unwrap();
/// container.register_type::<Baz, _>().unwrap();
/// container.register_constructor::<Foo, _, _>(Foo::new).unwrap();
///
/// let _foo: Svc<Foo> = container.resolve().unwrap();
/// ```
pub trait Request: Sized {
    /// Performs the request to the container.
    fn request(container: &Container, info: &RequestInfo) -> InjectResult<Self>;

    /// The contracts which must be registered for this request to succeed.
    #[must_use]
    fn requirements() -> Vec<ServiceInfo> {
        Vec::new()
    }
}

/// Requests the information about the current request.
impl Request for RequestInfo {
    fn request(_container: &Container, info: &RequestInfo) -> InjectResult<Self> {
        Ok(info.clone())
    }
}

/// Requests a new instance of a contract.
impl<C: ?Sized + Service> Request for Svc<C> {
    fn request(container: &Container, info: &RequestInfo) -> InjectResult<Self> {
        container.resolve_with(info)
    }

    fn requirements() -> Vec<ServiceInfo> {
        vec![ServiceInfo::of::<C>()]
    }
}

/// Tries to request a new instance of a contract. If the contract is not
/// registered, then returns `None`.
impl<C: ?Sized + Service> Request for Option<Svc<C>> {
    fn request(container: &Container, info: &RequestInfo) -> InjectResult<Self> {
        match container.resolve_with(info) {
            Ok(service) => Ok(Some(service)),
            Err(InjectError::NotRegistered { service_info })
                if service_info == ServiceInfo::of::<C>() =>
            {
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}

macro_rules! impl_tuple_request {
    () => {
        impl_tuple_request!(@impl ());
    };
    ($first:ident $(, $rest:ident)*) => {
        impl_tuple_request!(@impl ($first $(, $rest)*));
        impl_tuple_request!($($rest),*);
    };
    (@impl ($($type_name:ident),*)) => {
        /// Performs multiple requests at once, in order.
        impl <$($type_name),*> Request for ($($type_name,)*)
        where
            $($type_name: Request,)*
        {
            #[allow(unused_variables)]
            fn request(container: &Container, info: &RequestInfo) -> InjectResult<Self> {
                let result = ($(<$type_name as Request>::request(container, info)?,)*);
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

impl_tuple_request!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
