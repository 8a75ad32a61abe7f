use crate::ServiceInfo;

/// Information about an active request.
#[derive(Clone, Debug, Default)]
pub struct RequestInfo {
    service_path: Vec<ServiceInfo>,
}

impl RequestInfo {
    /// Creates a new, empty instance of [`RequestInfo`].
    #[must_use]
    pub fn new() -> Self {
        RequestInfo {
            service_path: Vec::new(),
        }
    }

    /// Creates a new child instance of [`RequestInfo`] with the given service
    /// appended to the end of the request path.
    #[must_use]
    pub fn with_request(&self, service: ServiceInfo) -> Self {
        let mut child = self.clone();
        child.service_path.push(service);
        child
    }

    /// Gets the current request path. The first element is the service that
    /// was requested from the container, and each following element is a
    /// dependency of the one before it. This can be used to configure a
    /// service based on what it's being injected into.
    ///
    /// # Example
    ///
    /// ```
    /// use runtime_ioc::{Container, RequestInfo, ServiceInfo, Svc};
    ///
    /// struct Foo(pub Svc<Baz>);
    /// struct Bar(pub Svc<Baz>);
    /// struct Baz(pub i32);
    ///
    /// impl Baz {
    ///     pub fn new(request_info: RequestInfo) -> Self {
    ///         let value = match request_info.service_path() {
    ///             [root, ..] if *root == ServiceInfo::of::<Foo>() => 1,
    ///             [root, ..] if *root == ServiceInfo::of::<Bar>() => 2,
    ///             _ => 0,
    ///         };
    ///
    ///         Baz(value)
    ///     }
    /// }
    ///
    /// let mut container = Container::new();
    /// container.register_constructor::<Foo, _, _>(Foo).unwrap();
    /// container.register_constructor::<Bar, _, _>(Bar).unwrap();
    /// container.register_constructor::<Baz, _, _>(Baz::new).unwrap();
    ///
    /// let foo: Svc<Foo> = container.resolve().unwrap();
    /// let bar: Svc<Bar> = container.resolve().unwrap();
    /// let baz: Svc<Baz> = container.resolve().unwrap();
    ///
    /// assert_eq!(1, foo.0.0);
    /// assert_eq!(2, bar.0.0);
    /// assert_eq!(0, baz.0);
    /// ```
    #[must_use]
    pub fn service_path(&self) -> &[ServiceInfo] {
        &self.service_path
    }

    /// Gets how many services are currently being resolved.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.service_path.len()
    }
}
