#![allow(clippy::used_underscore_binding)]

use derive_more::Display;
use std::{
    any::{Any, TypeId},
    error::Error,
};

/// An owning pointer holding a resolved service. Every resolution allocates a
/// new instance, so the caller is the only owner of the returned value.
pub type Svc<T> = Box<T>;

/// A result from attempting to register, inject or construct a service.
pub type InjectResult<T> = Result<T, InjectError>;

/// Implemented automatically on types that are capable of being a service,
/// including `dyn Trait` contracts.
pub trait Service: Any {}
impl<T: ?Sized + Any> Service for T {}

/// Identity of a service type. This is used as the registration and lookup
/// key of the container.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct ServiceInfo {
    id: TypeId,
    name: &'static str,
}

impl ServiceInfo {
    /// Creates the [`ServiceInfo`] describing `T`.
    #[must_use]
    pub fn of<T: ?Sized + Any>() -> Self {
        ServiceInfo {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Gets the [`TypeId`] of the service type.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Gets the name of the service type. The exact format of this name is
    /// not guaranteed and should only be used for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// An error that occurred while registering or resolving a service.
#[derive(Debug, Display)]
pub enum InjectError {
    /// A factory is already registered for the contract.
    #[display(fmt = "{} is already registered", "service_info.name()")]
    AlreadyRegistered {
        /// The contract that was registered twice.
        service_info: ServiceInfo,
    },

    /// No factory is registered for the requested contract.
    #[display(fmt = "{} is not registered", "service_info.name()")]
    NotRegistered {
        /// The contract that was requested.
        service_info: ServiceInfo,
    },

    /// A dependency of the requested service is not registered.
    #[display(
        fmt = "{} is not registered (required by {})",
        "dependency_info.name()",
        "service_info.name()"
    )]
    MissingDependency {
        /// The service being constructed.
        service_info: ServiceInfo,

        /// The dependency that has no factory.
        dependency_info: ServiceInfo,
    },

    /// An injected service requires an instance of itself to be constructed.
    #[display(
        fmt = "{} cannot depend on {}",
        "service_info.name()",
        "dependency_info.name()"
    )]
    SelfDependency {
        /// The service being registered.
        service_info: ServiceInfo,

        /// The dependency that refers back to the service.
        dependency_info: ServiceInfo,
    },

    /// A cycle was detected in the dependencies of a service.
    #[display(
        fmt = "a cycle was detected during activation of {} [{}]",
        "service_info.name()",
        "fmt_cycle(cycle)"
    )]
    CycleDetected {
        /// The service that was requested while it was already being
        /// constructed.
        service_info: ServiceInfo,

        /// The chain of services that were requested, ending with the
        /// repeated service.
        cycle: Vec<ServiceInfo>,
    },

    /// A user-supplied factory returned an error.
    #[display(
        fmt = "an error occurred during activation of {}",
        "service_info.name()"
    )]
    ActivationFailed {
        /// The service that was requested.
        service_info: ServiceInfo,

        /// The error returned by the factory.
        inner: Box<dyn Error + 'static>,
    },

    /// The registered factory does not produce the requested contract.
    #[display(
        fmt = "the registered factory for {} returned the wrong type",
        "service_info.name()"
    )]
    InvalidFactory {
        /// The service that was requested.
        service_info: ServiceInfo,
    },
}

impl Error for InjectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InjectError::ActivationFailed { inner, .. } => Some(inner.as_ref()),
            _ => None,
        }
    }
}

fn fmt_cycle(cycle: &[ServiceInfo]) -> String {
    let mut joined = String::new();
    for item in cycle {
        if !joined.is_empty() {
            joined.push_str(" -> ");
        }
        joined.push_str(item.name());
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::{InjectError, ServiceInfo};
    use std::{error::Error, fmt};

    trait Contract {}

    #[test]
    fn service_info_distinguishes_contracts() {
        assert_eq!(ServiceInfo::of::<i32>(), ServiceInfo::of::<i32>());
        assert_ne!(ServiceInfo::of::<i32>(), ServiceInfo::of::<u32>());
        assert_ne!(ServiceInfo::of::<dyn Contract>(), ServiceInfo::of::<i32>());
    }

    #[test]
    fn cycle_is_displayed_in_request_order() {
        let error = InjectError::CycleDetected {
            service_info: ServiceInfo::of::<i32>(),
            cycle: vec![
                ServiceInfo::of::<i32>(),
                ServiceInfo::of::<u8>(),
                ServiceInfo::of::<i32>(),
            ],
        };

        assert_eq!(
            "a cycle was detected during activation of i32 [i32 -> u8 -> i32]",
            error.to_string()
        );
    }

    #[test]
    fn activation_failure_exposes_source() {
        #[derive(Debug)]
        struct Boom;

        impl fmt::Display for Boom {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "boom")
            }
        }

        impl Error for Boom {}

        let error = InjectError::ActivationFailed {
            service_info: ServiceInfo::of::<i32>(),
            inner: Box::new(Boom),
        };

        let source = error.source().map(ToString::to_string);
        assert_eq!(Some("boom".to_owned()), source);
        assert!(InjectError::NotRegistered {
            service_info: ServiceInfo::of::<i32>(),
        }
        .source()
        .is_none());
    }
}
