//! Registration of method contracts, ahead of call time.

use indexmap::IndexMap;
use tracing::debug;

use crate::CourierError;
use crate::contract::{MethodContract, MethodDescriptor, resolve};
use crate::request::{Argument, BindingTable, Request};

/// A method contract resolved and classified once, ready to build requests.
///
/// # Example
///
/// ```rust
/// use courier_core::{Argument, BoundMethod, Marker, MethodContract};
///
/// # fn example() -> Result<(), courier_core::CourierError> {
/// let contract = MethodContract::new("search")
///     .with_marker(Marker::get("/items"))
///     .with_parameter::<str>("term");
/// let method = BoundMethod::register(&contract)?;
///
/// let request = method.build(vec![Argument::new("rust")?])?;
/// assert_eq!(request.query(), vec![("term", "rust")]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundMethod {
    name: String,
    table: BindingTable,
}

impl BoundMethod {
    /// Resolves the verb marker and computes the binding table of a contract.
    ///
    /// # Errors
    ///
    /// Any error of [`resolve`] or [`BindingTable::new`].
    pub fn register(contract: &MethodContract) -> Result<Self, CourierError> {
        let descriptor = resolve(contract)?;
        let table = BindingTable::for_contract(descriptor, contract)?;
        debug!(
            method = contract.name(),
            verb = %table.descriptor().verb(),
            path = table.descriptor().path_template(),
            kinds = ?table.kinds(),
            "method registered"
        );

        Ok(Self {
            name: contract.name().to_string(),
            table,
        })
    }

    /// The method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved verb and path template.
    pub fn descriptor(&self) -> &MethodDescriptor {
        self.table.descriptor()
    }

    /// The binding table.
    pub fn table(&self) -> &BindingTable {
        &self.table
    }

    /// Builds the request of one call.
    ///
    /// # Errors
    ///
    /// See [`BindingTable::bind`].
    pub fn build(&self, arguments: Vec<Argument>) -> Result<Request, CourierError> {
        self.table.bind(arguments)
    }
}

/// The registered methods of one remote service, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceContract {
    name: String,
    methods: IndexMap<String, BoundMethod>,
}

impl ServiceContract {
    /// Creates an empty service.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: IndexMap::new(),
        }
    }

    /// Registers a method contract.
    ///
    /// # Errors
    ///
    /// - [`CourierError::DuplicateMethod`] if a method with the same name is registered
    /// - any error of [`BoundMethod::register`]
    pub fn register(mut self, contract: &MethodContract) -> Result<Self, CourierError> {
        if self.methods.contains_key(contract.name()) {
            return Err(CourierError::DuplicateMethod {
                service: self.name,
                method: contract.name().to_string(),
            });
        }

        let method = BoundMethod::register(contract)?;
        self.methods.insert(method.name().to_string(), method);
        Ok(self)
    }

    /// The service name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A registered method.
    pub fn method(&self, name: &str) -> Option<&BoundMethod> {
        self.methods.get(name)
    }

    /// Registered methods, in registration order.
    pub fn methods(&self) -> impl Iterator<Item = &BoundMethod> + '_ {
        self.methods.values()
    }

    /// Builds the request of a call to the named method.
    ///
    /// # Errors
    ///
    /// - [`CourierError::UnknownMethod`] if no method has that name
    /// - any error of [`BoundMethod::build`]
    pub fn build(&self, method: &str, arguments: Vec<Argument>) -> Result<Request, CourierError> {
        let bound = self
            .method(method)
            .ok_or_else(|| CourierError::UnknownMethod {
                service: self.name.clone(),
                method: method.to_string(),
            })?;
        bound.build(arguments)
    }
}
