//! Endpoint dispatch for contracts.

use core::fmt::Debug;

use crate::{
    constants::{function_name, DEPLOY_CHILD_CONTRACT},
    deploy_child_contract, DeploymentPolicy, HostError, HostInterface, HostResult,
};

/// Contract code the host can run. Endpoints are addressed by name.
pub trait Contract: Debug {
    /// Runs the endpoint `function` against `host`.
    fn call(&self, function: &str, host: &mut dyn HostInterface) -> HostResult<()>;

    /// Names of the endpoints the contract exposes.
    fn endpoints(&self) -> &[&'static str];
}

/// The deployer contract: a single `deployChildContract` endpoint configured by a
/// [`DeploymentPolicy`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeployerContract {
    policy: DeploymentPolicy,
}

impl DeployerContract {
    /// Creates a deployer contract running under `policy`.
    pub const fn new(policy: DeploymentPolicy) -> Self {
        Self { policy }
    }

    /// The contract's deployment policy.
    pub const fn policy(&self) -> &DeploymentPolicy {
        &self.policy
    }
}

impl Contract for DeployerContract {
    fn call(&self, function: &str, host: &mut dyn HostInterface) -> HostResult<()> {
        match function {
            DEPLOY_CHILD_CONTRACT => deploy_child_contract(host, &self.policy).map(|_| ()),
            _ => Err(HostError::FunctionNotFound(function.to_string())),
        }
    }

    fn endpoints(&self) -> &[&'static str] {
        &[DEPLOY_CHILD_CONTRACT]
    }
}

/// Checks that `name` may be called as an endpoint: it must be non-empty, shorter than
/// [`function_name::MAX_LENGTH`] bytes, ASCII, and not reserved by the platform.
pub fn validate_function_name(name: &str) -> HostResult<()> {
    let valid = !name.is_empty() &&
        name.len() < function_name::MAX_LENGTH &&
        name.is_ascii() &&
        !function_name::RESERVED.contains(&name);
    if valid {
        Ok(())
    } else {
        Err(HostError::InvalidFunctionName(name.to_string()))
    }
}
