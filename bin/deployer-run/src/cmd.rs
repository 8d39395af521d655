use std::{fs, path::PathBuf};

use alloy_primitives::B256;
use child_deployer::{
    constants::{DEPLOY_CHILD_CONTRACT, WASM_HEADER},
    test_utils::{ContractCall, MockWorld},
    DeployerContract, DeploymentPolicy, OutcomeEncoding, StorageMissPolicy, VmOutput,
};
use clap::Parser;
use tracing::{debug, info};

use crate::{decode_hex_argument, load_prestate, render_output, LogArgs, Result};

/// Run one endpoint of the deployer contract
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cmd {
    /// JSON file with the accounts of the world before the call
    #[arg(long = "prestate", visible_aliases = ["pre-state"])]
    pub prestate: Option<PathBuf>,

    /// Address of the deployer contract. A minimal module is installed there if the prestate
    /// holds no code at this address.
    #[arg(
        long = "contract",
        visible_aliases = ["to"],
        default_value = "0x00000000000000000000000000000000000000000000000000000000000de910"
    )]
    pub contract: B256,

    /// Address of the caller
    #[arg(
        long = "caller",
        visible_aliases = ["from"],
        default_value = "0x0000000000000000000000000000000000000000000000000000000000c0ffee"
    )]
    pub caller: B256,

    /// Endpoint to call
    #[arg(long = "function", default_value = DEPLOY_CHILD_CONTRACT)]
    pub function: String,

    /// Call argument as hex (can be repeated, in call order)
    #[arg(long = "arg", allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// JSON file with the deployment policy. Missing fields keep their defaults.
    #[arg(long = "policy")]
    pub policy: Option<PathBuf>,

    /// Skip creation and report `ContractNotFound` when no bytecode is stored
    #[arg(long = "guard-storage-miss")]
    pub guard_storage_miss: bool,

    /// Finish the creation outcome as a status word instead of the result code
    #[arg(long = "status-word")]
    pub status_word: bool,

    /// Write the call output as JSON to this file
    #[arg(long = "dump")]
    pub dump: Option<PathBuf>,

    /// Logging configuration
    #[command(flatten)]
    pub log_args: LogArgs,
}

impl Cmd {
    /// Execute the command
    pub fn run(&self) -> Result<()> {
        self.log_args.init()?;

        let mut world = self.world()?;
        let policy = self.deployment_policy()?;
        let call = self.call()?;
        let output = execute(&mut world, policy, &call);

        print!("{}", render_output(&output));

        if let Some(path) = &self.dump {
            fs::write(path, serde_json::to_string_pretty(&output)?)?;
            info!(target: "deployer_run", path = %path.display(), "Wrote output");
        }
        Ok(())
    }

    /// The world before the call, with the deployer contract installed.
    pub fn world(&self) -> Result<MockWorld> {
        let mut world = load_prestate(self.prestate.as_deref())?;
        if world.account(&self.contract).is_none_or(|account| account.code.is_none()) {
            debug!(target: "deployer_run", contract = %self.contract, "Installing contract code");
            world.set_account_code(self.contract, WASM_HEADER.to_vec().into());
        }
        Ok(world)
    }

    /// The policy file overlaid with the policy flags.
    pub fn deployment_policy(&self) -> Result<DeploymentPolicy> {
        let mut policy: DeploymentPolicy = match &self.policy {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => DeploymentPolicy::default(),
        };
        if self.guard_storage_miss {
            policy.storage_miss = StorageMissPolicy::Guard;
        }
        if self.status_word {
            policy.outcome_encoding = OutcomeEncoding::StatusWord;
        }
        debug!(target: "deployer_run", ?policy, "Resolved deployment policy");
        Ok(policy)
    }

    /// The call described by the flags.
    pub fn call(&self) -> Result<ContractCall> {
        self.args.iter().try_fold(
            ContractCall::new(self.caller, self.contract, self.function.as_str()),
            |call, arg| Ok(call.argument(decode_hex_argument(arg)?)),
        )
    }
}

/// Runs `call` on a deployer contract configured with `policy`.
pub fn execute(world: &mut MockWorld, policy: DeploymentPolicy, call: &ContractCall) -> VmOutput {
    let output = world.execute(&DeployerContract::new(policy), call);
    debug!(
        target: "deployer_run",
        return_code = %output.return_code,
        finished = output.return_data.len(),
        "Call done"
    );
    output
}
