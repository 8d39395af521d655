//! End-to-end tests of `deployChildContract` running in the mock world.

use alloy_primitives::{b256, Bytes, B256, I256, U256};
use child_deployer::{
    constants::DEPLOY_CHILD_CONTRACT,
    test_utils::{wasm_module, ContractCall, MockWorld},
    DeployerContract, DeploymentPolicy, OutcomeEncoding, ReturnCode, StorageMissPolicy, VmOutput,
};
use rstest::rstest;

const CALLER: B256 = b256!("0x0000000000000000000000000000000000000000000000000000000000c0ffee");
const DEPLOYER: B256 = b256!("0x0000000000000000000000000000000000000000000000000000000000de9107");

/// Balance of the deployer contract in every fixture world.
const DEPLOYER_BALANCE: u64 = 1000;

/// A world holding the deployer contract with `stored` bytecode blobs in its storage.
fn world_with(stored: &[(u8, Bytes)]) -> MockWorld {
    let mut world = MockWorld::new()
        .account_code(DEPLOYER, wasm_module(64))
        .account_balance(DEPLOYER, U256::from(DEPLOYER_BALANCE))
        .account_balance(CALLER, U256::from(1));
    for (id, code) in stored {
        world.set_account_storage(DEPLOYER, Bytes::copy_from_slice(&[*id]), code.clone());
    }
    world
}

fn deploy_call(contract_id: u8, init_byte: u8) -> ContractCall {
    ContractCall::new(CALLER, DEPLOYER, DEPLOY_CHILD_CONTRACT)
        .byte_argument(contract_id)
        .byte_argument(init_byte)
}

fn deploy(world: &mut MockWorld, policy: DeploymentPolicy, call: &ContractCall) -> VmOutput {
    world.execute(&DeployerContract::new(policy), call)
}

#[test]
fn test_scenario_a_stored_code_is_deployed() {
    let mut world = world_with(&[(7, wasm_module(12))]);
    let expected_address = world.new_address(&DEPLOYER);

    let output = deploy(&mut world, DeploymentPolicy::default(), &deploy_call(7, 5));

    assert!(output.is_success(), "deployment should complete, got: {output:?}");
    assert_eq!(output.return_data.len(), 2);
    assert_eq!(output.int64_at(0), Some(12));
    assert_eq!(output.int64_at(1), Some(0));

    let [record] = world.create_log() else { panic!("expected one creation request") };
    assert_eq!(record.new_address, Some(expected_address));
    assert_eq!(record.code, wasm_module(12));
    assert_eq!(record.argument_lengths, vec![1]);
    assert_eq!(record.arguments, vec![Bytes::from_static(&[5])]);

    let child = world.account(&expected_address).expect("child account should exist");
    assert_eq!(child.code, Some(wasm_module(12)));
    assert_eq!(child.code_deployer, Some(DEPLOYER));
    assert_eq!(child.balance, U256::from(42));

    let deployer = world.account(&DEPLOYER).unwrap();
    assert_eq!(deployer.balance, U256::from(DEPLOYER_BALANCE - 42));
    assert_eq!(deployer.nonce, 1);
}

#[test]
fn test_scenario_a_output_accounts() {
    let mut world = world_with(&[(7, wasm_module(12))]);
    let expected_address = world.new_address(&DEPLOYER);

    let output = deploy(&mut world, DeploymentPolicy::default(), &deploy_call(7, 5));

    let deployed: Vec<_> = output.deployed_accounts().collect();
    assert_eq!(deployed.len(), 1);
    assert_eq!(deployed[0].address, expected_address);
    assert_eq!(deployed[0].balance_delta, I256::from_raw(U256::from(42)));

    let deployer = &output.output_accounts[&DEPLOYER];
    assert_eq!(deployer.balance_delta, -I256::from_raw(U256::from(42)));
    assert_eq!(deployer.code, None);
    assert!(deployer.storage_updates.is_empty());
}

#[test]
fn test_scenario_b_missing_code_is_passed_through() {
    let mut world = world_with(&[(7, wasm_module(12))]);

    let output = deploy(&mut world, DeploymentPolicy::default(), &deploy_call(9, 5));

    assert!(output.is_success());
    assert_eq!(output.int64_at(0), Some(0));
    let result = output.int64_at(1).unwrap();
    assert_ne!(result, 0);
    assert_eq!(result, i64::from(ReturnCode::ContractInvalid.code()));

    let [record] = world.create_log() else { panic!("expected one creation request") };
    assert!(record.code.is_empty());
    assert_eq!(record.new_address, None);
    assert_eq!(output.deployed_accounts().count(), 0);
    assert_eq!(world.account(&DEPLOYER).unwrap().balance, U256::from(DEPLOYER_BALANCE));
}

#[test]
fn test_scenario_b_guarded() {
    let mut world = world_with(&[]);
    let policy = DeploymentPolicy::default().with_storage_miss(StorageMissPolicy::Guard);

    let output = deploy(&mut world, policy, &deploy_call(9, 5));

    assert!(output.is_success());
    assert_eq!(output.int64_at(0), Some(0));
    assert_eq!(output.int64_at(1), Some(i64::from(ReturnCode::ContractNotFound.code())));
    assert!(world.create_log().is_empty());
}

#[test]
fn test_guard_does_not_affect_stored_code() {
    let mut world = world_with(&[(7, wasm_module(12))]);
    let policy = DeploymentPolicy::default().with_storage_miss(StorageMissPolicy::Guard);

    let output = deploy(&mut world, policy, &deploy_call(7, 5));

    assert_eq!(output.int64_at(0), Some(12));
    assert_eq!(output.int64_at(1), Some(0));
    assert_eq!(world.create_log().len(), 1);
}

#[rstest]
#[case::empty(0, ReturnCode::ContractInvalid)]
#[case::single_byte(1, ReturnCode::ContractInvalid)]
#[case::header_only(8, ReturnCode::Ok)]
#[case::small(12, ReturnCode::Ok)]
#[case::almost_full(4999, ReturnCode::Ok)]
#[case::full(5000, ReturnCode::Ok)]
fn test_first_finish_value_is_loaded_length(#[case] len: usize, #[case] expected: ReturnCode) {
    let stored: Vec<(u8, Bytes)> = if len == 0 { vec![] } else { vec![(3, wasm_module(len))] };
    let mut world = world_with(&stored);

    let output = deploy(&mut world, DeploymentPolicy::default(), &deploy_call(3, 0));

    assert!(output.is_success());
    assert_eq!(output.int64_at(0), Some(len as i64));
    assert_eq!(output.int64_at(1), Some(i64::from(expected.code())));
}

#[rstest]
fn test_init_byte_is_forwarded(#[values(0u8, 1, 5, 127, 128, 254, 255)] init_byte: u8) {
    let mut world = world_with(&[(7, wasm_module(12))]);

    let output = deploy(&mut world, DeploymentPolicy::default(), &deploy_call(7, init_byte));

    assert_eq!(output.int64_at(1), Some(0));
    let [record] = world.create_log() else { panic!("expected one creation request") };
    assert_eq!(record.argument_lengths, vec![1]);
    assert_eq!(record.arguments, vec![Bytes::copy_from_slice(&[init_byte])]);
}

#[rstest]
fn test_deployment_value_is_fixed(#[values(0u8, 7, 200)] init_byte: u8) {
    let mut world = world_with(&[(7, wasm_module(12)), (0, Bytes::new())]);

    deploy(&mut world, DeploymentPolicy::default(), &deploy_call(7, init_byte));
    deploy(&mut world, DeploymentPolicy::default(), &deploy_call(0, init_byte));

    let mut expected = [0u8; 32];
    expected[31] = 42;
    assert_eq!(world.create_log().len(), 2);
    for record in world.create_log() {
        assert_eq!(record.value, expected);
        assert_eq!(record.value(), U256::from(42));
    }
}

#[rstest]
#[case::account_collision(6)]
#[case::out_of_funds(7)]
#[case::contract_invalid(9)]
#[case::unknown(-17)]
fn test_host_failure_is_forwarded_verbatim(#[case] code: i32) {
    let mut world = world_with(&[(7, wasm_module(12))]).create_result(code);

    let output = deploy(&mut world, DeploymentPolicy::default(), &deploy_call(7, 5));

    assert!(output.is_success());
    assert_eq!(output.int64_at(0), Some(12));
    assert_eq!(output.int64_at(1), Some(i64::from(code)));
    assert_eq!(world.create_log()[0].new_address, None);
    assert_eq!(output.deployed_accounts().count(), 0);
    assert_eq!(world.account(&DEPLOYER).unwrap().nonce, 0);
}

#[test]
fn test_insufficient_balance() {
    let mut world = world_with(&[(7, wasm_module(12))]);
    world.set_account_balance(DEPLOYER, U256::from(41));

    let output = deploy(&mut world, DeploymentPolicy::default(), &deploy_call(7, 5));

    assert_eq!(output.int64_at(1), Some(i64::from(ReturnCode::OutOfFunds.code())));
    assert_eq!(world.account(&DEPLOYER).unwrap().balance, U256::from(41));
}

#[test]
fn test_address_collision() {
    let mut world = world_with(&[(7, wasm_module(12))]);
    let taken = world.new_address(&DEPLOYER);
    world.set_account_code(taken, wasm_module(10));

    let output = deploy(&mut world, DeploymentPolicy::default(), &deploy_call(7, 5));

    assert_eq!(output.int64_at(1), Some(i64::from(ReturnCode::AccountCollision.code())));
    assert_eq!(world.account(&taken).unwrap().code, Some(wasm_module(10)));
}

#[test]
fn test_exhausted_creator_nonce_fails_creation() {
    let mut world = world_with(&[(7, wasm_module(12))]);
    world.set_account_nonce(DEPLOYER, u64::MAX);

    let output = deploy(&mut world, DeploymentPolicy::default(), &deploy_call(7, 5));

    assert!(output.is_success());
    assert_eq!(output.int64_at(0), Some(12));
    assert_eq!(output.int64_at(1), Some(i64::from(ReturnCode::ExecutionFailed.code())));
    assert_eq!(output.deployed_accounts().count(), 0);
    let deployer = world.account(&DEPLOYER).unwrap();
    assert_eq!(deployer.nonce, u64::MAX);
    assert_eq!(deployer.balance, U256::from(DEPLOYER_BALANCE));
}

#[test]
fn test_child_balance_overflow_fails_creation() {
    let mut world = world_with(&[(7, wasm_module(12))]);
    let child = world.new_address(&DEPLOYER);
    world.set_account_balance(child, U256::MAX);

    let output = deploy(&mut world, DeploymentPolicy::default(), &deploy_call(7, 5));

    assert_eq!(output.int64_at(1), Some(i64::from(ReturnCode::ExecutionFailed.code())));
    assert_eq!(world.account(&child).unwrap().balance, U256::MAX);
    assert_eq!(world.account(&child).unwrap().code, None);
    assert_eq!(world.account(&DEPLOYER).unwrap().balance, U256::from(DEPLOYER_BALANCE));
}

#[test]
fn test_repeated_deployments_get_fresh_addresses() {
    let mut world = world_with(&[(7, wasm_module(12)), (8, wasm_module(20))]);

    let first = deploy(&mut world, DeploymentPolicy::default(), &deploy_call(7, 1));
    let second = deploy(&mut world, DeploymentPolicy::default(), &deploy_call(8, 2));

    assert_eq!(first.int64_at(1), Some(0));
    assert_eq!(second.int64_at(1), Some(0));
    let addresses: Vec<_> =
        world.create_log().iter().map(|record| record.new_address.unwrap()).collect();
    assert_ne!(addresses[0], addresses[1]);
    assert_eq!(world.account(&DEPLOYER).unwrap().nonce, 2);
    assert_eq!(world.account(&DEPLOYER).unwrap().balance, U256::from(DEPLOYER_BALANCE - 84));
}

#[rstest]
#[case::no_arguments(ContractCall::new(CALLER, DEPLOYER, DEPLOY_CHILD_CONTRACT))]
#[case::contract_id_only(
    ContractCall::new(CALLER, DEPLOYER, DEPLOY_CHILD_CONTRACT).byte_argument(7)
)]
#[case::wide_contract_id(
    ContractCall::new(CALLER, DEPLOYER, DEPLOY_CHILD_CONTRACT)
        .argument(Bytes::from_static(&[0, 7]))
        .byte_argument(5)
)]
#[case::wide_init_argument(
    ContractCall::new(CALLER, DEPLOYER, DEPLOY_CHILD_CONTRACT)
        .byte_argument(7)
        .argument(Bytes::from_static(&[5, 5]))
)]
fn test_bad_arguments_abort(#[case] call: ContractCall) {
    let mut world = world_with(&[(7, wasm_module(12))]);
    let before = world.clone();

    let output = deploy(&mut world, DeploymentPolicy::default(), &call);

    assert_eq!(output.return_code, ReturnCode::ExecutionFailed);
    assert!(output.return_data.is_empty());
    assert!(!output.return_message.is_empty());
    assert_eq!(world, before);
}

#[test]
fn test_oversized_stored_code_aborts() {
    let mut world = world_with(&[(7, wasm_module(5001))]);
    let before = world.clone();

    let output = deploy(&mut world, DeploymentPolicy::default(), &deploy_call(7, 5));

    assert_eq!(output.return_code, ReturnCode::ExecutionFailed);
    assert!(output.return_data.is_empty());
    assert_eq!(world, before);
}

#[test]
fn test_code_capacity_follows_policy() {
    let mut world = world_with(&[(7, wasm_module(65))]);
    let policy = DeploymentPolicy::default().with_code_capacity(64);

    let output = deploy(&mut world, policy, &deploy_call(7, 5));
    assert_eq!(output.return_code, ReturnCode::ExecutionFailed);

    world.set_account_storage(DEPLOYER, Bytes::from_static(&[7]), wasm_module(64));
    let output = deploy(&mut world, policy, &deploy_call(7, 5));
    assert_eq!(output.int64_at(0), Some(64));
    assert_eq!(output.int64_at(1), Some(0));
}

#[rstest]
#[case::success(None, b"succ")]
#[case::failure(Some(1), b"fail")]
#[case::other(Some(9), b"unkn")]
fn test_status_word_outcome(#[case] forced: Option<i32>, #[case] word: &[u8]) {
    let mut world = world_with(&[(7, wasm_module(12))]);
    world.set_create_result(forced);
    let policy = DeploymentPolicy::default().with_outcome_encoding(OutcomeEncoding::StatusWord);

    let output = deploy(&mut world, policy, &deploy_call(7, 5));

    assert_eq!(output.int64_at(0), Some(12));
    assert_eq!(output.data_at(1).map(|data| data.to_vec()), Some(word.to_vec()));
}

#[rstest]
#[case::unknown_endpoint("deploy", ReturnCode::FunctionNotFound)]
#[case::reserved_endpoint("init", ReturnCode::FunctionNotFound)]
#[case::empty_endpoint("", ReturnCode::FunctionNotFound)]
fn test_endpoint_dispatch(#[case] function: &str, #[case] expected: ReturnCode) {
    let mut world = world_with(&[(7, wasm_module(12))]);
    let call = ContractCall::new(CALLER, DEPLOYER, function).byte_argument(7).byte_argument(5);

    let output = deploy(&mut world, DeploymentPolicy::default(), &call);

    assert_eq!(output.return_code, expected);
    assert!(world.create_log().is_empty());
}

#[test]
fn test_missing_contract_account() {
    let mut world = MockWorld::new();

    let output = deploy(&mut world, DeploymentPolicy::default(), &deploy_call(7, 5));

    assert_eq!(output.return_code, ReturnCode::ContractNotFound);
}
