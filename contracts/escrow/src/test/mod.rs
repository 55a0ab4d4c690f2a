pub mod bet_test;

use crate::types::{AssetMethod, CreateEscrowParams};
use crate::{EscrowContract, EscrowContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger, LedgerInfo},
    token, Address, Env, String, Vec,
};

pub struct TestCtx {
    pub env: Env,
    pub client: EscrowContractClient<'static>,
    pub admin: Address,
    pub company: Address,
    pub mediator: Address,
    pub token: token::TokenClient<'static>,
    pub token_admin: token::StellarAssetClient<'static>,
    pub native: token::TokenClient<'static>,
    pub native_admin: token::StellarAssetClient<'static>,
}

/// Register the contract with two asset contracts and initialize it with
/// no cancel/deposit fees and a 2% release fee. Tests exercising the other
/// fees reconfigure via `update_fees`.
pub fn setup_test() -> TestCtx {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register_contract(None, EscrowContract);
    let client = EscrowContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let company = Address::generate(&env);
    let mediator = Address::generate(&env);

    let token_issuer = Address::generate(&env);
    let token_contract = env.register_stellar_asset_contract_v2(token_issuer);
    let token_address = token_contract.address();

    let native_issuer = Address::generate(&env);
    let native_contract = env.register_stellar_asset_contract_v2(native_issuer);
    let native_address = native_contract.address();

    client.initialize(&admin, &company, &token_address, &native_address, &0, &2, &0);

    TestCtx {
        client,
        admin,
        company,
        mediator,
        token: token::TokenClient::new(&env, &token_address),
        token_admin: token::StellarAssetClient::new(&env, &token_address),
        native: token::TokenClient::new(&env, &native_address),
        native_admin: token::StellarAssetClient::new(&env, &native_address),
        env,
    }
}

impl TestCtx {
    /// Fresh address funded with `balance` of both assets.
    pub fn funded_address(&self, balance: i128) -> Address {
        let who = Address::generate(&self.env);
        self.token_admin.mint(&who, &balance);
        self.native_admin.mint(&who, &balance);
        who
    }

    /// Baseline creation parameters: open token-asset escrow with a fixed
    /// recipient and no depositor fee. Tests override fields as needed.
    pub fn token_escrow_params(
        &self,
        recipient: &Address,
        contract_value: i128,
        duration: u64,
        min_deposit: i128,
    ) -> CreateEscrowParams {
        CreateEscrowParams {
            title: String::from_str(&self.env, "service agreement"),
            contract_value,
            duration,
            mediator: self.mediator.clone(),
            recipient: Some(recipient.clone()),
            min_deposit,
            depositors: Vec::new(&self.env),
            is_private: false,
            depositor_fee_percent: 0,
            method: AssetMethod::Token,
        }
    }

    /// Open token-asset escrow with a fixed recipient and no depositor fee.
    pub fn create_token_escrow(
        &self,
        creator: &Address,
        recipient: &Address,
        contract_value: i128,
        duration: u64,
        min_deposit: i128,
    ) -> u64 {
        let params = self.token_escrow_params(recipient, contract_value, duration, min_deposit);
        self.client.create_escrow(creator, &params)
    }

    /// Native-asset bet escrow: no recipient yet, listed depositors.
    pub fn create_bet_escrow(
        &self,
        creator: &Address,
        contract_value: i128,
        duration: u64,
        min_deposit: i128,
        depositors: Vec<Address>,
    ) -> u64 {
        let params = CreateEscrowParams {
            title: String::from_str(&self.env, "wager"),
            contract_value,
            duration,
            mediator: self.mediator.clone(),
            recipient: None,
            min_deposit,
            depositors,
            is_private: false,
            depositor_fee_percent: 0,
            method: AssetMethod::Native,
        };
        self.client.create_escrow(creator, &params)
    }
}

pub fn advance_ledger(env: &Env, seconds: u64) {
    env.ledger().set(LedgerInfo {
        timestamp: env.ledger().timestamp() + seconds,
        protocol_version: 20,
        sequence_number: env.ledger().sequence(),
        network_id: Default::default(),
        base_reserve: 10,
        min_temp_entry_ttl: 10,
        min_persistent_entry_ttl: 10,
        max_entry_ttl: 3110400,
    });
}
