use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::AssetMethod;

/// Emitted once at contract initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractInitialized {
    pub admin: Address,
    pub company: Address,
}

pub fn emit_initialized(env: &Env, event: ContractInitialized) {
    env.events().publish((symbol_short!("init"),), event);
}

/// Emitted when an escrow is created. `method` distinguishes the token-asset
/// and native-asset variants for shared observers.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewEscrow {
    pub id: u64,
    pub creator: Address,
    pub total_value: i128,
    pub method: AssetMethod,
    pub time_created: u64,
    pub duration: u64,
}

pub fn emit_new_escrow(env: &Env, event: NewEscrow) {
    let topics = (symbol_short!("new_esc"), event.id);
    env.events().publish(topics, event);
}

/// Emitted for every depositor contribution. `amount` is the net amount
/// credited toward the contract value (capped and after the deposit fee).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewDeposit {
    pub escrow_id: u64,
    pub depositor: Address,
    pub amount: i128,
    pub method: AssetMethod,
}

pub fn emit_new_deposit(env: &Env, event: NewDeposit) {
    let topics = (symbol_short!("deposit"), event.escrow_id);
    env.events().publish(topics, event);
}

/// Emitted in the same call that brings total deposits up to the contract
/// value.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowCompleted {
    pub id: u64,
    pub total_deposited: i128,
}

pub fn emit_escrow_completed(env: &Env, event: EscrowCompleted) {
    let topics = (symbol_short!("complete"), event.id);
    env.events().publish(topics, event);
}

/// Emitted when funds are sent to the recipient.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowReleased {
    pub id: u64,
    pub recipient: Address,
}

pub fn emit_escrow_released(env: &Env, event: EscrowReleased) {
    let topics = (symbol_short!("released"), event.id);
    env.events().publish(topics, event);
}

/// Emitted when an escrow is cancelled, whether by the mediator or by the
/// scheduler on expiry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowCancelled {
    pub id: u64,
}

pub fn emit_escrow_cancelled(env: &Env, event: EscrowCancelled) {
    let topics = (symbol_short!("cancelled"), event.id);
    env.events().publish(topics, event);
}

/// Emitted when the owner updates the global fee configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesUpdated {
    pub cancel_percent: u32,
    pub release_percent: u32,
    pub deposit_percent: u32,
}

pub fn emit_fees_updated(env: &Env, event: FeesUpdated) {
    env.events().publish((symbol_short!("fees"),), event);
}

/// Emitted when the owner changes the company fee address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompanyChanged {
    pub company: Address,
}

pub fn emit_company_changed(env: &Env, event: CompanyChanged) {
    env.events().publish((symbol_short!("company"),), event);
}

/// Emitted when the owner changes the scheduler's per-call processing cap.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CronCapUpdated {
    pub cap: u32,
}

pub fn emit_cron_cap_updated(env: &Env, event: CronCapUpdated) {
    env.events().publish((symbol_short!("cron_cap"),), event);
}
