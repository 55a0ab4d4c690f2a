use soroban_sdk::{Address, Env, Vec};

use crate::types::{
    DataKey, Escrow, FeeConfig, DEFAULT_CRON_CAP, PERSISTENT_TTL_AMOUNT, PERSISTENT_TTL_THRESHOLD,
};

// ============================================================================
// INSTANCE CONFIGURATION
// ============================================================================

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn get_admin(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Admin).unwrap()
}

pub fn set_company(env: &Env, company: &Address) {
    env.storage().instance().set(&DataKey::Company, company);
}

pub fn get_company(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Company).unwrap()
}

pub fn set_token_asset(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::TokenAsset, token);
}

pub fn get_token_asset(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::TokenAsset).unwrap()
}

pub fn set_native_asset(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::NativeAsset, token);
}

pub fn get_native_asset(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::NativeAsset).unwrap()
}

pub fn set_fee_config(env: &Env, config: &FeeConfig) {
    env.storage().instance().set(&DataKey::FeeConfig, config);
}

pub fn get_fee_config(env: &Env) -> FeeConfig {
    env.storage().instance().get(&DataKey::FeeConfig).unwrap()
}

pub fn set_cron_cap(env: &Env, cap: u32) {
    env.storage().instance().set(&DataKey::CronCap, &cap);
}

pub fn get_cron_cap(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::CronCap)
        .unwrap_or(DEFAULT_CRON_CAP)
}

// ============================================================================
// ESCROW COUNTER
// ============================================================================

/// Allocate the next escrow id. Ids are 1-based; 0 is the scheduler nil link.
pub fn next_escrow_id(env: &Env) -> u64 {
    let counter: u64 = env
        .storage()
        .instance()
        .get(&DataKey::EscrowCounter)
        .unwrap_or(0);
    let id = counter + 1;
    env.storage().instance().set(&DataKey::EscrowCounter, &id);
    id
}

// ============================================================================
// ESCROW RECORDS
// ============================================================================

pub fn get_escrow(env: &Env, id: u64) -> Option<Escrow> {
    let key = DataKey::Escrow(id);
    let escrow = env.storage().persistent().get::<_, Escrow>(&key);
    if escrow.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    escrow
}

pub fn save_escrow(env: &Env, escrow: &Escrow) {
    let key = DataKey::Escrow(escrow.id);
    env.storage().persistent().set(&key, escrow);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

/// Refresh the per-id last-touched timestamp. Every guarded mutator calls
/// this so external tooling can audit activity without replaying events.
pub fn touch(env: &Env, id: u64) {
    let key = DataKey::LastUpdated(id);
    env.storage().persistent().set(&key, &env.ledger().timestamp());
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

pub fn get_last_updated(env: &Env, id: u64) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::LastUpdated(id))
        .unwrap_or(0)
}

// ============================================================================
// DEPOSITOR LEDGER
// ============================================================================

/// Register an address as a depositor for an escrow. Members of a private
/// escrow's allow-list are registered at creation; depositors of open escrows
/// are registered on their first deposit.
pub fn register_depositor(env: &Env, id: u64, depositor: &Address) {
    let flag_key = DataKey::Depositor(id, depositor.clone());
    if env.storage().persistent().has(&flag_key) {
        return;
    }
    env.storage().persistent().set(&flag_key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&flag_key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);

    let list_key = DataKey::DepositorList(id);
    let mut list = get_depositor_list(env, id);
    list.push_back(depositor.clone());
    env.storage().persistent().set(&list_key, &list);
    env.storage()
        .persistent()
        .extend_ttl(&list_key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

pub fn is_depositor(env: &Env, id: u64, depositor: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Depositor(id, depositor.clone()))
}

pub fn get_depositor_list(env: &Env, id: u64) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::DepositorList(id))
        .unwrap_or(Vec::new(env))
}

pub fn get_contribution(env: &Env, id: u64, depositor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Contribution(id, depositor.clone()))
        .unwrap_or(0)
}

/// Record a net contribution. The contributor list keeps refund iteration
/// order and includes the creator even when the creator is not allow-listed.
pub fn add_contribution(env: &Env, id: u64, depositor: &Address, amount: i128) {
    let key = DataKey::Contribution(id, depositor.clone());
    let current = get_contribution(env, id, depositor);
    if current == 0 {
        let list_key = DataKey::Contributors(id);
        let mut list = get_contributors(env, id);
        list.push_back(depositor.clone());
        env.storage().persistent().set(&list_key, &list);
        env.storage()
            .persistent()
            .extend_ttl(&list_key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    env.storage().persistent().set(&key, &(current + amount));
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

pub fn get_contributors(env: &Env, id: u64) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Contributors(id))
        .unwrap_or(Vec::new(env))
}
