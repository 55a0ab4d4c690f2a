#![no_std]

mod errors;
mod events;
mod fees;
mod scheduler;
mod storage;
mod types;

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, token, Address, Env};

use crate::errors::Error;
use crate::events::*;
use crate::types::*;

/// Multi-party conditional escrow with time-based auto-resolution.
///
/// Funds are held until the mediator releases or cancels, or until the
/// deadline passes. Overdue escrows are resolved opportunistically: every
/// state-changing entry point first advances the due-list, cancelling and
/// refunding expired escrows (up to a configurable cap) before doing its own
/// work. Escrows settle in one of two assets fixed at initialization; the
/// native-asset variant additionally supports the open-recipient "bet" shape
/// where the mediator assigns the winner from the registered depositors.
#[contract]
pub struct EscrowContract;

#[contractimpl]
impl EscrowContract {
    // ========================================================================
    // INITIALIZATION & CONFIGURATION
    // ========================================================================

    /// Initialize the contract with its owner, fee destination, the two
    /// settlement assets, and the global fee percentages.
    pub fn initialize(
        env: Env,
        admin: Address,
        company: Address,
        token_asset: Address,
        native_asset: Address,
        fee_cancel: u32,
        fee_release: u32,
        fee_deposit: u32,
    ) -> Result<(), Error> {
        admin.require_auth();

        if storage::has_admin(&env) {
            return Err(Error::AlreadyInitialized);
        }
        check_fee_percent(fee_cancel)?;
        check_fee_percent(fee_release)?;
        check_fee_percent(fee_deposit)?;

        storage::set_admin(&env, &admin);
        storage::set_company(&env, &company);
        storage::set_token_asset(&env, &token_asset);
        storage::set_native_asset(&env, &native_asset);
        storage::set_fee_config(
            &env,
            &FeeConfig {
                cancel_percent: fee_cancel,
                release_percent: fee_release,
                deposit_percent: fee_deposit,
            },
        );
        extend_instance_ttl(&env);

        emit_initialized(&env, ContractInitialized { admin, company });
        Ok(())
    }

    /// Replace the company fee address (owner only).
    pub fn set_company_address(env: Env, caller: Address, company: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        storage::set_company(&env, &company);
        extend_instance_ttl(&env);
        emit_company_changed(&env, CompanyChanged { company });
        Ok(())
    }

    /// Update the global fee percentages (owner only). Takes effect for all
    /// subsequent operations; never retroactive.
    pub fn update_fees(
        env: Env,
        caller: Address,
        fee_cancel: u32,
        fee_release: u32,
        fee_deposit: u32,
    ) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        check_fee_percent(fee_cancel)?;
        check_fee_percent(fee_release)?;
        check_fee_percent(fee_deposit)?;
        storage::set_fee_config(
            &env,
            &FeeConfig {
                cancel_percent: fee_cancel,
                release_percent: fee_release,
                deposit_percent: fee_deposit,
            },
        );
        extend_instance_ttl(&env);
        emit_fees_updated(
            &env,
            FeesUpdated {
                cancel_percent: fee_cancel,
                release_percent: fee_release,
                deposit_percent: fee_deposit,
            },
        );
        Ok(())
    }

    /// Get the global fee configuration.
    pub fn get_fees(env: Env) -> Result<FeeConfig, Error> {
        require_initialized(&env)?;
        Ok(storage::get_fee_config(&env))
    }

    /// Set the per-call cap on expiry processing (owner only). An unbounded
    /// sweep would let an attacker pack the due-list until a victim's
    /// unrelated call runs out of resources.
    pub fn set_cron_cap(env: Env, caller: Address, cap: u32) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        if cap == 0 {
            return Err(Error::InvalidCronCap);
        }
        storage::set_cron_cap(&env, cap);
        extend_instance_ttl(&env);
        emit_cron_cap_updated(&env, CronCapUpdated { cap });
        Ok(())
    }

    /// Get the per-call cap on expiry processing.
    pub fn get_cron_cap(env: Env) -> u32 {
        storage::get_cron_cap(&env)
    }

    // ========================================================================
    // ESCROW LIFECYCLE
    // ========================================================================

    /// Create an escrow and fund it with the creator's minimum deposit.
    ///
    /// The minimum deposit is pulled from the creator through the shared
    /// deposit path (deposit fee applied, net credited) and must cover at
    /// least 1% of the contract value, compared pre-fee. For private escrows
    /// the depositor list is the fixed allow-list; listed addresses of open
    /// escrows are pre-registered and anyone else joins on first deposit.
    /// `recipient` may be `None` only for the native variant (bet shape).
    pub fn create_escrow(
        env: Env,
        creator: Address,
        params: CreateEscrowParams,
    ) -> Result<u64, Error> {
        creator.require_auth();
        require_initialized(&env)?;
        run_cron(&env)?;

        if params.contract_value <= 0 || params.min_deposit <= 0 {
            return Err(Error::InvalidAmount);
        }
        if params.duration == 0 {
            return Err(Error::InvalidDuration);
        }
        check_fee_percent(params.depositor_fee_percent)?;
        if params.min_deposit < params.contract_value * MIN_DEPOSIT_PERCENT / 100 {
            return Err(Error::DepositTooLow);
        }
        if params.recipient.is_none() && params.method != AssetMethod::Native {
            return Err(Error::RecipientRequired);
        }
        if params.is_private && params.depositors.is_empty() {
            return Err(Error::NoDepositors);
        }
        for i in 0..params.depositors.len() {
            for j in (i + 1)..params.depositors.len() {
                if params.depositors.get_unchecked(i) == params.depositors.get_unchecked(j) {
                    return Err(Error::DuplicateDepositor);
                }
            }
        }

        let now = env.ledger().timestamp();
        let id = storage::next_escrow_id(&env);
        let mut escrow = Escrow {
            id,
            title: params.title,
            contract_value: params.contract_value,
            total_deposited: 0,
            duration: params.duration,
            created_at: now,
            deadline: now + params.duration,
            mediator: params.mediator,
            recipient: params.recipient,
            creator: creator.clone(),
            is_private: params.is_private,
            method: params.method,
            depositor_fee_percent: params.depositor_fee_percent,
            completed: false,
            released: false,
            cancelled: false,
        };

        for depositor in params.depositors.iter() {
            storage::register_depositor(&env, id, &depositor);
        }

        // The creator's contribution does not emit a deposit event; only
        // depositor deposits count in the deposit log.
        take_deposit(&env, &mut escrow, &creator, params.min_deposit, false)?;
        scheduler::insert(&env, id, escrow.deadline);
        extend_instance_ttl(&env);

        emit_new_escrow(
            &env,
            NewEscrow {
                id,
                creator,
                total_value: escrow.contract_value,
                method: escrow.method,
                time_created: now,
                duration: escrow.duration,
            },
        );
        Ok(id)
    }

    /// Contribute funds to an open or allow-listed escrow. Returns the net
    /// amount credited toward the contract value.
    ///
    /// A deposit that would push the total above the contract value is
    /// capped: only the remaining gap is taken from the caller, the surplus
    /// stays untouched. When the total reaches the contract value exactly,
    /// the escrow flips to completed in the same call.
    pub fn escrow_deposit(
        env: Env,
        id: u64,
        depositor: Address,
        amount: i128,
    ) -> Result<i128, Error> {
        depositor.require_auth();
        require_initialized(&env)?;

        let escrow = storage::get_escrow(&env, id).ok_or(Error::EscrowNotFound)?;
        check_not_terminal(&escrow)?;
        if escrow.completed {
            return Err(Error::EscrowAlreadyCompleted);
        }

        run_cron(&env)?;

        // The sweep above may have expired this very escrow; re-read and
        // judge it against the same "now" the sweep used.
        let mut escrow = storage::get_escrow(&env, id).ok_or(Error::EscrowNotFound)?;
        let now = env.ledger().timestamp();
        if escrow.cancelled || now >= escrow.deadline {
            return Err(Error::EscrowExpired);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if escrow.is_private {
            if !storage::is_depositor(&env, id, &depositor) {
                return Err(Error::NotDepositor);
            }
        } else {
            storage::register_depositor(&env, id, &depositor);
        }

        take_deposit(&env, &mut escrow, &depositor, amount, true)
    }

    /// Send the funds of a completed escrow to its recipient (mediator only).
    pub fn release_escrow(env: Env, caller: Address, id: u64) -> Result<(), Error> {
        caller.require_auth();
        require_initialized(&env)?;

        let escrow = storage::get_escrow(&env, id).ok_or(Error::EscrowNotFound)?;
        if caller != escrow.mediator {
            return Err(Error::Unauthorized);
        }
        check_not_terminal(&escrow)?;

        run_cron(&env)?;

        let mut escrow = storage::get_escrow(&env, id).ok_or(Error::EscrowNotFound)?;
        if escrow.cancelled {
            return Err(Error::AlreadyCancelled);
        }
        if !escrow.completed {
            return Err(Error::NotCompleted);
        }
        let recipient = escrow.recipient.clone().ok_or(Error::RecipientNotSet)?;

        let config = storage::get_fee_config(&env);
        let (net, fee) = fees::apply_fee(escrow.total_deposited, config.release_percent);
        let client = asset_client(&env, escrow.method);
        let contract = env.current_contract_address();
        if net > 0 {
            client.transfer(&contract, &recipient, &net);
        }
        if fee > 0 {
            client.transfer(&contract, &storage::get_company(&env), &fee);
        }

        escrow.released = true;
        storage::save_escrow(&env, &escrow);
        storage::touch(&env, id);
        scheduler::remove(&env, id);
        extend_instance_ttl(&env);

        emit_escrow_released(&env, EscrowReleased { id, recipient });
        Ok(())
    }

    /// Cancel an escrow and refund all contributors (mediator only; the
    /// scheduler performs the same cancellation automatically on expiry).
    pub fn cancel_escrow(env: Env, caller: Address, id: u64) -> Result<(), Error> {
        caller.require_auth();
        require_initialized(&env)?;

        let escrow = storage::get_escrow(&env, id).ok_or(Error::EscrowNotFound)?;
        if caller != escrow.mediator {
            return Err(Error::Unauthorized);
        }
        check_not_terminal(&escrow)?;

        run_cron(&env)?;

        let mut escrow = storage::get_escrow(&env, id).ok_or(Error::EscrowNotFound)?;
        if escrow.cancelled {
            // The sweep expired this escrow within the same call; the
            // mediator's intent is already satisfied.
            extend_instance_ttl(&env);
            return Ok(());
        }
        cancel_internal(&env, &mut escrow)?;
        extend_instance_ttl(&env);
        Ok(())
    }

    /// Assign the winning recipient of a bet escrow (mediator only). The
    /// candidate must already be a registered depositor.
    pub fn set_recipient(
        env: Env,
        caller: Address,
        id: u64,
        candidate: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        require_initialized(&env)?;

        let escrow = storage::get_escrow(&env, id).ok_or(Error::EscrowNotFound)?;
        if caller != escrow.mediator {
            return Err(Error::Unauthorized);
        }
        if escrow.method != AssetMethod::Native {
            return Err(Error::NotBetEscrow);
        }
        check_not_terminal(&escrow)?;

        run_cron(&env)?;

        let mut escrow = storage::get_escrow(&env, id).ok_or(Error::EscrowNotFound)?;
        if escrow.cancelled {
            return Err(Error::AlreadyCancelled);
        }
        if !storage::is_depositor(&env, id, &candidate) {
            return Err(Error::InvalidRecipient);
        }

        escrow.recipient = Some(candidate);
        storage::save_escrow(&env, &escrow);
        storage::touch(&env, id);
        extend_instance_ttl(&env);
        Ok(())
    }

    // ========================================================================
    // READ ACCESSORS
    // ========================================================================

    /// Get the status flags of an escrow.
    pub fn get_states(env: Env, id: u64) -> Result<EscrowStates, Error> {
        let escrow = storage::get_escrow(&env, id).ok_or(Error::EscrowNotFound)?;
        Ok(EscrowStates {
            completed: escrow.completed,
            released: escrow.released,
            cancelled: escrow.cancelled,
        })
    }

    /// Get the party addresses of an escrow.
    pub fn get_addresses(env: Env, id: u64) -> Result<EscrowAddresses, Error> {
        let escrow = storage::get_escrow(&env, id).ok_or(Error::EscrowNotFound)?;
        Ok(EscrowAddresses {
            mediator: escrow.mediator,
            recipient: escrow.recipient,
            creator: escrow.creator,
        })
    }

    /// Get the deposited total and target value of an escrow.
    pub fn get_amounts(env: Env, id: u64) -> Result<EscrowAmounts, Error> {
        let escrow = storage::get_escrow(&env, id).ok_or(Error::EscrowNotFound)?;
        Ok(EscrowAmounts {
            total_deposited: escrow.total_deposited,
            contract_value: escrow.contract_value,
        })
    }

    /// Whether an address is a registered depositor of an escrow.
    pub fn if_depositor(env: Env, id: u64, depositor: Address) -> Result<bool, Error> {
        storage::get_escrow(&env, id).ok_or(Error::EscrowNotFound)?;
        Ok(storage::is_depositor(&env, id, &depositor))
    }

    /// Number of registered depositors of an escrow.
    pub fn get_total_depositors(env: Env, id: u64) -> Result<u32, Error> {
        storage::get_escrow(&env, id).ok_or(Error::EscrowNotFound)?;
        Ok(storage::get_depositor_list(&env, id).len())
    }

    /// Net contribution recorded for an address.
    pub fn get_contribution(env: Env, id: u64, depositor: Address) -> Result<i128, Error> {
        storage::get_escrow(&env, id).ok_or(Error::EscrowNotFound)?;
        Ok(storage::get_contribution(&env, id, &depositor))
    }

    /// Timestamp of the last mutation touching an escrow.
    pub fn get_last_updated(env: Env, id: u64) -> Result<u64, Error> {
        storage::get_escrow(&env, id).ok_or(Error::EscrowNotFound)?;
        Ok(storage::get_last_updated(&env, id))
    }

    /// Due-list node for an escrow, if one is pending.
    pub fn get_cron_job(env: Env, id: u64) -> Option<CronJob> {
        scheduler::get_job(&env, id)
    }

    /// Escrow id at the head of the due-list (0 when empty).
    pub fn get_cron_head(env: Env) -> u64 {
        scheduler::head(&env)
    }
}

// ============================================================================
// ENGINE HELPERS
// ============================================================================

fn require_initialized(env: &Env) -> Result<(), Error> {
    if !storage::has_admin(env) {
        return Err(Error::NotInitialized);
    }
    Ok(())
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    require_initialized(env)?;
    if *caller != storage::get_admin(env) {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

fn check_fee_percent(percent: u32) -> Result<(), Error> {
    if percent > fees::MAX_FEE_PERCENT {
        return Err(Error::InvalidFeePercent);
    }
    Ok(())
}

fn check_not_terminal(escrow: &Escrow) -> Result<(), Error> {
    if escrow.released {
        return Err(Error::AlreadyReleased);
    }
    if escrow.cancelled {
        return Err(Error::AlreadyCancelled);
    }
    Ok(())
}

/// Resolve the token client an escrow settles in.
fn asset_client(env: &Env, method: AssetMethod) -> token::TokenClient<'static> {
    let address = match method {
        AssetMethod::Token => storage::get_token_asset(env),
        AssetMethod::Native => storage::get_native_asset(env),
    };
    token::TokenClient::new(env, &address)
}

/// Advance the due-list: cancel and refund every escrow whose deadline has
/// passed, up to the configured cap. Called at the start of every
/// state-changing entry point, so a single transaction may resolve zero, one,
/// or many unrelated escrows as a side effect.
fn run_cron(env: &Env) -> Result<(), Error> {
    let now = env.ledger().timestamp();
    let cap = storage::get_cron_cap(env);
    let due = scheduler::pop_due(env, now, cap);
    for id in due.iter() {
        let mut escrow = storage::get_escrow(env, id).ok_or(Error::EscrowNotFound)?;
        cancel_internal(env, &mut escrow)?;
    }
    Ok(())
}

/// Pull a deposit from `from`, apply the deposit fee, credit the net amount
/// and flip `completed` when the contract value is reached exactly.
///
/// When the tendered amount overshoots the remaining gap, only the gap is
/// credited and the fee is recomputed on the credited amount, so the charge
/// never exceeds what the caller tendered.
fn take_deposit(
    env: &Env,
    escrow: &mut Escrow,
    from: &Address,
    amount: i128,
    emit: bool,
) -> Result<i128, Error> {
    let config = storage::get_fee_config(env);
    let gap = escrow.contract_value - escrow.total_deposited;
    let (mut net, mut fee) = fees::apply_fee(amount, config.deposit_percent);
    if net > gap {
        net = gap;
        fee = fees::fee_on(gap, config.deposit_percent);
    }
    let charged = net + fee;

    let client = asset_client(env, escrow.method);
    let contract = env.current_contract_address();
    client.transfer(from, &contract, &charged);
    if fee > 0 {
        client.transfer(&contract, &storage::get_company(env), &fee);
    }

    storage::add_contribution(env, escrow.id, from, net);
    escrow.total_deposited += net;
    if escrow.total_deposited == escrow.contract_value {
        escrow.completed = true;
        emit_escrow_completed(
            env,
            EscrowCompleted {
                id: escrow.id,
                total_deposited: escrow.total_deposited,
            },
        );
    }
    storage::save_escrow(env, escrow);
    storage::touch(env, escrow.id);

    if emit && net > 0 {
        emit_new_deposit(
            env,
            NewDeposit {
                escrow_id: escrow.id,
                depositor: from.clone(),
                amount: net,
                method: escrow.method,
            },
        );
    }
    Ok(net)
}

/// Refund every contributor and mark the escrow cancelled. Each refund is the
/// recorded contribution minus the company cancellation fee, minus the
/// per-escrow depositor fee on the remainder (paid to the mediator). Removes
/// the due-list node; a no-op when the sweep already unlinked it.
fn cancel_internal(env: &Env, escrow: &mut Escrow) -> Result<(), Error> {
    let config = storage::get_fee_config(env);
    let client = asset_client(env, escrow.method);
    let contract = env.current_contract_address();
    let company = storage::get_company(env);

    for depositor in storage::get_contributors(env, escrow.id).iter() {
        let gross = storage::get_contribution(env, escrow.id, &depositor);
        if gross == 0 {
            continue;
        }
        let (after_company, company_fee) = fees::apply_fee(gross, config.cancel_percent);
        let (refund, mediator_fee) = fees::apply_fee(after_company, escrow.depositor_fee_percent);
        if refund > 0 {
            client.transfer(&contract, &depositor, &refund);
        }
        if company_fee > 0 {
            client.transfer(&contract, &company, &company_fee);
        }
        if mediator_fee > 0 {
            client.transfer(&contract, &escrow.mediator, &mediator_fee);
        }
    }

    escrow.cancelled = true;
    storage::save_escrow(env, escrow);
    storage::touch(env, escrow.id);
    scheduler::remove(env, escrow.id);

    emit_escrow_cancelled(env, EscrowCancelled { id: escrow.id });
    Ok(())
}

/// Extend the TTL of instance storage. Called during state-changing
/// operations.
fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
}
