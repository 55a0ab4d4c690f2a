use soroban_sdk::{contracttype, Address, String, Vec};

/// Storage keys for the escrow contract.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Owner address with configuration authority
    Admin,
    /// Company address receiving protocol fees
    Company,
    /// Token contract backing `AssetMethod::Token` escrows
    TokenAsset,
    /// Token contract backing `AssetMethod::Native` escrows
    NativeAsset,
    /// Global fee configuration
    FeeConfig,
    /// Per-call cap on scheduler expiry processing
    CronCap,
    /// Last escrow id counter
    EscrowCounter,
    /// Escrow id at the head of the due-list (0 = empty)
    CronHead,
    /// Escrow record by id
    Escrow(u64),
    /// Registered depositor addresses by escrow id
    DepositorList(u64),
    /// Depositor membership flag by escrow id and address
    Depositor(u64, Address),
    /// Recorded contribution by escrow id and address
    Contribution(u64, Address),
    /// Addresses with a recorded contribution, in deposit order
    Contributors(u64),
    /// Scheduler node by escrow id
    CronJob(u64),
    /// Timestamp of the last mutation touching an escrow
    LastUpdated(u64),
}

/// Which asset backs an escrow. Both resolve to a token contract fixed at
/// initialization; `Native` escrows are the only ones allowed to take the
/// open-recipient "bet" shape.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum AssetMethod {
    Token = 0,
    Native = 1,
}

/// One conditional-fund-holding agreement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Escrow {
    /// Unique identifier, 1-based; 0 is reserved as the scheduler nil link
    pub id: u64,
    /// Free-text title
    pub title: String,
    /// Target amount in the escrow's asset
    pub contract_value: i128,
    /// Running sum of net contributions, never above `contract_value`
    pub total_deposited: i128,
    /// Seconds from creation to deadline
    pub duration: u64,
    /// Creation timestamp
    pub created_at: u64,
    /// `created_at + duration`
    pub deadline: u64,
    /// Address with release/cancel authority
    pub mediator: Address,
    /// Funds destination on release; `None` for bet escrows until assigned
    pub recipient: Option<Address>,
    /// Address that funded the minimum deposit and defined terms
    pub creator: Address,
    /// Whether depositors are restricted to the registered allow-list
    pub is_private: bool,
    /// Asset variant this escrow settles in
    pub method: AssetMethod,
    /// Extra percentage taken from cancellation refunds, paid to the mediator
    pub depositor_fee_percent: u32,
    /// Total deposits have reached the contract value
    pub completed: bool,
    /// Funds sent to the recipient (terminal)
    pub released: bool,
    /// Funds returned to depositors (terminal)
    pub cancelled: bool,
}

/// Creation parameters, passed alongside the authorizing creator.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreateEscrowParams {
    /// Free-text title
    pub title: String,
    /// Target amount in the escrow's asset
    pub contract_value: i128,
    /// Seconds until the deadline
    pub duration: u64,
    /// Address with release/cancel authority
    pub mediator: Address,
    /// Funds destination; `None` only for the native bet shape
    pub recipient: Option<Address>,
    /// Gross amount pulled from the creator at creation
    pub min_deposit: i128,
    /// Allow-list (private) or pre-registered depositors (open)
    pub depositors: Vec<Address>,
    /// Whether deposits are restricted to the listed depositors
    pub is_private: bool,
    /// Extra percentage taken from cancellation refunds, paid to the mediator
    pub depositor_fee_percent: u32,
    /// Asset variant this escrow settles in
    pub method: AssetMethod,
}

/// Global fee percentages, owner-mutable, applied at operation time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeConfig {
    /// Company cut of each refund on cancellation
    pub cancel_percent: u32,
    /// Company cut of the total on release
    pub release_percent: u32,
    /// Company cut of every deposit as it is recorded
    pub deposit_percent: u32,
}

/// Due-list node, keyed by escrow id. `prev`/`next` of 0 mean none.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CronJob {
    pub id: u64,
    pub deadline: u64,
    pub prev: u64,
    pub next: u64,
}

/// Status flags view.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowStates {
    pub completed: bool,
    pub released: bool,
    pub cancelled: bool,
}

/// Party addresses view.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowAddresses {
    pub mediator: Address,
    pub recipient: Option<Address>,
    pub creator: Address,
}

/// Amounts view.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowAmounts {
    pub total_deposited: i128,
    pub contract_value: i128,
}

/// Number of ledgers in a day (assuming ~5 second block time)
pub const DAY_IN_LEDGERS: u32 = 17280;

/// TTL extension amount for persistent storage (90 days)
pub const PERSISTENT_TTL_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;

/// TTL threshold for persistent storage
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL_AMOUNT - DAY_IN_LEDGERS;

/// TTL extension amount for instance storage (30 days)
pub const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

/// TTL threshold before extending instance storage
pub const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

/// Default per-call cap on scheduler expiry processing.
pub const DEFAULT_CRON_CAP: u32 = 10;

/// Creator minimum deposit floor: 1% of the contract value.
pub const MIN_DEPOSIT_PERCENT: i128 = 1;
