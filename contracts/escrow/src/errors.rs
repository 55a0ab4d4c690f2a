use soroban_sdk::contracterror;

/// Error codes for the escrow contract.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Contract has already been initialized
    AlreadyInitialized = 1,
    /// Contract has not been initialized
    NotInitialized = 2,
    /// Caller does not have the required role
    Unauthorized = 3,
    /// Escrow id does not exist
    EscrowNotFound = 4,
    /// Amount must be positive
    InvalidAmount = 5,
    /// Duration must be positive
    InvalidDuration = 6,
    /// Fee percentage outside [0, 100]
    InvalidFeePercent = 7,
    /// Creator deposit below the required minimum
    DepositTooLow = 8,
    /// Private escrow needs a non-empty depositor list
    NoDepositors = 9,
    /// Depositor list contains a duplicate address
    DuplicateDepositor = 10,
    /// Token escrows must name a recipient at creation
    RecipientRequired = 11,
    /// Caller is not a registered depositor for this escrow
    NotDepositor = 12,
    /// Escrow is fully funded and accepts no more deposits
    EscrowAlreadyCompleted = 13,
    /// Escrow deadline has passed
    EscrowExpired = 14,
    /// Escrow has already been released
    AlreadyReleased = 15,
    /// Escrow has already been cancelled
    AlreadyCancelled = 16,
    /// Escrow has not reached its contract value
    NotCompleted = 17,
    /// Bet escrow has no recipient assigned yet
    RecipientNotSet = 18,
    /// Recipient candidate is not a registered depositor
    InvalidRecipient = 19,
    /// Scheduler processing cap must be at least 1
    InvalidCronCap = 20,
    /// Operation only applies to bet (native, open-recipient) escrows
    NotBetEscrow = 21,
}
