use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum AuctionError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidTickSpacing = 3,
    InvalidTickRange = 4,
    InvalidTimeRange = 5,
    InvalidEpochLength = 6,
    InvalidGamma = 7,
    InvalidNumPDSlugs = 8,
    InvalidProceedLimits = 9,
    InvalidTokenAmount = 10,
    InvalidMaxTickDelta = 11,
    InvalidTime = 12,
    WrongPoolStatus = 13,
    SwapBelowRange = 14,
    CannotMigrate = 15,
    DookNotEnabled = 16,
    BuyAfterInsufficientProceeds = 17,
    NegativeNetSold = 18,
    InvalidTradeAmount = 19,
    ArithmeticOverflow = 20,
}
