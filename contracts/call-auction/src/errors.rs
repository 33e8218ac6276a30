use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CallAuctionError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidConfig = 3,
    InvalidTick = 4,
    InvalidTime = 5,
    BidBelowMinimumTick = 6,
    BidTooSmall = 7,
    LiquidityUnderflow = 8,
    WrongPoolStatus = 9,
    BidNotFound = 10,
    BidsOutstanding = 11,
    ArithmeticOverflow = 12,
}
