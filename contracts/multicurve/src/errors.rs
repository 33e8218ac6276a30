use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CurveError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidTickSpacing = 3,
    NoCurves = 4,
    InvalidTickRange = 5,
    CurvesNotOrdered = 6,
    InvalidNumPositions = 7,
    TooManyPositions = 8,
    InvalidShares = 9,
    InvalidTokenAmount = 10,
    WrongPoolStatus = 11,
    ArithmeticOverflow = 12,
}
