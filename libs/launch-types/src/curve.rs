use soroban_sdk::contracttype;

/// One static band of a multi-curve launch
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CurveSegment {
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub num_positions: u32,
    /// Share of the supply placed on this curve, in WAD
    pub share: i128,
}
