pub mod allocator;
pub mod calculator;
pub mod liquidation;
pub mod numeric;
pub mod targets;

pub use allocator::QuantityAllocator;
pub use calculator::TradeCalculator;
