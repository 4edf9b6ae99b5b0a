//! Rebalancing engine: shift propagation, compression, extension, and the
//! composed operations built from them.

pub mod compress;
pub mod extend;
pub mod ops;
pub mod shift;

pub use compress::compress;
pub use extend::extend;
pub use ops::{RebalanceOutcome, Rebalancer};
pub use shift::{shift_earlier, shift_later};
