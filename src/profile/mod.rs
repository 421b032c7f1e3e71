pub mod normalizer;
pub mod raw;
pub mod rows;
pub mod stat;
pub mod unit;

pub use normalizer::{normalize, NormalizeOutcome};
pub use raw::RawProfile;
pub use rows::{CharacterRow, NormalizedProfile, RelicRow, SubstatSlot};
pub use stat::CoreStat;
pub use unit::{DisplayValue, Unit};
