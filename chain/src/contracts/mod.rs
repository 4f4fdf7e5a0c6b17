//! Native contracts shipped with the simulator.

mod eco_footprint;

pub use eco_footprint::{
    EcoFootprint, CONTRACT_NAME, ERR_CATEGORY_TOO_LONG, ERR_EMPTY_CATEGORY, ERR_TOTAL_OVERFLOW,
    MAX_CATEGORY_LEN,
};
