//! Grid plots of trial-averaged epochs.
//!
//! Each channel gets one cell holding its averaged trace, a shaded
//! standard-error band and origin reference lines. Drawing goes into an
//! explicit [`Figure`] handle, so several conditions can be overlaid before
//! the figure is presented.
pub mod drivers;
pub use drivers::*;
