pub mod clock;
pub mod constants;
pub mod frame;
pub mod point;
pub mod region;
pub mod tracker_config;
