//! Scene-level scenarios spanning expansion, propagation, rotation and insertion

mod frame_scenarios;
