pub mod cancellation;
pub mod ports;
pub mod render_columns;
pub mod trace_trajectory;
