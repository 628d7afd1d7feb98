pub mod calculate_column_bands;
pub mod calculate_iterations;
pub mod screen_mapping;
