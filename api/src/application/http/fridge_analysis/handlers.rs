pub mod analyze_fridge;
pub mod analyze_fridge_stream;
