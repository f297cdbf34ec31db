/**
* filename : mod
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/
pub mod series;
pub mod trend;
pub mod crossover;

pub use series::*;
pub use trend::*;
pub use crossover::*;
