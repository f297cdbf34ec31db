/**
* filename : mod
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/

pub mod signal_types;
pub mod composer;

pub use signal_types::*;
pub use composer::*;
