pub mod assemble;
pub mod notebooks;
pub mod process;
pub mod today;
