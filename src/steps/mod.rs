pub mod choose;
pub mod load;
pub mod publish;
