pub mod history;
pub mod planning;
