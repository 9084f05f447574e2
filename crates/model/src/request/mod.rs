pub mod column;
pub mod descriptor;
pub mod order;
pub mod search;
pub mod table;
