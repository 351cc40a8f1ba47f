pub mod flow_cell_check;
pub mod outcome;
pub mod protocols;
