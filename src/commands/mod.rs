pub mod analyze;
pub mod init;
pub mod predict;
pub mod simulate;
