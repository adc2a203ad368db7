pub mod compare;
pub mod init;
pub mod score;
pub mod subjects;
pub mod validate;
