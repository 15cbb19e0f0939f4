pub mod extract;
pub mod init;
pub mod key;
