pub mod batch;
pub mod convert;
pub mod init;
pub mod serve;
pub mod watch;
