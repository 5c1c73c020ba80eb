pub mod docs;
pub mod init;
pub mod routes;
pub mod serve;
