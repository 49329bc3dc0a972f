pub mod reply;
pub mod rpc_server;
