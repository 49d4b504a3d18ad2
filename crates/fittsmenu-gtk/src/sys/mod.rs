pub mod runtime;
pub mod server;
pub mod watcher;

pub const SOCKET_PATH: &str = "/tmp/fittsmenu.sock";
